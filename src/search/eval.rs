use cozy_chess::Piece;

const PAWN: i32 = 100;
const KNIGHT: i32 = 300;
const BISHOP: i32 = 300;
const ROOK: i32 = 500;
const QUEEN: i32 = 900;
const KING: i32 = 10_000;

/// Material value of a piece kind.
pub fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => PAWN,
        Piece::Knight => KNIGHT,
        Piece::Bishop => BISHOP,
        Piece::Rook => ROOK,
        Piece::Queen => QUEEN,
        Piece::King => KING,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minor_pieces_are_equal_and_king_dominates() {
        assert_eq!(piece_value(Piece::Knight), piece_value(Piece::Bishop));
        let others: i32 = Piece::ALL.iter().filter(|&&p| p != Piece::King).map(|&p| piece_value(p)).sum();
        assert!(piece_value(Piece::King) > others);
    }
}
