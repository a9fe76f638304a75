use crate::board::GameBoard;
use crate::error::Result;

// Make/undo perft over the board collaborator (no cloning)
pub fn perft<B: GameBoard + ?Sized>(board: &mut B, depth: u32) -> Result<u64> {
    if depth == 0 { return Ok(1); }
    let moves = board.legal_moves(false);
    if depth == 1 { return Ok(moves.len() as u64); }
    let mut nodes = 0u64;
    for mv in moves {
        board.make_move(mv)?;
        nodes += perft(board, depth - 1)?;
        board.undo_move(mv)?;
    }
    Ok(nodes)
}
