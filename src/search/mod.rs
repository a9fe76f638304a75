pub mod bot;
pub mod eval;
pub mod repetition;
pub mod rules;
pub mod scorer;
