use crate::game_state::chess_types::*;

/// Common seam for the pseudo-legal and legal generators.
///
/// Each call materializes a fresh list; two calls on the same unchanged state
/// return the same moves in the same order.
pub trait MoveGenerator: Send + Sync {
    fn generate_moves(&self, game_state: &GameState) -> Vec<Move>;

    fn generate_moves_for_square(&self, game_state: &GameState, from: Position) -> Vec<Move>;
}
