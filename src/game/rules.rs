//! Move legality.

use super::board::Board;
use super::state::{Position, Snake};

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Classify the collision a head moving to `new_head` would cause.
///
/// The body check runs against the snake before the move, tail included,
/// so stepping onto the cell the tail is about to vacate counts as a
/// self-collision.
pub fn check_move(new_head: Position, snake: &Snake, board: &Board) -> Option<CollisionType> {
    if !board.contains(new_head) {
        return Some(CollisionType::Wall);
    }

    if snake.collides_with_body(new_head) {
        return Some(CollisionType::SelfCollision);
    }

    None
}

pub fn is_legal(new_head: Position, snake: &Snake, board: &Board) -> bool {
    check_move(new_head, snake, board).is_none()
}
