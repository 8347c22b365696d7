use rand::Rng;

use super::board::Board;
use super::state::{Position, Snake};

/// Pick a random free cell for food, or `None` when the snake fills the board.
///
/// Rejection sampling: draw uniformly over the board until the draw misses
/// the snake. Only called when food is eaten, so the expected number of draws
/// `1 / (1 - occupancy)` stays small in practice.
pub fn place<R: Rng + ?Sized>(rng: &mut R, snake: &Snake, board: &Board) -> Option<Position> {
    if snake.len() >= board.area() {
        return None;
    }

    loop {
        let x = rng.gen_range(0..board.width()) as i32;
        let y = rng.gen_range(0..board.height()) as i32;
        let pos = Position::new(x, y);

        if !snake.occupies(pos) {
            return Some(pos);
        }
    }
}
