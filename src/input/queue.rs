use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::game::Direction;

/// Why a key press never reached the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    /// Not one of the four arrow key codes
    UnknownKey(u32),
    /// Exact opposite of the direction it would follow
    Reversal { current: Direction, requested: Direction },
    /// The session is over or has not started
    Closed,
}

/// Outcome of offering a direction to the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Accepted,
    Ignored(IgnoredReason),
}

impl Admission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Admission::Accepted)
    }
}

/// FIFO of pending directions, drained one entry per tick.
///
/// The last remaining entry is never removed by a tick, so the snake keeps
/// moving in the last requested direction without repeated key presses.
#[derive(Debug, Clone)]
pub struct DirectionQueue {
    pending: VecDeque<Direction>,
    last_dispatched: Option<Direction>,
    open: bool,
}

impl DirectionQueue {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            last_dispatched: None,
            open: true,
        }
    }

    /// Translate a raw key code and enqueue it.
    pub fn press_key(&mut self, code: u32) -> Admission {
        match Direction::from_key_code(code) {
            Some(direction) => self.push(direction),
            None => {
                warn!(code, "Wrong direction key");
                Admission::Ignored(IgnoredReason::UnknownKey(code))
            }
        }
    }

    /// Enqueue a direction unless it reverses the one it would follow.
    pub fn push(&mut self, requested: Direction) -> Admission {
        if !self.open {
            return Admission::Ignored(IgnoredReason::Closed);
        }

        if let Some(current) = self.current()
            && current.is_opposite(requested)
        {
            debug!(?current, ?requested, "Dropping reversal");
            return Admission::Ignored(IgnoredReason::Reversal { current, requested });
        }

        self.pending.push_back(requested);
        Admission::Accepted
    }

    /// Direction for this tick: dequeue the oldest entry when more than one is
    /// pending, peek when exactly one is, nothing when empty.
    pub fn next_for_tick(&mut self) -> Option<Direction> {
        let next = match self.pending.len() {
            0 => None,
            1 => self.pending.front().copied(),
            _ => self.pending.pop_front(),
        };
        if next.is_some() {
            self.last_dispatched = next;
        }
        next
    }

    /// Most recently enqueued pending direction, else the last dispatched one
    pub fn current(&self) -> Option<Direction> {
        self.pending.back().copied().or(self.last_dispatched)
    }

    pub fn pending(&self) -> impl Iterator<Item = Direction> + '_ {
        self.pending.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Stop accepting input; pending entries are discarded.
    pub fn close(&mut self) {
        self.open = false;
        self.pending.clear();
    }

    /// Forget all history and accept input again.
    pub fn reopen(&mut self) {
        self.pending.clear();
        self.last_dispatched = None;
        self.open = true;
    }
}

impl Default for DirectionQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue_with(directions: &[Direction]) -> DirectionQueue {
        let mut queue = DirectionQueue::new();
        for &direction in directions {
            assert!(queue.push(direction).is_accepted());
        }
        queue
    }

    #[test]
    fn test_arrow_keys() {
        let mut queue = DirectionQueue::new();
        assert!(queue.press_key(38).is_accepted());
        assert!(queue.press_key(37).is_accepted());
        assert_eq!(
            queue.pending().collect::<Vec<_>>(),
            vec![Direction::Up, Direction::Left]
        );
    }

    #[test]
    fn test_unknown_key() {
        let mut queue = DirectionQueue::new();
        assert_eq!(
            queue.press_key(65),
            Admission::Ignored(IgnoredReason::UnknownKey(65))
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_reversal_of_pending_direction_is_dropped() {
        let mut queue = queue_with(&[Direction::Right]);
        assert_eq!(
            queue.push(Direction::Left),
            Admission::Ignored(IgnoredReason::Reversal {
                current: Direction::Right,
                requested: Direction::Left,
            })
        );
        assert!(queue.push(Direction::Up).is_accepted());
        assert!(queue.push(Direction::Right).is_accepted());
        assert!(queue.push(Direction::Right).is_accepted());
    }

    #[test]
    fn test_reversal_of_consumed_direction_is_dropped() {
        let mut queue = queue_with(&[Direction::Up, Direction::Left]);
        assert_eq!(queue.next_for_tick(), Some(Direction::Up));
        assert_eq!(queue.next_for_tick(), Some(Direction::Left));
        assert_eq!(queue.len(), 1);

        assert!(!queue.push(Direction::Right).is_accepted());
        assert!(queue.push(Direction::Down).is_accepted());
    }

    #[test]
    fn test_first_direction_is_always_accepted() {
        for direction in Direction::ALL {
            let mut queue = DirectionQueue::new();
            assert!(queue.push(direction).is_accepted());
        }
    }

    #[test]
    fn test_empty_queue_dispatches_nothing() {
        let mut queue = DirectionQueue::new();
        assert_eq!(queue.next_for_tick(), None);
        assert_eq!(queue.current(), None);
    }

    #[test]
    fn test_backlog_drains_in_order() {
        let mut queue = DirectionQueue {
            pending: VecDeque::from([Direction::Up, Direction::Down]),
            ..DirectionQueue::new()
        };
        assert_eq!(queue.next_for_tick(), Some(Direction::Up));
        assert_eq!(queue.pending().collect::<Vec<_>>(), vec![Direction::Down]);
        assert_eq!(queue.next_for_tick(), Some(Direction::Down));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_single_entry_is_peeked() {
        let mut queue = queue_with(&[Direction::Left]);
        assert_eq!(queue.next_for_tick(), Some(Direction::Left));
        assert_eq!(queue.next_for_tick(), Some(Direction::Left));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_closed_queue_rejects_input() {
        let mut queue = queue_with(&[Direction::Left, Direction::Up]);
        queue.close();

        assert!(queue.is_empty());
        assert_eq!(
            queue.push(Direction::Down),
            Admission::Ignored(IgnoredReason::Closed)
        );
        assert_eq!(queue.next_for_tick(), None);

        queue.reopen();
        assert!(queue.is_open());
        assert_eq!(queue.current(), None);
        assert!(queue.push(Direction::Down).is_accepted());
    }
}
