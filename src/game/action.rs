use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::config::SnakeConfig;
use crate::error::GameError;

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four cardinal directions
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Returns the direction pointing the other way
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Maps an arrow key code (37..=40) to a direction.
    ///
    /// Every other code is ignored.
    pub fn from_key_code(code: u32) -> Option<Direction> {
        match code {
            37 => Some(Direction::Left),
            38 => Some(Direction::Up),
            39 => Some(Direction::Right),
            40 => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        }
    }
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|direction| direction.name() == s)
            .ok_or_else(|| GameError::UnknownDirection {
                action: "move".to_string(),
                direction: s.to_string(),
            })
    }
}

/// Action fed to the game state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Begin a fresh session, optionally overriding the default snake placement
    Start(Option<SnakeConfig>),
    /// Move the head one cell in a direction
    Move(Direction),
    /// Discard the current session and start again
    Reset(Option<SnakeConfig>),
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Move(direction)
    }
}

/// Untyped action envelope as delivered by an external dispatcher,
/// e.g. `{"type": "move", "payload": "Up"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAction {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
}

impl RawAction {
    pub fn new(kind: impl Into<String>, payload: Option<serde_json::Value>) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }

    fn snake_payload(&self) -> Result<Option<SnakeConfig>, GameError> {
        match &self.payload {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|_| GameError::UnknownAction {
                    action: format!("{} with payload {}", self.kind, value),
                }),
        }
    }
}

impl TryFrom<RawAction> for Action {
    type Error = GameError;

    fn try_from(raw: RawAction) -> Result<Self, Self::Error> {
        match raw.kind.as_str() {
            "start" => Ok(Action::Start(raw.snake_payload()?)),
            "reset" => Ok(Action::Reset(raw.snake_payload()?)),
            "move" => match &raw.payload {
                Some(serde_json::Value::String(name)) => name.parse().map(Action::Move),
                other => Err(GameError::UnknownDirection {
                    action: raw.kind.clone(),
                    direction: other
                        .as_ref()
                        .map_or_else(|| "<none>".to_string(), |value| value.to_string()),
                }),
            },
            _ => Err(GameError::UnknownAction { action: raw.kind }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Right));
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_key_codes() {
        assert_eq!(Direction::from_key_code(37), Some(Direction::Left));
        assert_eq!(Direction::from_key_code(38), Some(Direction::Up));
        assert_eq!(Direction::from_key_code(39), Some(Direction::Right));
        assert_eq!(Direction::from_key_code(40), Some(Direction::Down));
        assert_eq!(Direction::from_key_code(32), None);
        assert_eq!(Direction::from_key_code(41), None);
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!("Left".parse::<Direction>(), Ok(Direction::Left));
        assert!(matches!(
            "left".parse::<Direction>(),
            Err(GameError::UnknownDirection { .. })
        ));
    }

    #[test]
    fn test_raw_move_action() {
        let raw: RawAction = serde_json::from_str(r#"{"type": "move", "payload": "Down"}"#).unwrap();
        assert_eq!(Action::try_from(raw), Ok(Action::Move(Direction::Down)));
    }

    #[test]
    fn test_raw_move_with_bad_direction() {
        let raw = RawAction::new("move", Some(serde_json::json!("Diagonal")));
        assert_eq!(
            Action::try_from(raw),
            Err(GameError::UnknownDirection {
                action: "move".to_string(),
                direction: "Diagonal".to_string(),
            })
        );

        let raw = RawAction::new("move", None);
        assert!(matches!(
            Action::try_from(raw),
            Err(GameError::UnknownDirection { .. })
        ));
    }

    #[test]
    fn test_raw_start_and_reset() {
        let raw = RawAction::new("reset", None);
        assert_eq!(Action::try_from(raw), Ok(Action::Reset(None)));

        let raw = RawAction::new(
            "start",
            Some(serde_json::json!({"x": 2, "y": 3, "length": 4})),
        );
        assert_eq!(
            Action::try_from(raw),
            Ok(Action::Start(Some(SnakeConfig::new(2, 3, 4))))
        );
    }

    #[test]
    fn test_raw_unknown_action() {
        let raw = RawAction::new("jump", None);
        assert_eq!(
            Action::try_from(raw),
            Err(GameError::UnknownAction {
                action: "jump".to_string()
            })
        );
    }
}
