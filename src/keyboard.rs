//! Keyboard bindings for the day grid.

use std::str::FromStr;

use crate::Direction;

/// Keys the day grid reacts to, named after their DOM `code` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Home,
    End,
    Space,
    Enter,
}

/// What a key press asks the picker to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    Move(Direction),
    SelectCurrent,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown key code: {0}")]
pub struct UnknownKey(pub String);

impl Key {
    /// The command bound to this key. `modifier` (shift) turns page moves
    /// into year moves.
    pub const fn command(self, modifier: bool) -> KeyCommand {
        let direction = match self {
            Self::ArrowLeft => Direction::PreviousDay,
            Self::ArrowRight => Direction::NextDay,
            Self::ArrowUp => Direction::PreviousSameWeekday,
            Self::ArrowDown => Direction::NextSameWeekday,
            Self::PageUp if modifier => Direction::PreviousYear,
            Self::PageUp => Direction::PreviousMonth,
            Self::PageDown if modifier => Direction::NextYear,
            Self::PageDown => Direction::NextMonth,
            Self::Home => Direction::FirstOfMonth,
            Self::End => Direction::LastOfMonth,
            Self::Space | Self::Enter => return KeyCommand::SelectCurrent,
        };
        KeyCommand::Move(direction)
    }
}

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ArrowLeft" => Ok(Self::ArrowLeft),
            "ArrowRight" => Ok(Self::ArrowRight),
            "ArrowUp" => Ok(Self::ArrowUp),
            "ArrowDown" => Ok(Self::ArrowDown),
            "PageUp" => Ok(Self::PageUp),
            "PageDown" => Ok(Self::PageDown),
            "Home" => Ok(Self::Home),
            "End" => Ok(Self::End),
            "Space" => Ok(Self::Space),
            "Enter" | "NumpadEnter" => Ok(Self::Enter),
            other => Err(UnknownKey(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        struct TestCase {
            key: Key,
            modifier: bool,
            expected: KeyCommand,
        }

        let cases = [
            TestCase {
                key: Key::ArrowLeft,
                modifier: false,
                expected: KeyCommand::Move(Direction::PreviousDay),
            },
            TestCase {
                key: Key::ArrowRight,
                modifier: true,
                expected: KeyCommand::Move(Direction::NextDay),
            },
            TestCase {
                key: Key::ArrowUp,
                modifier: false,
                expected: KeyCommand::Move(Direction::PreviousSameWeekday),
            },
            TestCase {
                key: Key::ArrowDown,
                modifier: false,
                expected: KeyCommand::Move(Direction::NextSameWeekday),
            },
            TestCase {
                key: Key::PageUp,
                modifier: false,
                expected: KeyCommand::Move(Direction::PreviousMonth),
            },
            TestCase {
                key: Key::PageUp,
                modifier: true,
                expected: KeyCommand::Move(Direction::PreviousYear),
            },
            TestCase {
                key: Key::PageDown,
                modifier: false,
                expected: KeyCommand::Move(Direction::NextMonth),
            },
            TestCase {
                key: Key::PageDown,
                modifier: true,
                expected: KeyCommand::Move(Direction::NextYear),
            },
            TestCase {
                key: Key::Home,
                modifier: false,
                expected: KeyCommand::Move(Direction::FirstOfMonth),
            },
            TestCase {
                key: Key::End,
                modifier: false,
                expected: KeyCommand::Move(Direction::LastOfMonth),
            },
            TestCase {
                key: Key::Space,
                modifier: false,
                expected: KeyCommand::SelectCurrent,
            },
            TestCase {
                key: Key::Enter,
                modifier: true,
                expected: KeyCommand::SelectCurrent,
            },
        ];

        for case in &cases {
            assert_eq!(
                case.key.command(case.modifier),
                case.expected,
                "{:?} (modifier: {})",
                case.key,
                case.modifier
            );
        }
    }

    #[test]
    fn test_parse_dom_codes() {
        assert_eq!("ArrowLeft".parse::<Key>(), Ok(Key::ArrowLeft));
        assert_eq!("PageDown".parse::<Key>(), Ok(Key::PageDown));
        assert_eq!("NumpadEnter".parse::<Key>(), Ok(Key::Enter));
        assert_eq!("Space".parse::<Key>(), Ok(Key::Space));

        let err = "KeyA".parse::<Key>().unwrap_err();
        assert_eq!(err, UnknownKey("KeyA".to_owned()));
        assert_eq!(err.to_string(), "Unknown key code: KeyA");
    }
}
