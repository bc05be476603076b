use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of key behind a [`KeyEvent`]. Printable input is always `Char`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KeyType {
    #[default]
    Invalid,
    Special,
    Escape,
    Return,
    Space,
    Left,
    Up,
    Right,
    Down,
    Back,
    Delete,
    Shift,
    Tab,
    End,
    Home,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Char,
}

const FUNCTION_KEYS: [KeyType; 12] = [
    KeyType::F1,
    KeyType::F2,
    KeyType::F3,
    KeyType::F4,
    KeyType::F5,
    KeyType::F6,
    KeyType::F7,
    KeyType::F8,
    KeyType::F9,
    KeyType::F10,
    KeyType::F11,
    KeyType::F12,
];

impl KeyType {
    /// Zero-based index of a function key: `F1` is 0, `F12` is 11.
    pub fn function_index(self) -> Option<u8> {
        FUNCTION_KEYS
            .iter()
            .position(|k| *k == self)
            .map(|i| i as u8)
    }
}

/// Errors from parsing key names and key scripts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyParseError {
    #[error("unknown key name: {0:?}")]
    UnknownKey(String),
    #[error("unknown modifier {modifier:?} in chord {chord:?}")]
    UnknownModifier { chord: String, modifier: String },
    #[error("empty chord")]
    EmptyChord,
    #[error("unterminated chord starting at {0:?}")]
    Unterminated(String),
}

impl FromStr for KeyType {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.to_ascii_lowercase().as_str() {
            "escape" | "esc" => Self::Escape,
            "return" | "enter" => Self::Return,
            "space" => Self::Space,
            "left" => Self::Left,
            "up" => Self::Up,
            "right" => Self::Right,
            "down" => Self::Down,
            "back" | "backspace" => Self::Back,
            "delete" | "del" => Self::Delete,
            "shift" => Self::Shift,
            "tab" => Self::Tab,
            "end" => Self::End,
            "home" => Self::Home,
            other => other
                .strip_prefix('f')
                .and_then(|n| n.parse::<usize>().ok())
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| FUNCTION_KEYS.get(i).copied())
                .ok_or_else(|| KeyParseError::UnknownKey(s.to_string()))?,
        };
        Ok(key)
    }
}

/// One key press as delivered by the video driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyEvent {
    pub kind: KeyType,
    /// The typed character. Only meaningful for `KeyType::Char`.
    pub c: char,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyEvent {
    /// A printable character without modifiers.
    pub fn char(c: char) -> Self {
        Self {
            kind: KeyType::Char,
            c,
            ..Self::default()
        }
    }

    /// A non-printable key without modifiers.
    pub fn key(kind: KeyType) -> Self {
        Self {
            kind,
            c: '\0',
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn is_char(&self) -> bool {
        self.kind == KeyType::Char
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.shift {
            f.write_str("Shift+")?;
        }
        if self.alt {
            f.write_str("Alt+")?;
        }
        match self.kind {
            KeyType::Char => write!(f, "{}", self.c),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Parses a chord such as `Ctrl+Shift+F1`, `Alt+3` or `F10`.
impl FromStr for KeyEvent {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "+" {
            return Ok(KeyEvent::char('+'));
        }
        let mut parts: Vec<&str> = s.split('+').collect();
        // A trailing "+" means the plus key itself, e.g. "Ctrl++"
        if s.ends_with("++") {
            parts.truncate(parts.len().saturating_sub(2));
            parts.push("+");
        }
        let key = parts.pop().filter(|k| !k.is_empty()).ok_or(KeyParseError::EmptyChord)?;

        let mut chars = key.chars();
        let mut event = match (chars.next(), chars.next()) {
            (Some(c), None) => KeyEvent::char(c),
            _ => KeyEvent::key(key.parse()?),
        };

        for modifier in parts {
            match modifier.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => event.ctrl = true,
                "shift" => event.shift = true,
                "alt" => event.alt = true,
                _ => {
                    return Err(KeyParseError::UnknownModifier {
                        chord: s.to_string(),
                        modifier: modifier.to_string(),
                    });
                }
            }
        }
        Ok(event)
    }
}

/// Turn a script like `"winter <F7> <Alt+1>"` into key events.
///
/// Whitespace separates tokens and is not itself typed. Plain tokens type
/// one `Char` event per character; `<...>` tokens are chords.
pub fn parse_key_script(script: &str) -> Result<Vec<KeyEvent>, KeyParseError> {
    let mut events = Vec::new();
    for token in script.split_whitespace() {
        match token.strip_prefix('<') {
            Some(rest) => {
                let chord = rest
                    .strip_suffix('>')
                    .ok_or_else(|| KeyParseError::Unterminated(token.to_string()))?;
                events.push(chord.parse()?);
            }
            None => events.extend(token.chars().map(KeyEvent::char)),
        }
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_keys_are_indexed_from_zero() {
        assert_eq!(KeyType::F1.function_index(), Some(0));
        assert_eq!(KeyType::F8.function_index(), Some(7));
        assert_eq!(KeyType::F12.function_index(), Some(11));
        assert_eq!(KeyType::Char.function_index(), None);
        assert_eq!(KeyType::Escape.function_index(), None);
    }

    #[test]
    fn key_names_parse_case_insensitively() {
        assert_eq!("f7".parse::<KeyType>(), Ok(KeyType::F7));
        assert_eq!("F10".parse::<KeyType>(), Ok(KeyType::F10));
        assert_eq!("Escape".parse::<KeyType>(), Ok(KeyType::Escape));
        assert!("F13".parse::<KeyType>().is_err());
        assert!("F0".parse::<KeyType>().is_err());
        assert!("banana".parse::<KeyType>().is_err());
    }

    #[test]
    fn chords_parse_modifiers() {
        let ke: KeyEvent = "Ctrl+Shift+F1".parse().unwrap();
        assert_eq!(ke, KeyEvent::key(KeyType::F1).with_ctrl().with_shift());

        let ke: KeyEvent = "alt+3".parse().unwrap();
        assert_eq!(ke, KeyEvent::char('3').with_alt());

        let ke: KeyEvent = "Ctrl++".parse().unwrap();
        assert_eq!(ke, KeyEvent::char('+').with_ctrl());
    }

    #[test]
    fn bare_plus_is_the_plus_key() {
        assert_eq!("+".parse::<KeyEvent>(), Ok(KeyEvent::char('+')));
        let events = parse_key_script("<+> <Alt++>").unwrap();
        assert_eq!(events, vec![KeyEvent::char('+'), KeyEvent::char('+').with_alt()]);
    }

    #[test]
    fn bad_chords_are_rejected() {
        assert!(matches!(
            "Meta+F1".parse::<KeyEvent>(),
            Err(KeyParseError::UnknownModifier { .. })
        ));
        assert_eq!("".parse::<KeyEvent>(), Err(KeyParseError::EmptyChord));
    }

    #[test]
    fn script_mixes_text_and_chords() {
        let events = parse_key_script("win <F7> ter <Alt+1>").unwrap();
        assert_eq!(events.len(), 8);
        assert_eq!(events[0], KeyEvent::char('w'));
        assert_eq!(events[3], KeyEvent::key(KeyType::F7));
        assert_eq!(events[6], KeyEvent::char('r'));
        assert_eq!(events[7], KeyEvent::char('1').with_alt());
    }

    #[test]
    fn script_rejects_unterminated_chord() {
        assert!(matches!(
            parse_key_script("<Ctrl+F1"),
            Err(KeyParseError::Unterminated(_))
        ));
    }

    #[test]
    fn display_round_trips_through_parse() {
        let ke = KeyEvent::key(KeyType::F9).with_ctrl().with_shift();
        assert_eq!(ke.to_string(), "Ctrl+Shift+F9");
        assert_eq!(ke.to_string().parse::<KeyEvent>(), Ok(ke));
    }
}
