use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;
use tracing::info;
use tracing::warn;

use crate::ColorId;
use crate::StateId;
use crate::direction::Turn;
use crate::direction::TurnError;
use crate::parse_util;
use crate::parse_util::ConvertError;
use crate::parse_util::ParseError;

/// What the turmite reads before each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signal {
    pub state: StateId,
    pub color: ColorId,
}

/// What the turmite does in response to a [`Signal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub state: StateId,
    pub color: ColorId,
    pub turn: Turn,
}

/// The turmite program: exactly one [`Action`] per [`Signal`].
///
/// # Format
///
/// One rule per line:
/// ```notrust
/// state color -> state color direction
/// ```
///
/// where `state` is a lowercase letter (`a` is state `0`), `color` is a palette index and
/// `direction` is one of `forward|f|backward|back|left|l|right|r`, ignoring case. Blank lines and
/// lines starting with `#` are skipped. A signal defined twice keeps its last definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    rules: HashMap<Signal, Action>,
}

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("Badly formatted line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: LineError,
    },

    #[error("Failed to read rule file: {0}")]
    Io(#[from] io::Error),
}

impl RuleError {
    /// The 1-based line the error was found on, if it came from parsing.
    pub fn line(&self) -> Option<usize> {
        match self {
            RuleError::Line { line, .. } => Some(*line),
            RuleError::Io(_) => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineError {
    #[error("Expected a state letter, found end of line")]
    MissingState,

    #[error("Invalid state \"{got}\", expected a lowercase letter")]
    InvalidState { got: String },

    #[error("Expected a color, found end of line")]
    MissingColor,

    #[error("Invalid color: {0}")]
    InvalidColor(#[from] ConvertError),

    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),

    #[error("Expected a direction, found end of line")]
    MissingDirection,

    #[error("{0}")]
    Direction(#[from] TurnError),

    #[error("Unexpected trailing input \"{got}\"")]
    TrailingInput { got: String },
}

impl RuleTable {
    /// Read and parse a rule file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, RuleError> {
        let text = fs::read_to_string(path)?;

        text.parse()
    }

    pub fn get(&self, signal: Signal) -> Option<&Action> {
        self.rules.get(&signal)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Signal, &Action)> {
        self.rules.iter()
    }

    /// Largest color any rule reads or writes, or `None` for an empty table.
    pub fn max_color(&self) -> Option<ColorId> {
        self.rules
            .iter()
            .flat_map(|(signal, action)| [signal.color, action.color])
            .max()
    }
}

impl FromIterator<(Signal, Action)> for RuleTable {
    fn from_iter<I: IntoIterator<Item = (Signal, Action)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl FromStr for RuleTable {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rules = HashMap::new();

        for (i, line) in s.lines().enumerate() {
            let lineno = i + 1;

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (signal, action) = read_rule(line.as_bytes()).map_err(|source| RuleError::Line {
                line: lineno,
                source,
            })?;

            if rules.insert(signal, action).is_some() {
                warn!(
                    line = lineno,
                    state = signal.state,
                    color = signal.color,
                    "Rule already defined. Using latest"
                );
            }
        }

        info!("Read turmite with {} rules", rules.len());

        Ok(Self { rules })
    }
}

/// Parse `state color -> state color direction`.
fn read_rule(bytes: &[u8]) -> Result<(Signal, Action), LineError> {
    let bytes = parse_util::take_ws(bytes);
    let (state_in, bytes) = read_state(bytes)?;

    let bytes = parse_util::take_ws(bytes);
    let (color_in, bytes) = read_color(bytes)?;

    let bytes = parse_util::take_ws(bytes);
    let bytes = parse_util::expect_slice(b"->", bytes)?;

    let bytes = parse_util::take_ws(bytes);
    let (state_out, bytes) = read_state(bytes)?;

    let bytes = parse_util::take_ws(bytes);
    let (color_out, bytes) = read_color(bytes)?;

    let bytes = parse_util::take_ws(bytes);
    let (Some(word), bytes) = parse_util::take_until_ws(bytes) else {
        return Err(LineError::MissingDirection);
    };
    let turn: Turn = String::from_utf8_lossy(word).parse()?;

    let bytes = parse_util::take_ws(bytes);
    if !bytes.is_empty() {
        return Err(LineError::TrailingInput {
            got: String::from_utf8_lossy(bytes).to_string(),
        });
    }

    let signal = Signal {
        state: state_in,
        color: color_in,
    };
    let action = Action {
        state: state_out,
        color: color_out,
        turn,
    };

    Ok((signal, action))
}

/// A single lowercase letter, `a` being state `0`.
fn read_state(bytes: &[u8]) -> Result<(StateId, &[u8]), LineError> {
    let (Some(b), rest) = parse_util::take_1(bytes) else {
        return Err(LineError::MissingState);
    };

    let followed_by_ws = parse_util::peek_1(rest).is_none_or(|c| c.is_ascii_whitespace());

    if !b.is_ascii_lowercase() || !followed_by_ws {
        let (got, _) = parse_util::take_until_ws(bytes);

        return Err(LineError::InvalidState {
            got: String::from_utf8_lossy(got.unwrap_or(bytes)).to_string(),
        });
    }

    Ok((b - b'a', rest))
}

fn read_color(bytes: &[u8]) -> Result<(ColorId, &[u8]), LineError> {
    let (Some(color), bytes) = parse_util::take_until_ws(bytes) else {
        return Err(LineError::MissingColor);
    };

    Ok((parse_util::convert(color)?, bytes))
}
