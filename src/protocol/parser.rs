//! Text command parser.
//!
//! Grammar (tokens separated by `.`):
//!
//! ```text
//! GET_MSG     := 'G' '.'
//! SET_MSG     := 'S' '.' relay_index '.' cmd_char '.' [duration '.']
//! relay_index := decimal, 0..N-1
//! cmd_char    := '1' (on) | '0' (off)
//! duration    := decimal milliseconds, only after cmd_char '1'
//! ```
//!
//! The [`Tokenizer`] walks an immutable slice with an explicit cursor.
//! Each step decodes exactly one token and its trailing separator, and
//! the cursor only moves when the token decodes.  Anything after the last
//! token the grammar needs is ignored, so `G.xyz` is a valid status query.

use crate::app::commands::{Command, OnDuration, RelayAction, RelayIndex};
use crate::error::ParseError;

/// Token separator.
pub const SEPARATOR: char = '.';

/// Cursor over a message, yielding one decoded token at a time.
pub struct Tokenizer<'a> {
    input: &'a str,
    cursor: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, cursor: 0 }
    }

    /// Byte offset of the next unread token.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The unread part of the message.
    pub fn remainder(&self) -> &'a str {
        &self.input[self.cursor..]
    }

    /// Decode the next token with `decode` and consume it plus its separator.
    /// On any error the cursor stays where it was.
    pub fn next<T>(
        &mut self,
        decode: impl FnOnce(&'a str) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let rest = self.remainder();
        let end = rest.find(SEPARATOR).ok_or(ParseError::MissingSeparator)?;
        let value = decode(&rest[..end])?;
        // The separator is one ASCII byte, so this stays on a char boundary.
        self.cursor += end + SEPARATOR.len_utf8();
        Ok(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MessageType {
    Get,
    Set,
}

fn message_type(token: &str) -> Result<MessageType, ParseError> {
    match token {
        "G" => Ok(MessageType::Get),
        "S" => Ok(MessageType::Set),
        _ => Err(ParseError::UnknownMessageType),
    }
}

/// Unsigned decimal.  Digit strings too long for `u64` saturate so that
/// oversized durations fall under the clamp policy instead of failing.
fn decimal(token: &str) -> Result<u64, ParseError> {
    if token.is_empty() {
        return Err(ParseError::InvalidInteger);
    }
    token.bytes().try_fold(0u64, |acc, b| {
        if b.is_ascii_digit() {
            Ok(acc.saturating_mul(10).saturating_add(u64::from(b - b'0')))
        } else {
            Err(ParseError::InvalidInteger)
        }
    })
}

fn relay_index<const N: usize>(token: &str) -> Result<RelayIndex<N>, ParseError> {
    let raw = decimal(token)?;
    usize::try_from(raw)
        .ok()
        .and_then(RelayIndex::new)
        .ok_or(ParseError::IndexOutOfRange)
}

fn switch(token: &str) -> Result<bool, ParseError> {
    match token {
        "1" => Ok(true),
        "0" => Ok(false),
        _ => Err(ParseError::MalformedToken),
    }
}

/// Decode one radio message for a bank of `N` relays.
///
/// `max_on_ms` is the configured maximum on-duration; a requested duration
/// of `0` or above it is replaced by it.
pub fn parse_message<const N: usize>(
    message: &str,
    max_on_ms: u64,
) -> Result<Command<N>, ParseError> {
    let mut tokens = Tokenizer::new(message);

    match tokens.next(message_type)? {
        MessageType::Get => Ok(Command::GetStatus),
        MessageType::Set => {
            let index = tokens.next(relay_index::<N>)?;
            let action = if tokens.next(switch)? {
                let requested = tokens.next(decimal)?;
                RelayAction::On(OnDuration::clamped(requested, max_on_ms))
            } else {
                RelayAction::Off
            };
            Ok(Command::SetRelay { index, action })
        }
    }
}
