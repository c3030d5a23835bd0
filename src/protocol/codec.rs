//! Line framing for the radio link.
//!
//! Wire format:
//! ```text
//! ┌────────────────────────────┬────┐
//! │ ASCII message (≤ 61 bytes) │ \n │
//! └────────────────────────────┴────┘
//! ```
//!
//! `\r`, `\n` and `\0` all terminate a message, so CRLF senders and
//! zero-padded radio packets work unchanged.  The decoder accumulates
//! bytes across reads; a single `Transport::read` may return part of a
//! message or several messages.  A line longer than one radio payload is
//! dropped whole rather than truncated, since a truncated `S.` message
//! could still parse as something the sender never meant.

use heapless::{String, Vec};
use log::warn;

/// Largest message payload (one radio packet).
pub const MAX_MESSAGE_LEN: usize = 61;

/// One decoded inbound message.
pub type Message = String<MAX_MESSAGE_LEN>;

/// Streaming line decoder.
pub struct LineDecoder {
    buf: Vec<u8, MAX_MESSAGE_LEN>,
    /// Set after an overflow until the next terminator.
    discarding: bool,
}

impl Default for LineDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl LineDecoder {
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            discarding: false,
        }
    }

    /// Feed one byte.  Returns a message when `byte` completes one.
    pub fn push(&mut self, byte: u8) -> Option<Message> {
        match byte {
            b'\n' | b'\r' | b'\0' => {
                if self.discarding {
                    self.discarding = false;
                    self.buf.clear();
                    None
                } else {
                    self.take()
                }
            }
            _ if self.discarding => None,
            _ => {
                if self.buf.push(byte).is_err() {
                    warn!("radio: message exceeds {} bytes, dropped", MAX_MESSAGE_LEN);
                    self.buf.clear();
                    self.discarding = true;
                }
                None
            }
        }
    }

    /// Feed a chunk of received bytes, yielding every completed message.
    pub fn feed<'a>(&'a mut self, data: &'a [u8]) -> impl Iterator<Item = Message> + 'a {
        data.iter().filter_map(move |&b| self.push(b))
    }

    /// End of a datagram: whatever is buffered is a complete message.
    pub fn flush(&mut self) -> Option<Message> {
        if self.discarding {
            self.reset();
            return None;
        }
        self.take()
    }

    /// Drop any partial message (e.g. after a transport reconnect).
    pub fn reset(&mut self) {
        self.buf.clear();
        self.discarding = false;
    }

    fn take(&mut self) -> Option<Message> {
        if self.buf.is_empty() {
            return None;
        }
        match String::from_utf8(core::mem::take(&mut self.buf)) {
            Ok(msg) => Some(msg),
            Err(_) => {
                warn!("radio: non-UTF-8 message dropped");
                None
            }
        }
    }
}

/// Frame a status line for transmission as `<status>\n`.
///
/// Returns the number of bytes written, or `None` if `out` is too small.
pub fn encode_status(status: &str, out: &mut [u8]) -> Option<usize> {
    let total = status.len() + 1;
    if total > out.len() {
        return None;
    }
    out[..status.len()].copy_from_slice(status.as_bytes());
    out[status.len()] = b'\n';
    Some(total)
}
