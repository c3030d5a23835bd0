//! Radio link: a [`Transport`] plus framing.
//!
//! Receives bytes, splits them into messages with the [`LineDecoder`],
//! and sends status lines back.  Knows nothing about relays; the control
//! loop hands each message to the controller and transmits the reply.

use log::warn;

use super::codec::{LineDecoder, MAX_MESSAGE_LEN, encode_status};
use super::transport::Transport;

/// Receive chunk size per poll.
const RX_CHUNK: usize = 64;

pub struct RadioLink<T: Transport> {
    transport: T,
    decoder: LineDecoder,
}

impl<T: Transport> RadioLink<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            decoder: LineDecoder::new(),
        }
    }

    /// Drain everything the transport has buffered, calling `handler`
    /// for each complete message.  Returns the number of messages seen.
    pub fn poll(&mut self, mut handler: impl FnMut(&str)) -> usize {
        let mut seen = 0;
        let mut chunk = [0u8; RX_CHUNK];
        while self.transport.available() {
            let n = match self.transport.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) => {
                    warn!("radio: read failed: {:?}", e);
                    self.decoder.reset();
                    break;
                }
            };
            for msg in self.decoder.feed(&chunk[..n]) {
                handler(msg.as_str());
                seen += 1;
            }
        }
        seen
    }

    /// Transmit a status line.
    pub fn send_status(&mut self, status: &str) -> Result<(), T::Error> {
        let mut frame = [0u8; MAX_MESSAGE_LEN + 1];
        let Some(len) = encode_status(status, &mut frame) else {
            warn!("radio: status line of {} bytes does not fit a packet", status.len());
            return Ok(());
        };
        let mut sent = 0;
        while sent < len {
            match self.transport.write(&frame[sent..len])? {
                0 => {
                    warn!("radio: transport accepted 0 bytes, status truncated");
                    break;
                }
                n => sent += n,
            }
        }
        self.transport.flush()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}
