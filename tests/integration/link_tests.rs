//! Radio link wired to the controller the way the control loop wires
//! them: bytes in, one status line out per cycle.

use std::collections::VecDeque;

use relaybank::app::service::RelayController;
use relaybank::bank::status::StatusLine;
use relaybank::config::RelayConfig;
use relaybank::protocol::link::RadioLink;
use relaybank::protocol::transport::Transport;

use crate::mock_hw::{MockRelays, RecordingSink};

/// Scripted radio: `rx` is what the far end sent, `tx` what we replied.
#[derive(Default)]
struct ScriptedRadio {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
}

impl Transport for ScriptedRadio {
    type Error = ();

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
        let n = buf.len().min(self.rx.len());
        for (slot, byte) in buf.iter_mut().zip(self.rx.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, ()> {
        self.tx.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), ()> {
        Ok(())
    }

    fn available(&self) -> bool {
        !self.rx.is_empty()
    }
}

struct Station {
    ctrl: RelayController<8>,
    hw: MockRelays,
    sink: RecordingSink,
}

impl Station {
    fn new() -> Self {
        let mut s = Self {
            ctrl: RelayController::new(RelayConfig::default()).unwrap(),
            hw: MockRelays::new(8),
            sink: RecordingSink::new(),
        };
        s.ctrl.start(0, &mut s.hw, &mut s.sink);
        s
    }

    /// One control cycle: sweep, drain the radio, reply once.
    fn cycle(&mut self, link: &mut RadioLink<ScriptedRadio>, now: u64) {
        self.ctrl.tick(now, &mut self.hw, &mut self.sink);
        let mut report: Option<StatusLine> = None;
        link.poll(|msg| {
            if let Ok(reply) = self.ctrl.handle_message(msg, now, &mut self.hw, &mut self.sink) {
                report = Some(reply.status().clone());
            }
        });
        if let Some(status) = report {
            link.send_status(&status).unwrap();
        }
    }
}

fn replies(link: &RadioLink<ScriptedRadio>) -> String {
    String::from_utf8(link.transport().tx.clone()).unwrap()
}

#[test]
fn one_reply_reflects_every_message_in_the_cycle() {
    let mut station = Station::new();
    let mut radio = ScriptedRadio::default();
    radio.rx.extend(b"S.0.1.1000.\nS.7.1.1000.\nG.\n");
    let mut link = RadioLink::new(radio);

    station.cycle(&mut link, 0);
    assert_eq!(replies(&link), "10000001\n");
}

#[test]
fn rejected_messages_get_no_reply() {
    let mut station = Station::new();
    let mut radio = ScriptedRadio::default();
    radio.rx.extend(b"S.9.1.10.\nhello\n");
    let mut link = RadioLink::new(radio);

    station.cycle(&mut link, 0);
    assert!(replies(&link).is_empty());
    assert_eq!(station.sink.rejections(), 2);
}

#[test]
fn crlf_sender_is_understood() {
    let mut station = Station::new();
    let mut radio = ScriptedRadio::default();
    radio.rx.extend(b"S.2.1.500.\r\n");
    let mut link = RadioLink::new(radio);

    station.cycle(&mut link, 0);
    assert_eq!(replies(&link), "00100000\n");
    assert!(station.hw.is_on(2));
}

#[test]
fn auto_off_happens_without_radio_traffic() {
    let mut station = Station::new();
    let mut radio = ScriptedRadio::default();
    radio.rx.extend(b"S.5.1.100.\n");
    let mut link = RadioLink::new(radio);

    station.cycle(&mut link, 0);
    station.cycle(&mut link, 50);
    assert!(station.hw.is_on(5));
    station.cycle(&mut link, 100);
    assert!(!station.hw.is_on(5));

    // Only the reply to the command itself went out.
    assert_eq!(replies(&link), "00000100\n");
}
