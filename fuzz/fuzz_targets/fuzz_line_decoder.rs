//! Fuzz target: `LineDecoder::feed` into `RelayController`
//!
//! Drives arbitrary bytes through the line decoder and every resulting
//! message through the controller.  Neither may panic, and the status
//! line must always be one symbol per relay.
//!
//! cargo fuzz run fuzz_line_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use relaybank::app::events::AppEvent;
use relaybank::app::ports::{EventSink, RelayPort};
use relaybank::app::service::RelayController;
use relaybank::config::RelayConfig;
use relaybank::protocol::codec::{LineDecoder, MAX_MESSAGE_LEN};

struct NoPins;
impl RelayPort for NoPins {
    fn write_relay(&mut self, index: usize, _on: bool) {
        assert!(index < 8, "write to a relay that does not exist");
    }
}

struct NoSink;
impl EventSink for NoSink {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let Ok(mut ctrl) = RelayController::<8>::new(RelayConfig::default()) else {
        return;
    };
    let mut decoder = LineDecoder::new();
    let mut now = 0u64;

    for msg in decoder.feed(data) {
        assert!(msg.len() <= MAX_MESSAGE_LEN);
        let _ = ctrl.handle_message(&msg, now, &mut NoPins, &mut NoSink);
        ctrl.tick(now, &mut NoPins, &mut NoSink);
        now = now.wrapping_add(u64::from(msg.as_bytes()[0]) * 100);
    }
    assert_eq!(ctrl.status().len(), 8);

    if let Some(msg) = decoder.flush() {
        let _ = ctrl.handle_message(&msg, now, &mut NoPins, &mut NoSink);
    }
});
