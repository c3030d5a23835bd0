//! Fuzz target: `parse_message`
//!
//! Any UTF-8 input must either be rejected or decode to a command whose
//! index is below the relay count and whose duration is within
//! `1..=max_on`.
//!
//! cargo fuzz run fuzz_parse_message

#![no_main]

use libfuzzer_sys::fuzz_target;
use relaybank::app::commands::{Command, RelayAction};
use relaybank::protocol::parser::parse_message;

const N: usize = 8;
const MAX_ON: u64 = 3_600_000;

fuzz_target!(|data: &[u8]| {
    let Ok(msg) = core::str::from_utf8(data) else {
        return;
    };

    if let Ok(Command::SetRelay { index, action }) = parse_message::<N>(msg, MAX_ON) {
        assert!(index.get() < N, "index escaped the bank");
        if let RelayAction::On(d) = action {
            assert!((1..=MAX_ON).contains(&d.as_millis()), "duration not clamped");
        }
    }
});
