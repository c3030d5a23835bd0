//! End-to-end controller scenarios: radio text in, pin writes and status
//! lines out.

use relaybank::app::events::{AppEvent, SwitchCause};
use relaybank::app::service::{RelayController, Reply};
use relaybank::bank::Transition;
use relaybank::config::RelayConfig;
use relaybank::error::ParseError;

use crate::mock_hw::{MockRelays, RecordingSink};

const MAX_ON: u64 = 60_000;

struct Rig {
    ctrl: RelayController<8>,
    hw: MockRelays,
    sink: RecordingSink,
}

impl Rig {
    fn started_at(now: u64) -> Self {
        let config = RelayConfig {
            max_on_duration_ms: MAX_ON,
            ..RelayConfig::default()
        };
        let mut rig = Self {
            ctrl: RelayController::new(config).unwrap(),
            hw: MockRelays::new(8),
            sink: RecordingSink::new(),
        };
        rig.ctrl.start(now, &mut rig.hw, &mut rig.sink);
        rig.hw.clear();
        rig.sink.clear();
        rig
    }

    fn send(&mut self, msg: &str, now: u64) -> Result<Reply, ParseError> {
        self.ctrl.handle_message(msg, now, &mut self.hw, &mut self.sink)
    }

    fn tick(&mut self, now: u64) -> usize {
        self.ctrl.tick(now, &mut self.hw, &mut self.sink)
    }

    fn status(&self) -> String {
        self.ctrl.status().as_str().to_owned()
    }
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn start_drives_every_relay_off() {
    let mut ctrl = RelayController::<8>::new(RelayConfig::default()).unwrap();
    let mut hw = MockRelays::new(8);
    let mut sink = RecordingSink::new();
    ctrl.start(0, &mut hw, &mut sink);

    assert_eq!(hw.writes, (0..8).map(|i| (i, false)).collect::<Vec<_>>());
    assert_eq!(sink.events, [AppEvent::Started { relay_count: 8 }]);
    assert_eq!(ctrl.status(), "00000000");
}

#[test]
fn invalid_config_is_refused() {
    let config = RelayConfig {
        max_on_duration_ms: 0,
        ..RelayConfig::default()
    };
    assert!(RelayController::<8>::new(config).is_err());
}

// ── Status ────────────────────────────────────────────────────

#[test]
fn get_reports_status_without_side_effects() {
    let mut rig = Rig::started_at(0);
    let reply = rig.send("G.", 10).unwrap();

    assert_eq!(reply, Reply::Status("00000000".try_into().unwrap()));
    assert!(rig.hw.writes.is_empty());
}

#[test]
fn status_follows_a_single_relay() {
    let mut rig = Rig::started_at(0);
    assert_eq!(rig.status(), "00000000");

    rig.send("S.3.1.1000.", 0).unwrap();
    assert_eq!(rig.status(), "00010000");

    rig.send("S.3.0.", 10).unwrap();
    assert_eq!(rig.status(), "00000000");
}

#[test]
fn get_does_not_disturb_running_timers() {
    let mut rig = Rig::started_at(0);
    rig.send("S.1.1.1000.", 0).unwrap();
    let before = rig.status();

    for t in [100, 200, 300] {
        rig.send("G.", t).unwrap();
    }
    assert_eq!(rig.status(), before);
    assert_eq!(rig.ctrl.next_deadline(300), Some(700));
}

// ── Switching and auto-off ────────────────────────────────────

#[test]
fn on_then_auto_off_at_exact_duration() {
    let t = 12_345;
    let mut rig = Rig::started_at(t);

    let reply = rig.send("S.2.1.5000.", t).unwrap();
    assert_eq!(reply.status(), "00100000");
    assert_eq!(rig.hw.writes, [(2, true)]);

    assert_eq!(rig.tick(t + 4_999), 0);
    assert!(rig.hw.is_on(2));

    assert_eq!(rig.tick(t + 5_000), 1);
    assert!(!rig.hw.is_on(2));
    assert_eq!(rig.status(), "00000000");
    assert_eq!(rig.sink.expiries(), [2]);
}

#[test]
fn explicit_off_cancels_the_timer() {
    let mut rig = Rig::started_at(0);
    rig.send("S.4.1.1000.", 0).unwrap();
    rig.send("S.4.0.", 500).unwrap();
    rig.hw.clear();

    assert_eq!(rig.tick(5_000), 0);
    assert!(rig.hw.writes.is_empty());
    assert!(rig.sink.expiries().is_empty());
}

#[test]
fn relays_expire_independently() {
    let mut rig = Rig::started_at(0);
    rig.send("S.0.1.100.", 0).unwrap();
    rig.send("S.7.1.300.", 0).unwrap();

    assert_eq!(rig.tick(100), 1);
    assert_eq!(rig.status(), "00000001");
    assert_eq!(rig.ctrl.next_deadline(100), Some(200));

    assert_eq!(rig.tick(300), 1);
    assert_eq!(rig.status(), "00000000");
    assert_eq!(rig.ctrl.next_deadline(300), None);
    assert_eq!(rig.sink.expiries(), [0, 7]);
}

#[test]
fn late_sweep_still_turns_relay_off() {
    let mut rig = Rig::started_at(0);
    rig.send("S.5.1.200.", 0).unwrap();
    assert_eq!(rig.tick(10_000), 1);
    assert!(!rig.hw.is_on(5));
}

#[test]
fn timer_survives_clock_wraparound() {
    let t = u64::MAX - 100;
    let mut rig = Rig::started_at(t);
    rig.send("S.6.1.500.", t).unwrap();

    // 398 ms past the wrap is 499 ms after arming.
    assert_eq!(rig.tick(398), 0);
    assert!(rig.hw.is_on(6));
    assert_eq!(rig.tick(399), 1);
    assert!(!rig.hw.is_on(6));
}

// ── Clamping ──────────────────────────────────────────────────

#[test]
fn zero_duration_means_maximum() {
    let mut rig = Rig::started_at(0);
    rig.send("S.1.1.0.", 0).unwrap();

    assert_eq!(rig.ctrl.next_deadline(0), Some(MAX_ON));
    assert_eq!(rig.tick(MAX_ON - 1), 0);
    assert_eq!(rig.tick(MAX_ON), 1);
}

#[test]
fn oversized_duration_is_clamped() {
    let mut rig = Rig::started_at(0);
    rig.send("S.1.1.99999999999999999999999.", 0).unwrap();
    assert_eq!(rig.ctrl.next_deadline(0), Some(MAX_ON));

    match rig.sink.events.first() {
        Some(AppEvent::RelaySwitched { duration_ms, .. }) => assert_eq!(*duration_ms, Some(MAX_ON)),
        other => panic!("expected a switch event, got {other:?}"),
    }
}

// ── Debounce ──────────────────────────────────────────────────

#[test]
fn repeated_on_writes_the_pin_once() {
    let mut rig = Rig::started_at(0);
    for t in [0, 50, 100] {
        rig.send("S.2.1.1000.", t).unwrap();
    }
    assert_eq!(rig.hw.writes_to(2), 1);

    // The first command's timer is still the one running.
    assert_eq!(rig.tick(1_000), 1);
}

#[test]
fn repeated_off_is_silent() {
    let mut rig = Rig::started_at(0);
    let reply = rig.send("S.2.0.", 0).unwrap();

    assert!(matches!(
        reply,
        Reply::Relay {
            transition: Transition::Unchanged,
            ..
        }
    ));
    assert!(rig.hw.writes.is_empty());
    assert!(rig
        .sink
        .events
        .contains(&AppEvent::CommandDebounced { index: 2 }));
}

#[test]
fn new_duration_rearms_from_now() {
    let mut rig = Rig::started_at(0);
    rig.send("S.3.1.500.", 0).unwrap();
    rig.send("S.3.1.300.", 200).unwrap();

    assert_eq!(rig.hw.writes_to(3), 2);
    assert_eq!(rig.tick(499), 0);
    assert!(rig.hw.is_on(3));
    assert_eq!(rig.tick(500), 1);
    assert!(!rig.hw.is_on(3));
}

// ── Rejection ─────────────────────────────────────────────────

#[test]
fn out_of_range_index_changes_nothing() {
    let mut rig = Rig::started_at(0);
    rig.send("S.1.1.1000.", 0).unwrap();
    rig.hw.clear();
    let before = rig.status();

    assert_eq!(rig.send("S.8.1.1000.", 10), Err(ParseError::IndexOutOfRange));
    assert_eq!(rig.send("S.8.0.", 10), Err(ParseError::IndexOutOfRange));

    assert!(rig.hw.writes.is_empty());
    assert_eq!(rig.status(), before);
    assert_eq!(rig.sink.rejections(), 2);
}

#[test]
fn garbage_is_rejected_and_controller_keeps_going() {
    let mut rig = Rig::started_at(0);
    for msg in ["", "X.", "S.", "S.1", "S.1.2.", "S.a.1.10.", "S.1.1.", "S.1.1.1x."] {
        assert!(rig.send(msg, 0).is_err(), "{msg:?} should be rejected");
    }
    assert!(rig.hw.writes.is_empty());

    rig.send("S.0.1.10.", 0).unwrap();
    assert_eq!(rig.status(), "10000000");
}

// ── Observability ─────────────────────────────────────────────

#[test]
fn every_accepted_message_reports_status() {
    let mut rig = Rig::started_at(0);
    rig.send("S.1.1.100.", 0).unwrap();
    rig.send("G.", 1).unwrap();

    let reports: Vec<_> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::StatusReported(s) => Some(s.as_str().to_owned()),
            _ => None,
        })
        .collect();
    assert_eq!(reports, ["01000000", "01000000"]);
}

#[test]
fn command_switch_is_reported_with_cause() {
    let mut rig = Rig::started_at(0);
    rig.send("S.4.1.250.", 0).unwrap();
    assert_eq!(
        rig.sink.events[0],
        AppEvent::RelaySwitched {
            index: 4,
            on: true,
            duration_ms: Some(250),
            cause: SwitchCause::Command,
        }
    );
}

#[test]
fn telemetry_snapshot() {
    let mut rig = Rig::started_at(1_000);
    rig.send("S.0.1.400.", 1_000).unwrap();
    rig.send("S.1.1.900.", 1_000).unwrap();

    let t = rig.ctrl.telemetry(1_100);
    assert_eq!(t.status, "11000000");
    assert_eq!(t.on_count, 2);
    assert_eq!(t.next_deadline_ms, Some(300));
    assert_eq!(t.uptime_ms, 100);
}
