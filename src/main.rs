//! RelayBank Firmware — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  RelayBoard     LogEventSink    MonotonicClock    UartRadio    │
//! │  (RelayPort)    (EventSink)     (ClockPort)       (Transport)  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              RelayController (pure logic)              │    │
//! │  │  Parser · RelayBank · Timers · Status                  │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every object is created here and owned by `main`; nothing lives in a
//! static.
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, AnyInputPin, AnyOutputPin, Output, PinDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::uart::{UartDriver, config::Config as UartConfig};
use esp_idf_hal::units::Hertz;
use log::{info, warn};

use relaybank::adapters::hardware::RelayBoard;
use relaybank::adapters::log_sink::LogEventSink;
use relaybank::adapters::time::MonotonicClock;
use relaybank::adapters::uart_radio::UartRadio;
use relaybank::app::events::AppEvent;
use relaybank::app::ports::{ClockPort, EventSink};
use relaybank::app::service::RelayController;
use relaybank::bank::status::StatusLine;
use relaybank::config::RelayConfig;
use relaybank::drivers::relay::Polarity;
use relaybank::error::Error;
use relaybank::pins::{self, RELAY_COUNT};
use relaybank::protocol::link::RadioLink;

type RelayPin = PinDriver<'static, AnyOutputPin, Output>;

/// Build-time JSON override (`RELAYBANK_CONFIG='{"max_on_duration_ms":600000}'`),
/// falling back to defaults.
fn load_config() -> RelayConfig {
    let Some(json) = option_env!("RELAYBANK_CONFIG") else {
        return RelayConfig::default();
    };
    match RelayConfig::from_json(json) {
        Ok(cfg) => {
            info!("Config loaded from build-time override");
            cfg
        }
        Err(e) => {
            warn!("Config override rejected ({}), using defaults", e);
            RelayConfig::default()
        }
    }
}

fn relay_pins() -> Result<[RelayPin; RELAY_COUNT]> {
    let mut drivers = Vec::with_capacity(RELAY_COUNT);
    for gpio in pins::RELAY_GPIOS {
        // SAFETY: every GPIO in RELAY_GPIOS is listed once and claimed by
        // no other driver.
        let pin = unsafe { AnyOutputPin::new(gpio) };
        drivers.push(PinDriver::output(pin)?);
    }
    drivers
        .try_into()
        .map_err(|_| Error::Init("relay pin table does not match RELAY_COUNT").into())
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("RelayBank v{} ({} relays)", env!("CARGO_PKG_VERSION"), RELAY_COUNT);

    let config = load_config();
    let peripherals = Peripherals::take()?;

    // ── 2. Adapters ───────────────────────────────────────────
    // Each driver releases its coil as it is built, before the UART comes up.
    let mut board = RelayBoard::new(
        relay_pins()?,
        Polarity::from_active_low(config.relay_active_low),
    );

    // SAFETY: the radio GPIOs are dedicated to UART1.
    let (tx, rx) = unsafe {
        (
            AnyOutputPin::new(pins::RADIO_UART_TX_GPIO),
            AnyInputPin::new(pins::RADIO_UART_RX_GPIO),
        )
    };
    let uart = UartDriver::new(
        peripherals.uart1,
        tx,
        rx,
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &UartConfig::new().baudrate(Hertz(config.uart_baud)),
    )?;
    let mut link = RadioLink::new(UartRadio::new(uart));

    let clock = MonotonicClock::new();
    let mut sink = LogEventSink::new();

    // ── 3. Controller ─────────────────────────────────────────
    let mut controller = RelayController::<RELAY_COUNT>::new(config.clone()).map_err(Error::from)?;
    controller.start(clock.now_ms(), &mut board, &mut sink);

    info!("System ready. Entering control loop.");

    // ── 4. Control loop ───────────────────────────────────────
    let loop_ms = u64::from(config.control_loop_interval_ms);
    let telemetry_ms = u64::from(config.telemetry_interval_secs) * 1000;
    let mut last_telemetry = clock.now_ms();

    loop {
        let now = clock.now_ms();

        // Expire overdue relays before looking at new commands, so the
        // status we send back reflects this cycle's sweep.
        controller.tick(now, &mut board, &mut sink);

        let mut report: Option<StatusLine> = None;
        link.poll(|msg| {
            if let Ok(reply) = controller.handle_message(msg, now, &mut board, &mut sink) {
                report = Some(reply.status().clone());
            }
        });

        // One reply per cycle carries the state after every message in it.
        if let Some(status) = report {
            if let Err(e) = link.send_status(&status) {
                warn!("radio: status send failed: {:?}", e);
            }
        }

        if now.wrapping_sub(last_telemetry) >= telemetry_ms {
            sink.emit(&AppEvent::Telemetry(controller.telemetry(now)));
            if board.write_failures() > 0 {
                warn!("relay board: {} failed pin writes since boot", board.write_failures());
            }
            last_telemetry = now;
        }

        // Never idle past the nearest auto-off.
        let idle = controller
            .next_deadline(now)
            .map_or(loop_ms, |d| d.min(loop_ms))
            .max(1);
        FreeRtos::delay_ms(idle as u32);
    }
}
