//! GPIO switch gamepad firmware for RP2040.
//!
//! This crate provides the embedded implementation of a gamepad that reads
//! its buttons straight from GPIO lines and reports them as USB HID.
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Samples 17 active-low switches every millisecond
//! 2. Diffs each sample against the last reported state
//! 3. Sends a USB HID gamepad report only when something changed
//!
//! # Hardware Configuration
//!
//! Switch wiring depends on the board revision, see
//! [`pad_core::REV1_PIN_MAP`] and [`pad_core::REV2_PIN_MAP`].
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | LED      | 25   | On-board LED (lit in left-stick mode) |
//!
//! Holding the mode-select button (L3 on both revisions) while plugging the
//! controller in reports the d-pad as the left analog stick until the next
//! power cycle.
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime with three concurrent tasks:
//!
//! - **USB Task**: Manages the USB device stack
//! - **Poll Task**: Ticks the [`Controller`](pad_core::Controller), which
//!   samples the switches and signals a report when anything changed
//! - **Output Task**: Receives report signals and writes them to the HID endpoint
//!
//! Communication between tasks uses Embassy's [`Signal`](embassy_sync::signal::Signal)
//! with "latest value wins" semantics, ensuring the USB output always reflects
//! the most recent report.
//!
//! # Modules
//!
//! - [`gpio_input`]: GPIO-backed input lines ([`GpioLines`])
//! - [`usb_output`]: USB HID output ([`UsbHidOutput`], [`SignalSink`])
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//! - **`standard-hid`** (default): Standard HID gamepad descriptor (cross-platform)
//! - **`xinput-compat`**: Xbox-style HID descriptor (better Windows game support)
//! - **`board-rev2`** (default): Pin map of the routed PCB
//! - **`board-rev1`**: Pin map of the hand-wired prototype
//!
//! # Re-exports
//!
//! This crate re-exports the public items of [`pad_core`] it builds on,
//! so consumers only need to depend on this crate.

#![no_std]

// Ensure mutually exclusive HID descriptor features
#[cfg(all(feature = "standard-hid", feature = "xinput-compat"))]
compile_error!("Cannot enable both `standard-hid` and `xinput-compat` features - they define conflicting HID descriptors");

// Ensure mutually exclusive board revisions
#[cfg(all(feature = "board-rev1", feature = "board-rev2"))]
compile_error!("Cannot enable both `board-rev1` and `board-rev2` features - pick the board being flashed");

pub use pad_core::{
    BoardRevision, ButtonId, Controller, GamepadReport, HidTransport, Input, InputSnapshot,
    OperatingMode, PinMap, PinMapError, PinSampler,
};

pub mod gpio_input;
pub mod usb_output;

pub use gpio_input::{GpioLines, PinBank};
pub use usb_output::{
    configure_usb_hid, GamepadWriter, OutputError, ReportSignal, SignalSink, UsbHidOutput,
    REPORT_DESCRIPTOR,
};

/// Board revision this image is built for.
#[cfg(feature = "board-rev1")]
pub const BOARD_REVISION: BoardRevision = BoardRevision::Rev1;

/// Board revision this image is built for.
#[cfg(not(feature = "board-rev1"))]
pub const BOARD_REVISION: BoardRevision = BoardRevision::Rev2;

/// Interval between switch samples, matching the HID polling interval.
pub const POLL_INTERVAL_MS: u64 = 1;

/// The controller as wired on this firmware.
pub type PadController = Controller<GpioLines<'static>, HidTransport<SignalSink>>;
