//! Platform-agnostic switch sampling and delta reporting for a GPIO gamepad.
//!
//! This crate provides the input-to-report core of the controller firmware
//! without any platform-specific dependencies. It can be used both in
//! embedded `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! The crate is organized into several modules:
//!
//! - [`types`]: Core data structures ([`InputSnapshot`], [`Input`], [`ButtonId`], [`OperatingMode`])
//! - [`pins`]: Input-to-line configuration ([`PinMap`], [`BoardRevision`])
//! - [`sampler`]: Reads the switch lines ([`PinSampler`], [`InputLines`])
//! - [`transport`]: Gamepad transport trait ([`GamepadTransport`])
//! - [`reporter`]: Diffs snapshots into transport updates ([`DeltaReporter`])
//! - [`controller`]: Owns the loop state ([`Controller`])
//! - [`report`]: HID report building transport ([`HidTransport`], [`GamepadReport`])
//!
//! # Per-tick flow
//!
//! ```text
//! PinSampler::sample ─► DeltaReporter::report_delta ─► GamepadTransport ─► flush
//!        current              (previous, current)         set_* calls
//! ```
//!
//! Nothing is sent on a tick where no input changed. When something changed,
//! only the changed fields are written to the transport, followed by exactly
//! one flush.
//!
//! # Example
//!
//! ```rust
//! use pad_core::{
//!     BoardRevision, Controller, GamepadReport, HidTransport, InputLines, PinSampler, ReportSink,
//! };
//!
//! struct Released;
//!
//! impl InputLines for Released {
//!     fn configure_pull_up(&mut self, _line: u8) {}
//!     fn is_low(&mut self, _line: u8) -> bool {
//!         false
//!     }
//! }
//!
//! struct Discard;
//!
//! impl ReportSink for Discard {
//!     fn submit(&mut self, _report: &GamepadReport) {}
//! }
//!
//! let sampler = PinSampler::new(Released, BoardRevision::Rev2.pin_map()).unwrap();
//! let mut controller = Controller::initialize(sampler, HidTransport::new(Discard));
//!
//! // Nothing pressed: nothing to report.
//! assert!(!controller.tick());
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod controller;
pub mod pins;
pub mod report;
pub mod reporter;
pub mod sampler;
pub mod transport;
pub mod types;

// Re-export main types at crate root
pub use controller::Controller;
pub use pins::{BoardRevision, PinMap, PinMapError, MAX_LINES, REV1_PIN_MAP, REV2_PIN_MAP};
pub use report::{
    diagonal_deflection, stick_from_directions, Buttons, GamepadReport, HidTransport, ReportSink,
    STICK_MAX, TRIGGER_PRESSED,
};
pub use reporter::{DeltaOutcome, DeltaReporter, CLEAN_OPPOSITES};
pub use sampler::{InputLines, PinSampler};
pub use transport::GamepadTransport;
pub use types::{ButtonId, Directions, Input, InputSnapshot, OperatingMode};
