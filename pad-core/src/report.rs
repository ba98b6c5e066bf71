//! HID gamepad report and a buffering transport that builds it.
//!
//! [`HidTransport`] implements [`GamepadTransport`] by mutating one buffered
//! [`GamepadReport`] and handing it to a [`ReportSink`] on flush (or on every
//! mutation when auto-send is enabled). The report layout matches the
//! firmware's HID report descriptor.

use core::ops::{BitAnd, BitOr, BitOrAssign};

use fixed::types::I16F16;
use fixed_macro::fixed;

use crate::transport::GamepadTransport;
use crate::types::{ButtonId, Directions};

/// Button state represented as a bitfield for efficiency.
///
/// # Example
///
/// ```
/// use pad_core::Buttons;
///
/// let buttons = Buttons::A | Buttons::DPAD_UP;
/// assert!(buttons.contains(Buttons::A));
/// assert!(!buttons.contains(Buttons::B));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(pub u16);

impl Buttons {
    pub const A: Self = Self(1 << 0);
    pub const B: Self = Self(1 << 1);
    pub const X: Self = Self(1 << 2);
    pub const Y: Self = Self(1 << 3);
    pub const LB: Self = Self(1 << 4); // Left bumper
    pub const RB: Self = Self(1 << 5); // Right bumper
    pub const BACK: Self = Self(1 << 6);
    pub const START: Self = Self(1 << 7);
    pub const GUIDE: Self = Self(1 << 8);
    pub const LS: Self = Self(1 << 9); // Left stick press
    pub const RS: Self = Self(1 << 10); // Right stick press
    pub const DPAD_UP: Self = Self(1 << 11);
    pub const DPAD_DOWN: Self = Self(1 << 12);
    pub const DPAD_LEFT: Self = Self(1 << 13);
    pub const DPAD_RIGHT: Self = Self(1 << 14);

    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// All four d-pad bits.
    pub const DPAD: Self =
        Self(Self::DPAD_UP.0 | Self::DPAD_DOWN.0 | Self::DPAD_LEFT.0 | Self::DPAD_RIGHT.0);

    /// Check if the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, button: Buttons) -> bool {
        (self.0 & button.0) == button.0
    }

    /// Set or clear button(s).
    #[inline]
    pub fn set(&mut self, button: Buttons, pressed: bool) {
        if pressed {
            self.0 |= button.0;
        } else {
            self.0 &= !button.0;
        }
    }

    /// Get the raw u16 value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Check if no buttons are pressed.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Bit for a transport button id. Triggers have no bit; they drive the
    /// trigger axes instead.
    #[must_use]
    pub const fn for_id(id: ButtonId) -> Option<Self> {
        match id {
            ButtonId::Start => Some(Self::START),
            ButtonId::Back => Some(Self::BACK),
            ButtonId::Guide => Some(Self::GUIDE),
            ButtonId::A => Some(Self::A),
            ButtonId::B => Some(Self::B),
            ButtonId::X => Some(Self::X),
            ButtonId::Y => Some(Self::Y),
            ButtonId::LB => Some(Self::LB),
            ButtonId::RB => Some(Self::RB),
            ButtonId::L3 => Some(Self::LS),
            ButtonId::R3 => Some(Self::RS),
            ButtonId::TriggerLeft | ButtonId::TriggerRight => None,
        }
    }
}

impl BitOr for Buttons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Buttons {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

/// Full stick deflection on one axis.
pub const STICK_MAX: i8 = 127;

/// Trigger value reported for a pressed trigger button.
pub const TRIGGER_PRESSED: u8 = u8::MAX;

/// 1/√2, scales a diagonal so its magnitude matches a cardinal deflection.
const DIAGONAL_SCALE: I16F16 = fixed!(0.70710678: I16F16);

/// Per-axis deflection for a diagonal: round(127 / √2) = 90.
#[must_use]
pub fn diagonal_deflection() -> i8 {
    (I16F16::from_num(STICK_MAX) * DIAGONAL_SCALE)
        .round()
        .to_num::<i8>()
}

/// Convert four directions into a left-stick position.
///
/// Opposite directions must already be resolved. HID Y grows downward, so
/// up is negative.
#[must_use]
pub fn stick_from_directions(directions: Directions) -> (i8, i8) {
    let x: i8 = match (directions.left, directions.right) {
        (true, false) => -1,
        (false, true) => 1,
        _ => 0,
    };
    let y: i8 = match (directions.up, directions.down) {
        (true, false) => -1,
        (false, true) => 1,
        _ => 0,
    };

    let magnitude = if x != 0 && y != 0 {
        diagonal_deflection()
    } else {
        STICK_MAX
    };

    (x * magnitude, y * magnitude)
}

/// USB HID Gamepad report structure.
///
/// Total size: 8 bytes (buttons: 2, sticks: 4x1, triggers: 2x1).
/// The right stick is never driven by this controller and stays centered.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct GamepadReport {
    /// Button bitfield (16 buttons)
    pub buttons: Buttons,
    /// Left stick X (-127 to 127)
    pub left_stick_x: i8,
    /// Left stick Y (-127 to 127)
    pub left_stick_y: i8,
    /// Right stick X (-127 to 127)
    pub right_stick_x: i8,
    /// Right stick Y (-127 to 127)
    pub right_stick_y: i8,
    /// Left trigger (0-255)
    pub left_trigger: u8,
    /// Right trigger (0-255)
    pub right_trigger: u8,
}

impl GamepadReport {
    /// Size of the report in bytes.
    pub const SIZE: usize = 8;

    /// Neutral/zero report.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            buttons: Buttons::NONE,
            left_stick_x: 0,
            left_stick_y: 0,
            right_stick_x: 0,
            right_stick_y: 0,
            left_trigger: 0,
            right_trigger: 0,
        }
    }

    /// Convert the report to bytes.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        let buttons_bytes = self.buttons.raw().to_le_bytes();
        [
            buttons_bytes[0],
            buttons_bytes[1],
            self.left_stick_x as u8,
            self.left_stick_y as u8,
            self.right_stick_x as u8,
            self.right_stick_y as u8,
            self.left_trigger,
            self.right_trigger,
        ]
    }
}

/// Destination for finished reports.
pub trait ReportSink {
    /// Hand over a report for transmission. Must not block.
    fn submit(&mut self, report: &GamepadReport);
}

/// Transport that buffers a [`GamepadReport`] and submits it to a sink.
pub struct HidTransport<S> {
    sink: S,
    report: GamepadReport,
    auto_send: bool,
}

impl<S: ReportSink> HidTransport<S> {
    /// Create a transport with a neutral report and auto-send enabled.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            report: GamepadReport::neutral(),
            auto_send: true,
        }
    }

    /// The buffered report.
    #[inline]
    #[must_use]
    pub fn report(&self) -> &GamepadReport {
        &self.report
    }

    /// Whether every mutation is sent immediately.
    #[inline]
    #[must_use]
    pub fn auto_send(&self) -> bool {
        self.auto_send
    }

    /// Get a reference to the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get a mutable reference to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn changed(&mut self) {
        if self.auto_send {
            self.sink.submit(&self.report);
        }
    }
}

impl<S: ReportSink> GamepadTransport for HidTransport<S> {
    fn configure(&mut self, auto_send: bool) {
        self.auto_send = auto_send;
    }

    fn set_directional_pad(&mut self, directions: Directions, clean_opposites: bool) {
        let directions = if clean_opposites {
            directions.cleaned()
        } else {
            directions
        };

        let buttons = &mut self.report.buttons;
        buttons.set(Buttons::DPAD_UP, directions.up);
        buttons.set(Buttons::DPAD_DOWN, directions.down);
        buttons.set(Buttons::DPAD_LEFT, directions.left);
        buttons.set(Buttons::DPAD_RIGHT, directions.right);
        self.changed();
    }

    fn set_left_stick(&mut self, directions: Directions, clean_opposites: bool) {
        let directions = if clean_opposites {
            directions.cleaned()
        } else {
            directions.cancelled()
        };

        let (x, y) = stick_from_directions(directions);
        self.report.left_stick_x = x;
        self.report.left_stick_y = y;
        self.changed();
    }

    fn set_button(&mut self, button: ButtonId, pressed: bool) {
        let trigger = if pressed { TRIGGER_PRESSED } else { 0 };
        match button {
            ButtonId::TriggerLeft => self.report.left_trigger = trigger,
            ButtonId::TriggerRight => self.report.right_trigger = trigger,
            _ => {
                if let Some(bit) = Buttons::for_id(button) {
                    self.report.buttons.set(bit, pressed);
                }
            }
        }
        self.changed();
    }

    fn flush(&mut self) {
        self.sink.submit(&self.report);
    }
}
