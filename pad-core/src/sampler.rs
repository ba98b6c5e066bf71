//! Input line trait and the pin sampler.

use crate::pins::{PinMap, PinMapError, MAX_LINES};
use crate::types::{Input, InputSnapshot};

/// Access to the physical switch lines.
///
/// This trait abstracts the GPIO peripheral so the sampler can run against
/// real pins on the device and against recorded levels on the host.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait InputLines {
    /// Put the line into input mode with its internal pull-up enabled.
    fn configure_pull_up(&mut self, line: u8);

    /// Read the line's logic level. `true` means low.
    fn is_low(&mut self, line: u8) -> bool;

    /// Whether `line` can be wired to a switch on this board.
    fn has_line(&self, line: u8) -> bool {
        line < MAX_LINES
    }

    /// Wait for freshly configured pull-ups to charge the lines.
    ///
    /// Called once after configuration, before the first read.
    fn settle(&mut self) {}
}

/// Reads every mapped switch line into an [`InputSnapshot`].
///
/// Switches are wired active-low against the internal pull-up, so an input
/// is pressed when its line reads low. There is no debouncing: every call to
/// [`sample`](Self::sample) is a direct read of all lines.
pub struct PinSampler<L> {
    lines: L,
    map: PinMap,
}

impl<L: InputLines> PinSampler<L> {
    /// Create a sampler over the given lines using `map`.
    ///
    /// # Errors
    ///
    /// Returns [`PinMapError`] if the map is invalid or uses a line that
    /// `lines` does not have.
    pub fn new(lines: L, map: PinMap) -> Result<Self, PinMapError> {
        map.validate()?;
        if let Some((input, line)) = map.iter().find(|&(_, line)| !lines.has_line(line)) {
            return Err(PinMapError::LineUnavailable { input, line });
        }
        Ok(Self { lines, map })
    }

    /// Configure every mapped line as a pulled-up input and let the lines
    /// settle before returning.
    pub fn configure(&mut self) {
        for (_, line) in self.map.iter() {
            self.lines.configure_pull_up(line);
        }
        self.lines.settle();
    }

    /// Read the mode-select input once.
    #[must_use]
    pub fn mode_select_active(&mut self) -> bool {
        let line = self.map.mode_select_line();
        self.lines.is_low(line)
    }

    /// Read all inputs.
    #[must_use]
    pub fn sample(&mut self) -> InputSnapshot {
        InputSnapshot {
            dpad_up: self.read(Input::DpadUp),
            dpad_down: self.read(Input::DpadDown),
            dpad_left: self.read(Input::DpadLeft),
            dpad_right: self.read(Input::DpadRight),
            button_a: self.read(Input::A),
            button_b: self.read(Input::B),
            button_x: self.read(Input::X),
            button_y: self.read(Input::Y),
            button_lb: self.read(Input::LB),
            button_rb: self.read(Input::RB),
            trigger_left: self.read(Input::TriggerLeft),
            trigger_right: self.read(Input::TriggerRight),
            button_start: self.read(Input::Start),
            button_back: self.read(Input::Back),
            button_guide: self.read(Input::Guide),
            button_l3: self.read(Input::L3),
            button_r3: self.read(Input::R3),
        }
    }

    #[inline]
    fn read(&mut self, input: Input) -> bool {
        let line = self.map.line(input);
        self.lines.is_low(line)
    }

    /// Get the pin map in use.
    pub fn map(&self) -> &PinMap {
        &self.map
    }

    /// Get a reference to the input lines.
    pub fn lines(&self) -> &L {
        &self.lines
    }

    /// Get a mutable reference to the input lines.
    pub fn lines_mut(&mut self) -> &mut L {
        &mut self.lines
    }

    /// Decompose the sampler into its lines and pin map.
    pub fn into_parts(self) -> (L, PinMap) {
        (self.lines, self.map)
    }
}
