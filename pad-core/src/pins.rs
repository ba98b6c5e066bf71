//! Pin map configuration: which physical line each input is wired to.
//!
//! Each board revision routes the switches to different GPIO lines. A
//! [`PinMap`] is the table the sampler reads through; [`BoardRevision`]
//! names the tables shipped with the firmware.

use crate::types::Input;

/// Number of addressable input lines (RP2040 GPIO bank 0).
pub const MAX_LINES: u8 = 30;

/// Error type for pin map validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMapError {
    /// Two inputs are mapped to the same line.
    DuplicateLine { line: u8, first: Input, second: Input },
    /// An input is mapped to a line that does not exist.
    LineOutOfRange { input: Input, line: u8 },
    /// An input is mapped to a line the board does not expose for switches.
    LineUnavailable { input: Input, line: u8 },
}

/// Mapping of every [`Input`] to a physical line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMap {
    lines: [u8; Input::COUNT],
    /// Input sampled once at boot to pick the operating mode.
    pub mode_select: Input,
}

impl PinMap {
    /// Create a pin map from a line table indexed in [`Input::ALL`] order.
    #[must_use]
    pub const fn new(lines: [u8; Input::COUNT], mode_select: Input) -> Self {
        Self { lines, mode_select }
    }

    /// Line number the given input is wired to.
    #[inline]
    #[must_use]
    pub const fn line(&self, input: Input) -> u8 {
        self.lines[input.index()]
    }

    /// Return a copy with one input moved to a different line.
    #[must_use]
    pub const fn with_line(mut self, input: Input, line: u8) -> Self {
        self.lines[input.index()] = line;
        self
    }

    /// Return a copy with a different mode-select input.
    #[must_use]
    pub const fn with_mode_select(mut self, input: Input) -> Self {
        self.mode_select = input;
        self
    }

    /// Line the mode-select input is wired to.
    #[inline]
    #[must_use]
    pub const fn mode_select_line(&self) -> u8 {
        self.line(self.mode_select)
    }

    /// Iterate over `(input, line)` pairs in [`Input::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Input, u8)> + '_ {
        Input::ALL
            .into_iter()
            .map(move |input| (input, self.line(input)))
    }

    /// Check that every line exists and no line is shared.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, scanning in [`Input::ALL`] order.
    pub fn validate(&self) -> Result<(), PinMapError> {
        let mut owner: [Option<Input>; MAX_LINES as usize] = [None; MAX_LINES as usize];

        for (input, line) in self.iter() {
            if line >= MAX_LINES {
                return Err(PinMapError::LineOutOfRange { input, line });
            }
            let slot = &mut owner[line as usize];
            if let Some(first) = *slot {
                return Err(PinMapError::DuplicateLine {
                    line,
                    first,
                    second: input,
                });
            }
            *slot = Some(input);
        }

        Ok(())
    }
}

/// Board revisions with a known switch wiring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardRevision {
    /// First hand-wired prototype on a Pico.
    Rev1,
    /// Routed PCB.
    #[default]
    Rev2,
}

/// Rev1 wiring. Holding L3 at power-up selects left-stick mode.
pub const REV1_PIN_MAP: PinMap = PinMap::new(
    [
        2,  // DpadUp
        3,  // DpadDown
        4,  // DpadLeft
        5,  // DpadRight
        6,  // A
        7,  // B
        8,  // X
        9,  // Y
        10, // LB
        11, // RB
        12, // TriggerLeft
        13, // TriggerRight
        14, // Start
        15, // Back
        16, // Guide
        17, // L3
        18, // R3
    ],
    Input::L3,
);

/// Rev2 wiring. Holding L3 at power-up selects left-stick mode.
pub const REV2_PIN_MAP: PinMap = PinMap::new(
    [
        19, // DpadUp
        18, // DpadDown
        20, // DpadLeft
        21, // DpadRight
        2,  // A
        3,  // B
        4,  // X
        5,  // Y
        6,  // LB
        7,  // RB
        8,  // TriggerLeft
        9,  // TriggerRight
        10, // Start
        11, // Back
        12, // Guide
        13, // L3
        14, // R3
    ],
    Input::L3,
);

impl BoardRevision {
    /// Pin map for this revision.
    #[must_use]
    pub const fn pin_map(self) -> PinMap {
        match self {
            BoardRevision::Rev1 => REV1_PIN_MAP,
            BoardRevision::Rev2 => REV2_PIN_MAP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_maps_are_valid() {
        assert_eq!(BoardRevision::Rev1.pin_map().validate(), Ok(()));
        assert_eq!(BoardRevision::Rev2.pin_map().validate(), Ok(()));
    }

    #[test]
    fn test_line_lookup() {
        let map = BoardRevision::Rev1.pin_map();
        assert_eq!(map.line(Input::DpadUp), 2);
        assert_eq!(map.line(Input::R3), 18);
        assert_eq!(map.mode_select_line(), 17);
    }

    #[test]
    fn test_duplicate_line_rejected() {
        let map = REV1_PIN_MAP.with_line(Input::R3, 2);
        assert_eq!(
            map.validate(),
            Err(PinMapError::DuplicateLine {
                line: 2,
                first: Input::DpadUp,
                second: Input::R3,
            })
        );
    }

    #[test]
    fn test_out_of_range_line_rejected() {
        let map = REV2_PIN_MAP.with_line(Input::Guide, MAX_LINES);
        assert_eq!(
            map.validate(),
            Err(PinMapError::LineOutOfRange {
                input: Input::Guide,
                line: MAX_LINES,
            })
        );
    }

    #[test]
    fn test_with_mode_select() {
        let map = REV2_PIN_MAP.with_mode_select(Input::Start);
        assert_eq!(map.mode_select_line(), 10);
    }

    #[test]
    fn test_iter_covers_every_input() {
        assert_eq!(REV2_PIN_MAP.iter().count(), Input::COUNT);
    }
}
