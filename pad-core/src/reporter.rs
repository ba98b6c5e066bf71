//! Delta reporter: turns the difference between two snapshots into targeted
//! transport updates and a single flush.

use crate::transport::GamepadTransport;
use crate::types::{ButtonId, InputSnapshot, OperatingMode};

/// Opposite-direction cleaning flag passed with every directional update.
pub const CLEAN_OPPOSITES: bool = true;

/// Result of one [`DeltaReporter::report_delta`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub struct DeltaOutcome {
    /// Baseline to diff the next snapshot against.
    pub previous: InputSnapshot,
    /// Whether any update was issued and the report flushed.
    pub flushed: bool,
}

/// Converts snapshot differences into minimal transport traffic.
///
/// The operating mode is fixed when the reporter is built, so only one kind
/// of directional update is ever issued for the lifetime of a reporter.
pub struct DeltaReporter<T> {
    transport: T,
    mode: OperatingMode,
}

impl<T: GamepadTransport> DeltaReporter<T> {
    /// Create a reporter writing into `transport` under `mode`.
    pub fn new(transport: T, mode: OperatingMode) -> Self {
        Self { transport, mode }
    }

    /// Issue updates for every field that changed and flush once.
    ///
    /// A quiescent tick (`current == previous`) issues nothing and returns
    /// `previous` unchanged. Otherwise at most one directional update is
    /// issued, then one button update per changed button in [`ButtonId::ALL`]
    /// order, then a single flush; the returned baseline is `current`.
    pub fn report_delta(
        &mut self,
        previous: &InputSnapshot,
        current: &InputSnapshot,
    ) -> DeltaOutcome {
        if current == previous {
            return DeltaOutcome {
                previous: *previous,
                flushed: false,
            };
        }

        let directions = current.directions();
        if directions != previous.directions() {
            match self.mode {
                OperatingMode::LeftStick => {
                    self.transport.set_left_stick(directions, CLEAN_OPPOSITES)
                }
                OperatingMode::DirectionalPad => {
                    self.transport.set_directional_pad(directions, CLEAN_OPPOSITES)
                }
            }
        }

        for button in ButtonId::ALL {
            let pressed = current.button(button);
            if pressed != previous.button(button) {
                self.transport.set_button(button, pressed);
            }
        }

        self.transport.flush();

        DeltaOutcome {
            previous: *current,
            flushed: true,
        }
    }

    /// The operating mode this reporter was built with.
    #[inline]
    #[must_use]
    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// Get a reference to the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get a mutable reference to the transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Decompose the reporter into its transport.
    pub fn into_transport(self) -> T {
        self.transport
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::transport::tests::{Call, RecordingTransport};
    use crate::types::{Directions, Input};
    use std::vec;
    use std::vec::Vec;

    fn reporter(mode: OperatingMode) -> DeltaReporter<RecordingTransport> {
        DeltaReporter::new(RecordingTransport::new(), mode)
    }

    /// Snapshot with only the listed buttons pressed.
    fn with_buttons(buttons: &[ButtonId]) -> InputSnapshot {
        let mut snapshot = InputSnapshot::released();
        for button in buttons {
            match button {
                ButtonId::Start => snapshot.button_start = true,
                ButtonId::Back => snapshot.button_back = true,
                ButtonId::Guide => snapshot.button_guide = true,
                ButtonId::A => snapshot.button_a = true,
                ButtonId::B => snapshot.button_b = true,
                ButtonId::X => snapshot.button_x = true,
                ButtonId::Y => snapshot.button_y = true,
                ButtonId::LB => snapshot.button_lb = true,
                ButtonId::RB => snapshot.button_rb = true,
                ButtonId::L3 => snapshot.button_l3 = true,
                ButtonId::R3 => snapshot.button_r3 = true,
                ButtonId::TriggerLeft => snapshot.trigger_left = true,
                ButtonId::TriggerRight => snapshot.trigger_right = true,
            }
        }
        snapshot
    }

    /// Snapshot with only `input` pressed.
    fn with_input(input: Input) -> InputSnapshot {
        let mut snapshot = InputSnapshot::released();
        match input {
            Input::DpadUp => snapshot.dpad_up = true,
            Input::DpadDown => snapshot.dpad_down = true,
            Input::DpadLeft => snapshot.dpad_left = true,
            Input::DpadRight => snapshot.dpad_right = true,
            Input::A => snapshot.button_a = true,
            Input::B => snapshot.button_b = true,
            Input::X => snapshot.button_x = true,
            Input::Y => snapshot.button_y = true,
            Input::LB => snapshot.button_lb = true,
            Input::RB => snapshot.button_rb = true,
            Input::TriggerLeft => snapshot.trigger_left = true,
            Input::TriggerRight => snapshot.trigger_right = true,
            Input::Start => snapshot.button_start = true,
            Input::Back => snapshot.button_back = true,
            Input::Guide => snapshot.button_guide = true,
            Input::L3 => snapshot.button_l3 = true,
            Input::R3 => snapshot.button_r3 = true,
        }
        snapshot
    }

    /// All 16 combinations of the four directions.
    fn all_directions() -> impl Iterator<Item = Directions> {
        (0u8..16).map(|bits| {
            Directions::new(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0, bits & 8 != 0)
        })
    }

    fn with_directions(directions: Directions) -> InputSnapshot {
        InputSnapshot {
            dpad_up: directions.up,
            dpad_down: directions.down,
            dpad_left: directions.left,
            dpad_right: directions.right,
            ..InputSnapshot::released()
        }
    }

    fn directional_call(mode: OperatingMode, directions: Directions) -> Call {
        match mode {
            OperatingMode::DirectionalPad => Call::DirectionalPad(directions, CLEAN_OPPOSITES),
            OperatingMode::LeftStick => Call::LeftStick(directions, CLEAN_OPPOSITES),
        }
    }

    const MODES: [OperatingMode; 2] = [OperatingMode::DirectionalPad, OperatingMode::LeftStick];

    #[test]
    fn test_no_change_issues_nothing() {
        let snapshots = [
            InputSnapshot::released(),
            with_buttons(&[ButtonId::A, ButtonId::Start]),
            InputSnapshot {
                dpad_up: true,
                dpad_left: true,
                button_r3: true,
                ..InputSnapshot::released()
            },
        ];

        for mode in MODES {
            for snapshot in snapshots {
                let mut reporter = reporter(mode);
                let outcome = reporter.report_delta(&snapshot, &snapshot);
                assert!(!outcome.flushed);
                assert_eq!(outcome.previous, snapshot);
                assert!(reporter.transport().calls.is_empty());
            }
        }
    }

    #[test]
    fn test_dpad_up_press_in_dpad_mode() {
        let mut reporter = reporter(OperatingMode::DirectionalPad);
        let previous = InputSnapshot::released();
        let current = InputSnapshot {
            dpad_up: true,
            ..InputSnapshot::released()
        };

        let outcome = reporter.report_delta(&previous, &current);

        assert!(outcome.flushed);
        assert_eq!(outcome.previous, current);
        assert_eq!(
            reporter.transport().calls,
            [
                Call::DirectionalPad(Directions::new(true, false, false, false), true),
                Call::Flush,
            ]
        );
    }

    #[test]
    fn test_dpad_up_press_in_stick_mode() {
        let mut reporter = reporter(OperatingMode::LeftStick);
        let current = InputSnapshot {
            dpad_up: true,
            ..InputSnapshot::released()
        };

        let outcome = reporter.report_delta(&InputSnapshot::released(), &current);

        assert!(outcome.flushed);
        assert_eq!(
            reporter.transport().calls,
            [
                Call::LeftStick(Directions::new(true, false, false, false), true),
                Call::Flush,
            ]
        );
    }

    #[test]
    fn test_button_release() {
        let mut reporter = reporter(OperatingMode::DirectionalPad);
        let previous = with_buttons(&[ButtonId::A]);
        let current = InputSnapshot::released();

        let outcome = reporter.report_delta(&previous, &current);

        assert!(outcome.flushed);
        assert_eq!(outcome.previous, current);
        assert_eq!(
            reporter.transport().calls,
            [Call::Button(ButtonId::A, false), Call::Flush]
        );
    }

    #[test]
    fn test_every_changed_button_updated_once() {
        let previous = with_buttons(&[ButtonId::A, ButtonId::LB, ButtonId::TriggerRight]);
        let current = with_buttons(&[
            ButtonId::LB,
            ButtonId::Start,
            ButtonId::Guide,
            ButtonId::R3,
            ButtonId::TriggerLeft,
        ]);

        let mut reporter = reporter(OperatingMode::LeftStick);
        let _ = reporter.report_delta(&previous, &current);

        // Changed: A (released), TriggerRight (released), Start, Guide, R3,
        // TriggerLeft (pressed). LB held on both sides.
        let expected: Vec<(ButtonId, bool)> = ButtonId::ALL
            .iter()
            .copied()
            .filter(|b| previous.button(*b) != current.button(*b))
            .map(|b| (b, current.button(b)))
            .collect();
        assert_eq!(expected.len(), 6);
        assert_eq!(reporter.transport().buttons(), expected);
        assert!(reporter.transport().directional().is_empty());
        assert_eq!(reporter.transport().flushes(), 1);
    }

    #[test]
    fn test_every_direction_pair() {
        for mode in MODES {
            for from in all_directions() {
                for to in all_directions() {
                    let previous = with_directions(from);
                    let current = with_directions(to);
                    let mut reporter = reporter(mode);

                    let outcome = reporter.report_delta(&previous, &current);

                    assert_eq!(outcome.previous, current);
                    if from == to {
                        assert!(!outcome.flushed);
                        assert!(reporter.transport().calls.is_empty());
                    } else {
                        assert!(outcome.flushed);
                        assert_eq!(
                            reporter.transport().calls,
                            [directional_call(mode, to), Call::Flush]
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_press_and_release_of_every_input() {
        for mode in MODES {
            for input in Input::ALL {
                let held = with_input(input);
                let released = InputSnapshot::released();

                for (previous, current) in [(released, held), (held, released)] {
                    let mut reporter = reporter(mode);
                    let outcome = reporter.report_delta(&previous, &current);

                    let update = if input.is_directional() {
                        directional_call(mode, current.directions())
                    } else {
                        let id = ButtonId::ALL
                            .into_iter()
                            .find(|b| b.input() == input)
                            .unwrap();
                        Call::Button(id, current.input(input))
                    };

                    assert!(outcome.flushed);
                    assert_eq!(outcome.previous, current);
                    assert_eq!(reporter.transport().calls, [update, Call::Flush]);
                }
            }
        }
    }

    #[test]
    fn test_directions_sent_together() {
        let previous = InputSnapshot {
            dpad_up: true,
            dpad_left: true,
            ..InputSnapshot::released()
        };
        let current = InputSnapshot {
            dpad_up: true,
            dpad_right: true,
            dpad_down: true,
            ..InputSnapshot::released()
        };

        let mut reporter = reporter(OperatingMode::DirectionalPad);
        let _ = reporter.report_delta(&previous, &current);

        assert_eq!(
            reporter.transport().directional(),
            vec![Call::DirectionalPad(Directions::new(true, true, false, true), true)]
        );
    }

    #[test]
    fn test_directional_update_comes_before_buttons() {
        let current = InputSnapshot {
            dpad_down: true,
            button_b: true,
            ..InputSnapshot::released()
        };

        let mut reporter = reporter(OperatingMode::LeftStick);
        let _ = reporter.report_delta(&InputSnapshot::released(), &current);

        assert_eq!(
            reporter.transport().calls,
            [
                Call::LeftStick(Directions::new(false, true, false, false), true),
                Call::Button(ButtonId::B, true),
                Call::Flush,
            ]
        );
    }

    #[test]
    fn test_button_change_does_not_resend_directions() {
        let previous = InputSnapshot {
            dpad_right: true,
            ..InputSnapshot::released()
        };
        let current = InputSnapshot {
            dpad_right: true,
            button_y: true,
            ..InputSnapshot::released()
        };

        let mut reporter = reporter(OperatingMode::DirectionalPad);
        let _ = reporter.report_delta(&previous, &current);

        assert!(reporter.transport().directional().is_empty());
        assert_eq!(reporter.transport().buttons(), vec![(ButtonId::Y, true)]);
    }

    #[test]
    fn test_mode_exclusive_over_session() {
        let sequence = [
            InputSnapshot::released(),
            InputSnapshot {
                dpad_up: true,
                ..InputSnapshot::released()
            },
            InputSnapshot {
                dpad_up: true,
                dpad_right: true,
                ..InputSnapshot::released()
            },
            InputSnapshot {
                dpad_left: true,
                button_x: true,
                ..InputSnapshot::released()
            },
            InputSnapshot::released(),
        ];

        for mode in [OperatingMode::DirectionalPad, OperatingMode::LeftStick] {
            let mut reporter = reporter(mode);
            let mut previous = InputSnapshot::released();
            for current in &sequence {
                let outcome = reporter.report_delta(&previous, current);
                if outcome.flushed {
                    previous = outcome.previous;
                }
            }

            let directional = reporter.transport().directional();
            assert_eq!(directional.len(), 4);
            assert!(directional.iter().all(|c| match mode {
                OperatingMode::DirectionalPad => matches!(c, Call::DirectionalPad(..)),
                OperatingMode::LeftStick => matches!(c, Call::LeftStick(..)),
            }));
        }
    }

    #[test]
    fn test_flush_iff_changed() {
        let a = with_buttons(&[ButtonId::X]);
        let b = with_buttons(&[ButtonId::X, ButtonId::Y]);

        let mut reporter = reporter(OperatingMode::DirectionalPad);

        let outcome = reporter.report_delta(&a, &a);
        assert!(!outcome.flushed);
        assert_eq!(outcome.previous, a);
        assert_eq!(reporter.transport().flushes(), 0);

        let outcome = reporter.report_delta(&a, &b);
        assert!(outcome.flushed);
        assert_eq!(outcome.previous, b);
        assert_eq!(reporter.transport().flushes(), 1);
    }
}
