//! Core input types: Input, ButtonId, Directions, InputSnapshot, OperatingMode.

/// Identifier of one physical input on the controller.
///
/// The declaration order is the iteration order used everywhere a full pass
/// over the inputs is made (sampling, pin map validation).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Input {
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    A,
    B,
    X,
    Y,
    LB,
    RB,
    TriggerLeft,
    TriggerRight,
    Start,
    Back,
    Guide,
    L3,
    R3,
}

impl Input {
    /// Number of physical inputs.
    pub const COUNT: usize = 17;

    /// All inputs in declaration order.
    pub const ALL: [Input; Self::COUNT] = [
        Input::DpadUp,
        Input::DpadDown,
        Input::DpadLeft,
        Input::DpadRight,
        Input::A,
        Input::B,
        Input::X,
        Input::Y,
        Input::LB,
        Input::RB,
        Input::TriggerLeft,
        Input::TriggerRight,
        Input::Start,
        Input::Back,
        Input::Guide,
        Input::L3,
        Input::R3,
    ];

    /// Position of this input in [`Input::ALL`].
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Check if this is one of the four directional inputs.
    #[inline]
    #[must_use]
    pub const fn is_directional(self) -> bool {
        matches!(
            self,
            Input::DpadUp | Input::DpadDown | Input::DpadLeft | Input::DpadRight
        )
    }
}

/// Button identifiers understood by the gamepad transport.
///
/// Covers the 13 non-directional inputs. Triggers are reported as digital
/// on/off buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    Start,
    Back,
    Guide,
    A,
    B,
    X,
    Y,
    LB,
    RB,
    L3,
    R3,
    TriggerLeft,
    TriggerRight,
}

impl ButtonId {
    /// Number of button identifiers.
    pub const COUNT: usize = 13;

    /// All buttons in declaration order.
    pub const ALL: [ButtonId; Self::COUNT] = [
        ButtonId::Start,
        ButtonId::Back,
        ButtonId::Guide,
        ButtonId::A,
        ButtonId::B,
        ButtonId::X,
        ButtonId::Y,
        ButtonId::LB,
        ButtonId::RB,
        ButtonId::L3,
        ButtonId::R3,
        ButtonId::TriggerLeft,
        ButtonId::TriggerRight,
    ];

    /// The physical input that drives this button.
    #[must_use]
    pub const fn input(self) -> Input {
        match self {
            ButtonId::Start => Input::Start,
            ButtonId::Back => Input::Back,
            ButtonId::Guide => Input::Guide,
            ButtonId::A => Input::A,
            ButtonId::B => Input::B,
            ButtonId::X => Input::X,
            ButtonId::Y => Input::Y,
            ButtonId::LB => Input::LB,
            ButtonId::RB => Input::RB,
            ButtonId::L3 => Input::L3,
            ButtonId::R3 => Input::R3,
            ButtonId::TriggerLeft => Input::TriggerLeft,
            ButtonId::TriggerRight => Input::TriggerRight,
        }
    }
}

/// The four directional booleans, always carried together.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Directions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Directions {
    /// No direction held.
    pub const NEUTRAL: Self = Self {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    #[must_use]
    pub const fn new(up: bool, down: bool, left: bool, right: bool) -> Self {
        Self {
            up,
            down,
            left,
            right,
        }
    }

    /// Resolve simultaneous opposite cardinal directions.
    ///
    /// Up + down resolves to up, left + right resolves to neutral.
    #[must_use]
    pub const fn cleaned(self) -> Self {
        let both_horizontal = self.left && self.right;
        Self {
            up: self.up,
            down: self.down && !self.up,
            left: self.left && !both_horizontal,
            right: self.right && !both_horizontal,
        }
    }

    /// Cancel opposite directions on both axes.
    #[must_use]
    pub const fn cancelled(self) -> Self {
        let both_vertical = self.up && self.down;
        let both_horizontal = self.left && self.right;
        Self {
            up: self.up && !both_vertical,
            down: self.down && !both_vertical,
            left: self.left && !both_horizontal,
            right: self.right && !both_horizontal,
        }
    }

    /// Check if no direction is held.
    #[inline]
    #[must_use]
    pub const fn is_neutral(self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }
}

/// One complete sampling pass over every physical input.
///
/// `true` means pressed. Equality compares every named field.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputSnapshot {
    pub dpad_up: bool,
    pub dpad_down: bool,
    pub dpad_left: bool,
    pub dpad_right: bool,
    pub button_a: bool,
    pub button_b: bool,
    pub button_x: bool,
    pub button_y: bool,
    pub button_lb: bool,
    pub button_rb: bool,
    pub trigger_left: bool,
    pub trigger_right: bool,
    pub button_start: bool,
    pub button_back: bool,
    pub button_guide: bool,
    pub button_l3: bool,
    pub button_r3: bool,
}

impl InputSnapshot {
    /// Snapshot with every input released.
    #[must_use]
    pub const fn released() -> Self {
        Self {
            dpad_up: false,
            dpad_down: false,
            dpad_left: false,
            dpad_right: false,
            button_a: false,
            button_b: false,
            button_x: false,
            button_y: false,
            button_lb: false,
            button_rb: false,
            trigger_left: false,
            trigger_right: false,
            button_start: false,
            button_back: false,
            button_guide: false,
            button_l3: false,
            button_r3: false,
        }
    }

    /// The four directional fields.
    #[inline]
    #[must_use]
    pub const fn directions(&self) -> Directions {
        Directions {
            up: self.dpad_up,
            down: self.dpad_down,
            left: self.dpad_left,
            right: self.dpad_right,
        }
    }

    /// State of a single input.
    #[must_use]
    pub const fn input(&self, input: Input) -> bool {
        match input {
            Input::DpadUp => self.dpad_up,
            Input::DpadDown => self.dpad_down,
            Input::DpadLeft => self.dpad_left,
            Input::DpadRight => self.dpad_right,
            Input::A => self.button_a,
            Input::B => self.button_b,
            Input::X => self.button_x,
            Input::Y => self.button_y,
            Input::LB => self.button_lb,
            Input::RB => self.button_rb,
            Input::TriggerLeft => self.trigger_left,
            Input::TriggerRight => self.trigger_right,
            Input::Start => self.button_start,
            Input::Back => self.button_back,
            Input::Guide => self.button_guide,
            Input::L3 => self.button_l3,
            Input::R3 => self.button_r3,
        }
    }

    /// State of a single button.
    #[inline]
    #[must_use]
    pub const fn button(&self, button: ButtonId) -> bool {
        self.input(button.input())
    }

    /// Check if no input is pressed.
    #[must_use]
    pub fn is_released(&self) -> bool {
        *self == Self::released()
    }
}

/// How directional input is reported, chosen once at boot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    /// Directions are reported as discrete d-pad presses.
    DirectionalPad,
    /// Directions drive the left analog stick to its extremes.
    LeftStick,
}

impl OperatingMode {
    /// Select the mode from the boot-time level of the mode-select input.
    #[inline]
    #[must_use]
    pub const fn from_boot_select(held: bool) -> Self {
        if held {
            OperatingMode::LeftStick
        } else {
            OperatingMode::DirectionalPad
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_index_matches_all() {
        for (i, input) in Input::ALL.iter().enumerate() {
            assert_eq!(input.index(), i);
        }
    }

    #[test]
    fn test_button_inputs_are_not_directional() {
        for button in ButtonId::ALL {
            assert!(!button.input().is_directional());
        }
        let directional = Input::ALL.iter().filter(|i| i.is_directional()).count();
        assert_eq!(directional + ButtonId::COUNT, Input::COUNT);
    }

    #[test]
    fn test_snapshot_released_is_default() {
        assert_eq!(InputSnapshot::released(), InputSnapshot::default());
        assert!(InputSnapshot::released().is_released());
    }

    #[test]
    fn test_snapshot_equality_is_per_field() {
        let a = InputSnapshot::released();
        let b = InputSnapshot {
            button_r3: true,
            ..InputSnapshot::released()
        };
        assert_ne!(a, b);
        assert!(b.input(Input::R3));
        assert!(b.button(ButtonId::R3));
        assert!(!b.input(Input::L3));
    }

    #[test]
    fn test_snapshot_directions() {
        let snapshot = InputSnapshot {
            dpad_up: true,
            dpad_right: true,
            ..InputSnapshot::released()
        };
        assert_eq!(
            snapshot.directions(),
            Directions::new(true, false, false, true)
        );
    }

    #[test]
    fn test_directions_cleaned() {
        let all = Directions::new(true, true, true, true);
        assert_eq!(all.cleaned(), Directions::new(true, false, false, false));

        let diagonal = Directions::new(false, true, true, false);
        assert_eq!(diagonal.cleaned(), diagonal);
    }

    #[test]
    fn test_directions_cancelled() {
        let all = Directions::new(true, true, true, true);
        assert!(all.cancelled().is_neutral());

        let vertical = Directions::new(true, true, false, true);
        assert_eq!(vertical.cancelled(), Directions::new(false, false, false, true));
    }

    #[test]
    fn test_mode_from_boot_select() {
        assert_eq!(OperatingMode::from_boot_select(true), OperatingMode::LeftStick);
        assert_eq!(
            OperatingMode::from_boot_select(false),
            OperatingMode::DirectionalPad
        );
    }
}
