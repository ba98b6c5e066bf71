//! Gamepad transport trait.

use crate::types::{ButtonId, Directions};

/// The gamepad report transport the delta reporter writes into.
///
/// Implementations buffer a report, apply the targeted mutations below, and
/// transmit the buffered report on [`flush`](Self::flush). Every call is
/// synchronous and fire-and-forget: buffering, enumeration, and send failures
/// are the transport's own concern.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait GamepadTransport {
    /// Enable or disable sending the report after every mutation.
    fn configure(&mut self, auto_send: bool);

    /// Report the four directions as d-pad presses.
    ///
    /// With `clean_opposites`, simultaneous opposite directions are resolved
    /// before reporting.
    fn set_directional_pad(&mut self, directions: Directions, clean_opposites: bool);

    /// Report the four directions as a left-stick deflection.
    fn set_left_stick(&mut self, directions: Directions, clean_opposites: bool);

    /// Set a single button.
    fn set_button(&mut self, button: ButtonId, pressed: bool);

    /// Transmit the buffered report.
    fn flush(&mut self);
}

impl<T: GamepadTransport + ?Sized> GamepadTransport for &mut T {
    #[inline]
    fn configure(&mut self, auto_send: bool) {
        (**self).configure(auto_send);
    }

    #[inline]
    fn set_directional_pad(&mut self, directions: Directions, clean_opposites: bool) {
        (**self).set_directional_pad(directions, clean_opposites);
    }

    #[inline]
    fn set_left_stick(&mut self, directions: Directions, clean_opposites: bool) {
        (**self).set_left_stick(directions, clean_opposites);
    }

    #[inline]
    fn set_button(&mut self, button: ButtonId, pressed: bool) {
        (**self).set_button(button, pressed);
    }

    #[inline]
    fn flush(&mut self) {
        (**self).flush();
    }
}
