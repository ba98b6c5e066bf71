//! GPIO-backed input lines for the pin sampler.
//!
//! Every switch closes its line to ground, so lines are configured as inputs
//! with the internal pull-up enabled and read as pressed when low.

use defmt::warn;
use embassy_rp::gpio::{AnyPin, Flex, Pull};
use embassy_rp::Peri;
use embassy_time::{block_for, Duration};
use pad_core::{InputLines, MAX_LINES};

/// Time for the internal pull-ups to lift a line out of its pulled-down reset
/// state.
const PULL_UP_SETTLE_US: u64 = 20;

/// Pins available to the switch matrix, indexed by GPIO number.
///
/// `None` marks a GPIO the board reserves for something else.
pub type PinBank = [Option<Peri<'static, AnyPin>>; MAX_LINES as usize];

/// The RP2040 bank-0 GPIOs as [`InputLines`].
pub struct GpioLines<'d> {
    pins: [Option<Flex<'d>>; MAX_LINES as usize],
}

impl GpioLines<'static> {
    /// Take ownership of the pins in `bank`.
    ///
    /// Pins are left unconfigured until [`InputLines::configure_pull_up`].
    #[must_use]
    pub fn new(bank: PinBank) -> Self {
        Self {
            pins: bank.map(|pin| pin.map(|p| Flex::new(p))),
        }
    }
}

impl InputLines for GpioLines<'_> {
    fn configure_pull_up(&mut self, line: u8) {
        match self.pins.get_mut(line as usize).and_then(Option::as_mut) {
            Some(pin) => {
                pin.set_as_input();
                pin.set_pull(Pull::Up);
            }
            None => warn!("GPIO {} is not available for inputs", line),
        }
    }

    fn has_line(&self, line: u8) -> bool {
        self.pins
            .get(line as usize)
            .is_some_and(Option::is_some)
    }

    fn settle(&mut self) {
        block_for(Duration::from_micros(PULL_UP_SETTLE_US));
    }

    fn is_low(&mut self, line: u8) -> bool {
        // A missing line reads as released.
        self.pins
            .get(line as usize)
            .and_then(Option::as_ref)
            .is_some_and(|pin| pin.is_low())
    }
}
