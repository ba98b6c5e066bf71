//! Controller: owns the sampler, the reporter and the retained snapshots.

use crate::reporter::DeltaReporter;
use crate::sampler::{InputLines, PinSampler};
use crate::transport::GamepadTransport;
use crate::types::{InputSnapshot, OperatingMode};

/// The controller's input-to-report loop state.
///
/// Holds the `previous` snapshot (as of the last flush), the `current`
/// snapshot (as of the last sampling pass), and the boot-selected
/// [`OperatingMode`]. There is exactly one controller per device; the outer
/// firmware loop calls [`tick`](Self::tick) repeatedly.
pub struct Controller<L, T> {
    sampler: PinSampler<L>,
    reporter: DeltaReporter<T>,
    previous: InputSnapshot,
    current: InputSnapshot,
}

impl<L: InputLines, T: GamepadTransport> Controller<L, T> {
    /// Bring up the controller.
    ///
    /// Configures the input lines and waits for them to settle, zeroes both
    /// snapshots, samples the mode-select input once, and turns off transport auto-send so reports
    /// only go out on an explicit flush.
    pub fn initialize(mut sampler: PinSampler<L>, mut transport: T) -> Self {
        sampler.configure();
        let mode = OperatingMode::from_boot_select(sampler.mode_select_active());
        transport.configure(false);

        Self {
            sampler,
            reporter: DeltaReporter::new(transport, mode),
            previous: InputSnapshot::released(),
            current: InputSnapshot::released(),
        }
    }

    /// Run one sample and report cycle.
    ///
    /// Returns `true` if a report was flushed.
    pub fn tick(&mut self) -> bool {
        self.current = self.sampler.sample();

        let outcome = self.reporter.report_delta(&self.previous, &self.current);
        if outcome.flushed {
            self.previous = outcome.previous;
        }
        outcome.flushed
    }

    /// The mode selected at boot.
    #[inline]
    #[must_use]
    pub fn mode(&self) -> OperatingMode {
        self.reporter.mode()
    }

    /// Snapshot as of the last flushed report.
    #[inline]
    #[must_use]
    pub fn previous(&self) -> &InputSnapshot {
        &self.previous
    }

    /// Snapshot as of the last sampling pass.
    #[inline]
    #[must_use]
    pub fn current(&self) -> &InputSnapshot {
        &self.current
    }

    /// Get a reference to the pin sampler.
    pub fn sampler(&self) -> &PinSampler<L> {
        &self.sampler
    }

    /// Get a mutable reference to the pin sampler.
    pub fn sampler_mut(&mut self) -> &mut PinSampler<L> {
        &mut self.sampler
    }

    /// Get a reference to the transport.
    pub fn transport(&self) -> &T {
        self.reporter.transport()
    }

    /// Get a mutable reference to the transport.
    pub fn transport_mut(&mut self) -> &mut T {
        self.reporter.transport_mut()
    }

    /// Decompose the controller into its sampler and transport.
    pub fn into_parts(self) -> (PinSampler<L>, T) {
        (self.sampler, self.reporter.into_transport())
    }
}
