//! The control loop.
//!
//! Provides [`Thermostat`], which owns the analog input, display, storage,
//! actuator and delay, and runs one acquisition phase, one actuator update
//! and one display refresh per iteration. The interrupt handlers only ever
//! meet it through [`SharedState`].

use embedded_hal::delay::DelayNs;

use crate::acquisition::{Acquisition, Alternator};
use crate::actuator::{ActuatorOutput, compute_output};
use crate::display::{Screen, ScreenData, register_glyphs};
use crate::hal::{Actuator, AnalogInput, ByteStorage, CharDisplay};
use crate::shared::SharedState;
use crate::threshold::ThresholdStore;
use crate::types::{AcquisitionPhase, DisplayMode};

/// Board peripherals the control loop owns.
pub struct Hardware<A, D, S, P, W> {
    pub analog: A,
    pub display: D,
    pub storage: S,
    pub actuator: P,
    pub delay: W,
}

/// Summary of one control-loop iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Iteration {
    /// The acquisition phase that ran.
    pub acquisition: Acquisition,
    /// Threshold read back from storage.
    pub threshold: f32,
    /// Output applied to the actuator.
    pub output: ActuatorOutput,
    /// Screen that was drawn.
    pub mode: DisplayMode,
}

/// Thermostat control loop.
///
/// # Type Parameters
/// * `'s` - Lifetime of the shared state reference
/// * `A` - Analog input
/// * `D` - Character display
/// * `S` - Non-volatile byte storage
/// * `P` - Modulated actuator
/// * `W` - Blocking delay
pub struct Thermostat<'s, A, D, S, P, W>
where
    A: AnalogInput,
    D: CharDisplay,
    S: ByteStorage,
    P: Actuator,
    W: DelayNs,
{
    analog: A,
    display: D,
    store: ThresholdStore<S>,
    actuator: P,
    delay: W,
    shared: &'s SharedState,
    alternator: Alternator,
}

impl<'s, A, D, S, P, W> Thermostat<'s, A, D, S, P, W>
where
    A: AnalogInput,
    D: CharDisplay,
    S: ByteStorage,
    P: Actuator,
    W: DelayNs,
{
    /// Takes ownership of the hardware and prepares the display.
    ///
    /// Registers the degree glyph and publishes the stored threshold so the
    /// serial handler can report it before the first iteration. Call before
    /// enabling interrupts.
    pub fn new(hw: Hardware<A, D, S, P, W>, shared: &'s SharedState) -> Self {
        let mut thermostat = Self {
            analog: hw.analog,
            display: hw.display,
            store: ThresholdStore::new(hw.storage),
            actuator: hw.actuator,
            delay: hw.delay,
            shared,
            alternator: Alternator::new(),
        };

        register_glyphs(&mut thermostat.display);
        let threshold = thermostat.store.read();
        thermostat.shared.publish_threshold(threshold);
        info!("thermostat ready, stored threshold {}", threshold);

        thermostat
    }

    /// Runs one iteration: acquire, drive the actuator, redraw.
    pub fn step(&mut self) -> Iteration {
        let acquisition = self.alternator.acquire(
            &mut self.analog,
            &mut self.delay,
            &mut self.store,
            self.shared,
        );

        // storage is the authority; the published copy is only for reporting
        let threshold = self.store.read();
        self.shared.publish_threshold(threshold);

        let snapshot = self.shared.snapshot();
        let output = compute_output(snapshot.temperature, threshold);
        output.apply(&mut self.actuator);

        let screen = Screen::compose(
            snapshot.mode,
            &ScreenData {
                time: snapshot.time,
                temperature: snapshot.temperature,
                threshold,
            },
        );
        screen.draw(&mut self.display);

        trace!(
            "iteration: {:?}, threshold {}, output {:?}",
            acquisition, threshold, output
        );

        Iteration {
            acquisition,
            threshold,
            output,
            mode: snapshot.mode,
        }
    }

    /// Runs the control loop forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    /// Phase the next iteration runs.
    pub fn next_phase(&self) -> AcquisitionPhase {
        self.alternator.phase()
    }

    /// Reads the persisted threshold.
    pub fn threshold(&mut self) -> f32 {
        self.store.read()
    }

    /// Persists a new threshold outside the potentiometer path.
    pub fn set_threshold(&mut self, celsius: f32) {
        self.store.write(celsius);
        self.shared.publish_threshold(celsius);
    }

    pub fn shared(&self) -> &'s SharedState {
        self.shared
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn actuator(&self) -> &P {
        &self.actuator
    }

    pub fn storage(&self) -> &S {
        self.store.storage()
    }

    /// Releases the hardware.
    pub fn into_hardware(self) -> Hardware<A, D, S, P, W> {
        Hardware {
            analog: self.analog,
            display: self.display,
            storage: self.store.into_inner(),
            actuator: self.actuator,
            delay: self.delay,
        }
    }
}
