//! Alternating acquisition on the single analog input.
//!
//! One phase runs per control-loop iteration: temperature, then (only while
//! the threshold screen is up) the threshold potentiometer, then temperature
//! again.

use embedded_hal::delay::DelayNs;

use crate::config::{
    ADC_FULL_SCALE, SETTLE_DELAY_MS, TEMP_DEGREES_PER_VOLT, TEMP_REFERENCE_VOLTS,
    THRESHOLD_FULL_SCALE,
};
use crate::hal::{AnalogChannel, AnalogInput, ByteStorage, HalError};
use crate::shared::SharedState;
use crate::threshold::ThresholdStore;
use crate::types::{AcquisitionPhase, DisplayMode};

/// Converts a raw temperature sample to degrees Celsius.
#[inline]
pub fn raw_to_celsius(sample: u16) -> f32 {
    (sample as f32 / ADC_FULL_SCALE) * TEMP_REFERENCE_VOLTS * TEMP_DEGREES_PER_VOLT
}

/// Converts a raw potentiometer sample to a threshold in degrees Celsius.
#[inline]
pub fn raw_to_threshold(sample: u16) -> f32 {
    (sample as f32 * THRESHOLD_FULL_SCALE) / ADC_FULL_SCALE
}

/// Result of one acquisition phase.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reading {
    /// A sample was converted and stored.
    Sampled(f32),
    /// Threshold phase outside the threshold screen.
    Skipped,
    /// The conversion failed. The previous value stays in place.
    Failed(HalError),
}

/// What an iteration's acquisition did.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Acquisition {
    pub phase: AcquisitionPhase,
    pub reading: Reading,
}

/// Two-phase acquisition state, private to the control loop.
#[derive(Debug, Default)]
pub struct Alternator {
    phase: AcquisitionPhase,
}

impl Alternator {
    /// Starts with a temperature reading.
    pub const fn new() -> Self {
        Self {
            phase: AcquisitionPhase::ReadTemperature,
        }
    }

    /// Phase the next call to [`Alternator::acquire`] runs.
    pub fn phase(&self) -> AcquisitionPhase {
        self.phase
    }

    /// Runs the current phase and advances to the other one.
    ///
    /// Temperature lands in `shared`. A new threshold is persisted through
    /// `store` and published to `shared`. Both phases include the settling
    /// delay, whether or not a sample was taken.
    pub fn acquire<A, D, S>(
        &mut self,
        analog: &mut A,
        delay: &mut D,
        store: &mut ThresholdStore<S>,
        shared: &SharedState,
    ) -> Acquisition
    where
        A: AnalogInput,
        D: DelayNs,
        S: ByteStorage,
    {
        let phase = self.phase;
        let reading = match phase {
            AcquisitionPhase::ReadTemperature => {
                analog.select(AnalogChannel::Temperature);
                delay.delay_ms(SETTLE_DELAY_MS);
                match analog.read() {
                    Ok(sample) => {
                        let celsius = raw_to_celsius(sample);
                        shared.set_temperature(celsius);
                        Reading::Sampled(celsius)
                    }
                    Err(err) => Reading::Failed(err),
                }
            }
            AcquisitionPhase::ReadThreshold => {
                let reading = if shared.display_mode() == DisplayMode::Threshold {
                    analog.select(AnalogChannel::Threshold);
                    match analog.read() {
                        Ok(sample) => {
                            let celsius = raw_to_threshold(sample);
                            store.write(celsius);
                            shared.publish_threshold(celsius);
                            Reading::Sampled(celsius)
                        }
                        Err(err) => Reading::Failed(err),
                    }
                } else {
                    Reading::Skipped
                };
                delay.delay_ms(SETTLE_DELAY_MS);
                reading
            }
        };

        if let Reading::Failed(err) = reading {
            warn!("analog read failed in {:?}: {:?}", phase, err);
        }

        self.phase = phase.next();
        Acquisition { phase, reading }
    }
}
