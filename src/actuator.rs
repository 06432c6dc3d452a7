//! Proportional actuator policy.
//!
//! Above the threshold the output is cut and the modulation clock stopped.
//! At or below it, the duty value falls linearly from 255 at 0 °C to 0 at
//! the threshold: `255 - temperature * 255 / threshold`, truncated.

use crate::config::DUTY_MAX;
use crate::hal::Actuator;
use crate::threshold::is_usable;

/// Output the actuator should drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorOutput {
    /// Duty 0 with the modulation clock stopped.
    Off,
    /// Modulation running at this duty value.
    Duty(u8),
}

impl ActuatorOutput {
    /// Duty value this output drives, 0 when off.
    pub fn duty(self) -> u8 {
        match self {
            ActuatorOutput::Off => 0,
            ActuatorOutput::Duty(duty) => duty,
        }
    }

    /// Drives `actuator` to this output.
    pub fn apply<A: Actuator>(self, actuator: &mut A) {
        match self {
            ActuatorOutput::Off => {
                actuator.set_duty(0);
                actuator.disable();
            }
            ActuatorOutput::Duty(duty) => {
                actuator.enable();
                actuator.set_duty(duty);
            }
        }
    }
}

/// Computes the output for `temperature` against `threshold`.
///
/// A threshold that is zero, negative or not finite switches the output
/// off. So does a temperature that is not finite.
pub fn compute_output(temperature: f32, threshold: f32) -> ActuatorOutput {
    if !is_usable(threshold) || !temperature.is_finite() {
        return ActuatorOutput::Off;
    }
    if temperature > threshold {
        return ActuatorOutput::Off;
    }

    let max = DUTY_MAX as f32;
    let duty = max - (temperature * max) / threshold;
    ActuatorOutput::Duty(duty.clamp(0.0, max) as u8)
}
