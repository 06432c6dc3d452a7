//! Core types shared by the loop and the event handlers.

use crate::hal::HalError;

/// Which screen the display is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Wall-clock time.
    #[default]
    Time,

    /// Threshold adjustment. The potentiometer is sampled only here.
    Threshold,

    /// Live temperature.
    Temperature,
}

impl DisplayMode {
    /// Mode after an accepted edge on `button`.
    ///
    /// Each button toggles between its own mode and `Time`. Pressed from the
    /// other button's mode, it switches straight to its own mode.
    pub fn toggled_by(self, button: Button) -> Self {
        let target = button.mode();
        if self == target {
            DisplayMode::Time
        } else {
            target
        }
    }
}

/// Menu buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Button 1, temperature screen.
    Temperature,

    /// Button 2, threshold screen.
    Threshold,
}

impl Button {
    /// The screen this button toggles.
    pub const fn mode(self) -> DisplayMode {
        match self {
            Button::Temperature => DisplayMode::Temperature,
            Button::Threshold => DisplayMode::Threshold,
        }
    }
}

/// What the control loop samples on its current iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AcquisitionPhase {
    /// Sample the temperature sensor.
    #[default]
    ReadTemperature,

    /// Sample the threshold potentiometer, if the threshold screen is up.
    ReadThreshold,
}

impl AcquisitionPhase {
    /// The phase that follows this one.
    pub const fn next(self) -> Self {
        match self {
            AcquisitionPhase::ReadTemperature => AcquisitionPhase::ReadThreshold,
            AcquisitionPhase::ReadThreshold => AcquisitionPhase::ReadTemperature,
        }
    }
}

/// Errors surfaced by the control core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A hardware collaborator failed.
    Hal(HalError),

    /// A serial frame was abandoned before its payload was complete.
    FrameIncomplete {
        /// Payload bytes the command needs.
        expected: usize,
        /// Payload bytes received before the failure.
        received: usize,
        /// Why the next byte never arrived.
        cause: HalError,
    },
}

impl From<HalError> for Error {
    fn from(err: HalError) -> Self {
        Error::Hal(err)
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Hal(err) => write!(f, "hardware error: {}", err),
            Error::FrameIncomplete {
                expected,
                received,
                cause,
            } => {
                write!(
                    f,
                    "incomplete frame: expected {} payload bytes, received {} ({})",
                    expected, received, cause
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_toggle_against_time() {
        let mode = DisplayMode::Time.toggled_by(Button::Temperature);
        assert_eq!(mode, DisplayMode::Temperature);
        assert_eq!(mode.toggled_by(Button::Temperature), DisplayMode::Time);

        let mode = DisplayMode::Time.toggled_by(Button::Threshold);
        assert_eq!(mode, DisplayMode::Threshold);
        assert_eq!(mode.toggled_by(Button::Threshold), DisplayMode::Time);
    }

    #[test]
    fn other_button_switches_directly_to_its_mode() {
        assert_eq!(
            DisplayMode::Threshold.toggled_by(Button::Temperature),
            DisplayMode::Temperature
        );
        assert_eq!(
            DisplayMode::Temperature.toggled_by(Button::Threshold),
            DisplayMode::Threshold
        );
    }

    #[test]
    fn phase_alternates() {
        let phase = AcquisitionPhase::default();
        assert_eq!(phase, AcquisitionPhase::ReadTemperature);
        assert_eq!(phase.next(), AcquisitionPhase::ReadThreshold);
        assert_eq!(phase.next().next(), phase);
    }
}
