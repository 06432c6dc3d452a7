#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`SharedState`**: The region the interrupt handlers and the control loop share, guarded by critical sections
//! - **`Thermostat`**: The control loop; owns the analog input, display, storage, actuator and delay
//! - **`handlers`**: Tick, button-edge and byte-arrival handlers to bind to interrupt vectors
//! - **`SerialResponder`**: Decodes serial command frames and sends replies
//! - **`ThresholdStore`**: Persists the threshold as four raw bytes
//! - **`ClockTime`** / **`Clock`**: Wall-clock time driven by the periodic tick
//! - **`DisplayMode`**: Which screen is up (`Time`, `Threshold`, `Temperature`)
//! - **`CharDisplay`**, **`AnalogInput`**, **`SerialPort`**, **`ByteStorage`**, **`Actuator`**: Traits to implement for your board
//!
//! Temperatures and thresholds are `f32` degrees Celsius throughout.

#[macro_use]
mod fmt;

pub mod config;
pub mod hal;
pub mod types;
pub mod clock;
pub mod debounce;
pub mod shared;
pub mod threshold;
pub mod acquisition;
pub mod actuator;
pub mod display;
pub mod serial;
pub mod handlers;
pub mod thermostat;

pub use acquisition::{Acquisition, Alternator, Reading, raw_to_celsius, raw_to_threshold};
pub use actuator::{ActuatorOutput, compute_output};
pub use clock::{Clock, ClockTime};
pub use debounce::DebounceMark;
pub use display::{Screen, ScreenData};
pub use hal::{Actuator, AnalogChannel, AnalogInput, ByteStorage, CharDisplay, HalError, SerialPort};
pub use handlers::{ResponderSlot, on_button_edge, on_tick};
pub use serial::{Command, FrameEvent, INVALID_COMMAND_REPLY, SerialResponder, format_reading};
pub use shared::{SharedState, Snapshot};
pub use thermostat::{Hardware, Iteration, Thermostat};
pub use threshold::ThresholdStore;
pub use types::{AcquisitionPhase, Button, DisplayMode, Error};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_compile() {
        let _ = DisplayMode::Time;
        let _ = AcquisitionPhase::ReadThreshold;
        let _ = Button::Temperature;
        let _ = Command::Invalid(0x99);
    }
}
