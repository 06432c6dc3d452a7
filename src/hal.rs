//! Hardware abstraction traits for the board collaborators.
//!
//! Implement these for your peripherals. The crate never touches registers;
//! the control loop and event handlers only talk to these traits.

/// Failure reported by a blocking hardware operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// The hardware did not signal completion within its bounded wait.
    Timeout,
    /// The peripheral reported an error condition.
    Fault,
}

impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HalError::Timeout => write!(f, "hardware did not respond in time"),
            HalError::Fault => write!(f, "hardware fault"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

/// Two-line character display.
///
/// Drawing cannot fail from the caller's point of view. Handle bus errors
/// inside the implementation.
pub trait CharDisplay {
    /// Clears the screen and homes the cursor.
    fn clear(&mut self);

    /// Moves the cursor to `column` on `row` (both zero-based).
    fn set_cursor(&mut self, column: u8, row: u8);

    /// Writes text at the cursor.
    fn write_str(&mut self, text: &str);

    /// Stores a custom 5x8 glyph in `slot`.
    fn register_glyph(&mut self, slot: u8, bitmap: &[u8; 8]);

    /// Writes the custom glyph stored in `slot` at the cursor.
    fn write_glyph(&mut self, slot: u8);
}

/// Source the shared analog input is multiplexed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogChannel {
    /// Temperature sensor against the internal reference.
    Temperature,
    /// Threshold potentiometer against the supply reference.
    Threshold,
}

/// Single analog-to-digital converter shared by both sources.
pub trait AnalogInput {
    /// Routes the converter to `channel` with its reference configuration.
    fn select(&mut self, channel: AnalogChannel);

    /// Runs one conversion and blocks until it completes.
    ///
    /// Returns a raw 10-bit sample. Implementations bound the wait and
    /// return [`HalError::Timeout`] when the converter never finishes.
    fn read(&mut self) -> Result<u16, HalError>;
}

/// Byte-oriented serial transport.
pub trait SerialPort {
    /// Transmits one byte, blocking until the transmit buffer accepts it.
    fn write_byte(&mut self, byte: u8) -> Result<(), HalError>;

    /// Transmits a string byte by byte.
    fn write_str(&mut self, text: &str) -> Result<(), HalError> {
        for byte in text.bytes() {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    /// Blocks until a byte arrives.
    ///
    /// Implementations bound the wait and return [`HalError::Timeout`] on
    /// expiry.
    fn read_byte(&mut self) -> Result<u8, HalError>;
}

/// Non-volatile byte storage.
///
/// Each call is synchronous and waits for the previous operation to finish
/// internally.
pub trait ByteStorage {
    /// Writes `value` at `address`.
    fn write_byte(&mut self, address: u16, value: u8);

    /// Reads the byte at `address`.
    fn read_byte(&mut self, address: u16) -> u8;
}

/// Pulse-width modulated heating/cooling output.
pub trait Actuator {
    /// Starts the modulation clock source.
    fn enable(&mut self);

    /// Stops the modulation clock source.
    fn disable(&mut self);

    /// Sets the duty value, 0 (never active) to 255 (always active).
    fn set_duty(&mut self, duty: u8);
}
