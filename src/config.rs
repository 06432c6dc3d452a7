//! Compile-time configuration.
//!
//! Everything here is fixed at build time. The only value that changes at
//! runtime is the threshold, and that lives in non-volatile storage.

/// Periodic tick interrupts per wall-clock second.
pub const TICKS_PER_SECOND: u64 = 4;

/// Settling delay after reconfiguring the analog input, in milliseconds.
pub const SETTLE_DELAY_MS: u32 = 100;

/// First storage address of the 4-byte threshold.
pub const THRESHOLD_ADDR: u16 = 0;

/// Number of bytes the threshold occupies in storage.
pub const THRESHOLD_LEN: usize = 4;

/// Full-scale count of the 10-bit analog converter.
pub const ADC_FULL_SCALE: f32 = 1024.0;

/// Internal reference voltage used for the temperature channel.
pub const TEMP_REFERENCE_VOLTS: f32 = 1.1;

/// Sensor scale factor (10 mV per degree Celsius).
pub const TEMP_DEGREES_PER_VOLT: f32 = 100.0;

/// Threshold reached when the potentiometer is at full scale.
pub const THRESHOLD_FULL_SCALE: f32 = 40.0;

/// Maximum actuator duty value.
pub const DUTY_MAX: u8 = u8::MAX;

/// Default serial symbol rate.
pub const BAUD_RATE: u32 = 9600;

/// Character columns per display line.
pub const LINE_WIDTH: usize = 16;

/// Glyph slot holding the degree symbol.
pub const DEGREE_GLYPH_SLOT: u8 = 0;

/// Degree symbol bitmap, 5 columns by 8 rows.
pub const DEGREE_GLYPH: [u8; 8] = [
    0b00111, 0b00101, 0b00111, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000,
];
