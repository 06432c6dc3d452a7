//! Screen rendering for the two-line character display.

use core::fmt::Write;
use heapless::String;

use crate::clock::ClockTime;
use crate::config::{DEGREE_GLYPH, DEGREE_GLYPH_SLOT, LINE_WIDTH};
use crate::hal::CharDisplay;
use crate::types::DisplayMode;

pub const TIME_LABEL: &str = "Current Time:";
pub const THRESHOLD_LABEL: &str = "Set Threshold :";
pub const TEMPERATURE_LABEL: &str = "Temperature: ";

/// One display line of text.
pub type Line = String<LINE_WIDTH>;

/// Values a screen can show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenData {
    pub time: ClockTime,
    pub temperature: f32,
    pub threshold: f32,
}

/// Contents of both display lines for one refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    /// First line.
    pub label: &'static str,
    /// Second line, before the unit suffix.
    pub value: Line,
    /// Whether the value is followed by the degree glyph and `C`.
    pub celsius: bool,
}

impl Screen {
    /// Lays out the screen for `mode`.
    ///
    /// The threshold shows two decimals, the temperature one. A value too
    /// wide for the line is left blank.
    pub fn compose(mode: DisplayMode, data: &ScreenData) -> Self {
        let mut value = Line::new();
        let (label, celsius, written) = match mode {
            DisplayMode::Time => (TIME_LABEL, false, write!(value, "{}", data.time)),
            DisplayMode::Threshold => (
                THRESHOLD_LABEL,
                true,
                write!(value, "{:2.2}", data.threshold),
            ),
            DisplayMode::Temperature => (
                TEMPERATURE_LABEL,
                true,
                write!(value, "{:2.1}", data.temperature),
            ),
        };
        if written.is_err() {
            value.clear();
        }

        Self {
            label,
            value,
            celsius,
        }
    }

    /// Clears the display and draws both lines.
    pub fn draw<D: CharDisplay>(&self, display: &mut D) {
        display.clear();
        display.set_cursor(0, 0);
        display.write_str(self.label);
        display.set_cursor(0, 1);
        display.write_str(&self.value);
        if self.celsius {
            display.write_glyph(DEGREE_GLYPH_SLOT);
            display.write_str("C");
        }
    }
}

/// Registers the custom glyphs the screens use.
pub fn register_glyphs<D: CharDisplay>(display: &mut D) {
    display.register_glyph(DEGREE_GLYPH_SLOT, &DEGREE_GLYPH);
}
