//! Serial command protocol.
//!
//! A frame is a command byte plus a fixed-length payload:
//!
//! | Code   | Command             | Payload                | Reply                  |
//! |--------|---------------------|------------------------|------------------------|
//! | `0x10` | set time            | hour, minute, second   | none                   |
//! | `0x20` | request temperature | none                   | e.g. `"23.50"`         |
//! | `0x30` | request threshold   | none                   | e.g. `"20.00"`         |
//! | other  | —                   | none                   | `"Invalid command code"` |
//!
//! Replies carry no terminator. Time-set values are stored as received.

use core::fmt::Write;
use heapless::{String, Vec};

use crate::clock::ClockTime;
use crate::hal::SerialPort;
use crate::shared::SharedState;
use crate::types::Error;

/// Reply sent for an unknown command code.
pub const INVALID_COMMAND_REPLY: &str = "Invalid command code";

/// Payload length of the set-time command.
pub const SET_TIME_PAYLOAD: usize = 3;

/// Longest reply the responder sends.
pub const REPLY_CAPACITY: usize = 20;

/// A reply ready for transmission.
pub type Reply = String<REPLY_CAPACITY>;

/// Command selected by a frame's first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Replace the wall-clock time.
    SetTime,
    /// Report the latest temperature.
    RequestTemperature,
    /// Report the persisted threshold.
    RequestThreshold,
    /// Unknown code.
    Invalid(u8),
}

impl Command {
    pub const SET_TIME: u8 = 0x10;
    pub const REQUEST_TEMPERATURE: u8 = 0x20;
    pub const REQUEST_THRESHOLD: u8 = 0x30;

    pub fn from_code(code: u8) -> Self {
        match code {
            Self::SET_TIME => Command::SetTime,
            Self::REQUEST_TEMPERATURE => Command::RequestTemperature,
            Self::REQUEST_THRESHOLD => Command::RequestThreshold,
            other => Command::Invalid(other),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Command::SetTime => Self::SET_TIME,
            Command::RequestTemperature => Self::REQUEST_TEMPERATURE,
            Command::RequestThreshold => Self::REQUEST_THRESHOLD,
            Command::Invalid(code) => code,
        }
    }

    /// Payload bytes following the command byte.
    pub fn payload_len(self) -> usize {
        match self {
            Command::SetTime => SET_TIME_PAYLOAD,
            _ => 0,
        }
    }
}

/// Formats a reading as a fixed-point decimal with two places.
pub fn format_reading(celsius: f32) -> Reply {
    let mut reply = Reply::new();
    if write!(reply, "{:2.2}", celsius).is_err() {
        reply.clear();
    }
    reply
}

/// What a received byte led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameEvent {
    /// Part of a frame arrived. More bytes are needed.
    Pending,
    /// A set-time frame completed.
    TimeSet(ClockTime),
    /// A reply was transmitted for this command.
    Replied(Command),
}

/// Decodes frames from the byte-arrival interrupt and answers them.
///
/// Owns the serial port. Reads shared state but never touches storage:
/// the threshold it reports is the copy the control loop publishes.
pub struct SerialResponder<P: SerialPort> {
    port: P,
    payload: Option<Vec<u8, SET_TIME_PAYLOAD>>,
}

impl<P: SerialPort> SerialResponder<P> {
    pub fn new(port: P) -> Self {
        Self {
            port,
            payload: None,
        }
    }

    /// Feeds one received byte.
    ///
    /// Call once per byte-arrival interrupt. Payload bytes are buffered
    /// across calls, so no invocation waits for the next byte.
    pub fn on_byte(&mut self, byte: u8, shared: &SharedState) -> Result<FrameEvent, Error> {
        if let Some(payload) = self.payload.as_mut() {
            // capacity is the payload length, so the push cannot fail
            let _ = payload.push(byte);
            if !payload.is_full() {
                return Ok(FrameEvent::Pending);
            }
            let time = ClockTime::new(payload[0], payload[1], payload[2]);
            self.payload = None;
            shared.set_time(time);
            debug!("time set to {}", time);
            return Ok(FrameEvent::TimeSet(time));
        }

        match Command::from_code(byte) {
            Command::SetTime => {
                self.payload = Some(Vec::new());
                Ok(FrameEvent::Pending)
            }
            command => self.reply(command, shared),
        }
    }

    /// Handles a frame whose first byte just arrived, reading any payload
    /// by blocking on the port.
    ///
    /// This stalls lower-priority interrupts for a few byte-times. A port
    /// read error drops the partial frame and leaves shared state as it was.
    pub fn on_frame_start_blocking(
        &mut self,
        first: u8,
        shared: &SharedState,
    ) -> Result<FrameEvent, Error> {
        self.payload = None;
        let command = Command::from_code(first);
        if command != Command::SetTime {
            return self.reply(command, shared);
        }

        let mut fields = [0u8; SET_TIME_PAYLOAD];
        for (received, field) in fields.iter_mut().enumerate() {
            *field = self.port.read_byte().map_err(|cause| {
                warn!("set-time frame dropped after {} bytes: {:?}", received, cause);
                Error::FrameIncomplete {
                    expected: SET_TIME_PAYLOAD,
                    received,
                    cause,
                }
            })?;
        }

        let time = ClockTime::new(fields[0], fields[1], fields[2]);
        shared.set_time(time);
        debug!("time set to {}", time);
        Ok(FrameEvent::TimeSet(time))
    }

    /// True while a set-time payload is being collected.
    pub fn is_mid_frame(&self) -> bool {
        self.payload.is_some()
    }

    /// Borrows the serial port.
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Releases the serial port.
    pub fn into_inner(self) -> P {
        self.port
    }

    fn reply(&mut self, command: Command, shared: &SharedState) -> Result<FrameEvent, Error> {
        let reply = match command {
            Command::RequestTemperature => format_reading(shared.temperature()),
            Command::RequestThreshold => format_reading(shared.published_threshold()),
            Command::SetTime | Command::Invalid(_) => {
                let mut reply = Reply::new();
                let _ = reply.push_str(INVALID_COMMAND_REPLY);
                reply
            }
        };

        self.port.write_str(&reply)?;
        trace!("replied to {:?}", command);
        Ok(FrameEvent::Replied(command))
    }
}
