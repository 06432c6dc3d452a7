//! Threshold persisted in non-volatile storage.
//!
//! Layout: four bytes at [`THRESHOLD_ADDR`], the native binary encoding of
//! an `f32`. No header, checksum or version. A power loss during
//! [`ThresholdStore::write`] leaves a mixed value behind; nothing detects it.

use crate::config::{THRESHOLD_ADDR, THRESHOLD_LEN};
use crate::hal::ByteStorage;

/// Reads and writes the threshold through a [`ByteStorage`].
pub struct ThresholdStore<S: ByteStorage> {
    storage: S,
}

impl<S: ByteStorage> ThresholdStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Encodes `celsius` and writes its bytes in address order.
    pub fn write(&mut self, celsius: f32) {
        for (offset, byte) in celsius.to_ne_bytes().into_iter().enumerate() {
            self.storage.write_byte(THRESHOLD_ADDR + offset as u16, byte);
        }
    }

    /// Reads the four bytes in address order and decodes them.
    pub fn read(&mut self) -> f32 {
        f32::from_ne_bytes(self.read_bytes())
    }

    /// Raw stored bytes.
    pub fn read_bytes(&mut self) -> [u8; THRESHOLD_LEN] {
        let mut bytes = [0u8; THRESHOLD_LEN];
        for (offset, byte) in bytes.iter_mut().enumerate() {
            *byte = self.storage.read_byte(THRESHOLD_ADDR + offset as u16);
        }
        bytes
    }

    /// Borrows the underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Releases the underlying storage.
    pub fn into_inner(self) -> S {
        self.storage
    }
}

/// True when `celsius` can be divided by in the actuator policy.
///
/// Zero, negative and non-finite values (an erased cell reads back as NaN)
/// are not usable.
pub fn is_usable(celsius: f32) -> bool {
    celsius.is_finite() && celsius > 0.0
}
