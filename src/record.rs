//! The sensor reading carried in every packet.

use crate::error::LinkError;

/// Size in bytes of a serialized [`SensorRecord`].
pub const RECORD_LEN: usize = 5;

/// One sensor reading.
///
/// Serialized as `status`, `temp`, `humidity` with no padding, multi-byte
/// fields little-endian.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct SensorRecord {
    /// Sensor status flags.
    pub status: u8,
    /// Raw temperature reading.
    pub temp: u16,
    /// Raw humidity reading.
    pub humidity: u16,
}

impl SensorRecord {
    /// Creates a record from its fields.
    pub const fn new(status: u8, temp: u16, humidity: u16) -> Self {
        Self {
            status,
            temp,
            humidity,
        }
    }

    /// Serializes the record into its 5-byte payload form.
    pub fn to_bytes(&self) -> [u8; RECORD_LEN] {
        let [t0, t1] = self.temp.to_le_bytes();
        let [h0, h1] = self.humidity.to_le_bytes();
        [self.status, t0, t1, h0, h1]
    }

    /// Reads a record back from a payload.
    ///
    /// # Errors
    /// [`LinkError::LengthMismatch`] unless `payload` is exactly
    /// [`RECORD_LEN`] bytes. No partial decode is attempted.
    pub fn from_payload(payload: &[u8]) -> Result<Self, LinkError> {
        let &[status, t0, t1, h0, h1] = payload else {
            return Err(LinkError::LengthMismatch {
                expected: RECORD_LEN,
                received: payload.len(),
            });
        };
        Ok(Self {
            status,
            temp: u16::from_le_bytes([t0, t1]),
            humidity: u16::from_le_bytes([h0, h1]),
        })
    }
}
