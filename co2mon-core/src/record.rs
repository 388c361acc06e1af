//! Persisted credential record
//!
//! Provisioned credentials survive power loss as a small binary record:
//!
//! ```text
//! ┌──────────────────────────────────────────┬────────────┐
//! │ postcard(magic, version, credentials)    │ CRC-32 LE  │
//! └──────────────────────────────────────────┴────────────┘
//! ```
//!
//! The CRC covers the serialized bytes, so a torn or bit-flipped write is
//! rejected before deserialization.

use crc::{Crc, CRC_32_ISO_HDLC};
use serde::{Deserialize, Serialize};

use crate::config::CredentialSet;

/// Magic number to identify a credential record
pub const RECORD_MAGIC: u32 = 0x434F_3243; // "CO2C"

/// Current record format version
pub const RECORD_VERSION: u8 = 1;

/// Upper bound on an encoded record
pub const MAX_RECORD_SIZE: usize = 128;

const CRC_LEN: usize = 4;

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Record encode/decode errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordError {
    /// Output buffer cannot hold the record
    BufferTooSmall,
    /// Input is shorter than the smallest possible record
    Truncated,
    /// CRC does not match the payload
    ChecksumMismatch,
    /// Payload is not a valid record
    Deserialize,
    /// Payload is not a credential record
    BadMagic,
    /// Record written by an incompatible firmware
    VersionMismatch,
}

/// Credential record stored under the credentials key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CredentialRecord {
    /// Magic number for validation
    pub magic: u32,
    /// Data format version
    pub version: u8,
    pub credentials: CredentialSet,
}

impl CredentialRecord {
    pub fn new(credentials: CredentialSet) -> Self {
        Self {
            magic: RECORD_MAGIC,
            version: RECORD_VERSION,
            credentials,
        }
    }

    /// Encode into `buf`, returning the written prefix
    pub fn encode<'a>(&self, buf: &'a mut [u8]) -> Result<&'a [u8], RecordError> {
        let body_capacity = buf
            .len()
            .checked_sub(CRC_LEN)
            .ok_or(RecordError::BufferTooSmall)?;

        let body_len = postcard::to_slice(self, &mut buf[..body_capacity])
            .map_err(|_| RecordError::BufferTooSmall)?
            .len();

        let crc = CRC32.checksum(&buf[..body_len]);
        buf[body_len..body_len + CRC_LEN].copy_from_slice(&crc.to_le_bytes());

        Ok(&buf[..body_len + CRC_LEN])
    }

    /// Decode and verify a stored record
    pub fn decode(bytes: &[u8]) -> Result<Self, RecordError> {
        if bytes.len() <= CRC_LEN {
            return Err(RecordError::Truncated);
        }

        let (body, tail) = bytes.split_at(bytes.len() - CRC_LEN);
        let stored = u32::from_le_bytes([tail[0], tail[1], tail[2], tail[3]]);
        if CRC32.checksum(body) != stored {
            return Err(RecordError::ChecksumMismatch);
        }

        let record: Self = postcard::from_bytes(body).map_err(|_| RecordError::Deserialize)?;

        if record.magic != RECORD_MAGIC {
            return Err(RecordError::BadMagic);
        }
        if record.version != RECORD_VERSION {
            return Err(RecordError::VersionMismatch);
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CredentialField, API_KEY_LEN, FEED_NAME_LEN, USERNAME_LEN};

    fn provisioned() -> CredentialSet {
        CredentialSet::from_values("alice", "aio_0123456789abcdef", "office-co2").unwrap()
    }

    #[test]
    fn test_record_round_trip() {
        let record = CredentialRecord::new(provisioned());
        let mut buf = [0u8; MAX_RECORD_SIZE];
        let encoded = record.encode(&mut buf).unwrap();

        let decoded = CredentialRecord::decode(encoded).unwrap();
        assert_eq!(decoded, record);
        assert_eq!(decoded.credentials.feed_name(), "office-co2");
    }

    #[test]
    fn test_full_record_fits_bound() {
        let mut set = CredentialSet::new();
        set.set(CredentialField::Username, &"u".repeat(USERNAME_LEN)).unwrap();
        set.set(CredentialField::ApiKey, &"k".repeat(API_KEY_LEN)).unwrap();
        set.set(CredentialField::FeedName, &"f".repeat(FEED_NAME_LEN)).unwrap();

        let mut buf = [0u8; MAX_RECORD_SIZE];
        let encoded = CredentialRecord::new(set).encode(&mut buf).unwrap();
        assert!(encoded.len() <= MAX_RECORD_SIZE);
    }

    #[test]
    fn test_flipped_byte_detected() {
        let mut buf = [0u8; MAX_RECORD_SIZE];
        let len = CredentialRecord::new(provisioned())
            .encode(&mut buf)
            .unwrap()
            .len();

        buf[len / 2] ^= 0x01;
        assert_eq!(
            CredentialRecord::decode(&buf[..len]),
            Err(RecordError::ChecksumMismatch)
        );
    }

    #[test]
    fn test_truncated_input() {
        assert_eq!(CredentialRecord::decode(&[]), Err(RecordError::Truncated));
        assert_eq!(
            CredentialRecord::decode(&[1, 2, 3, 4]),
            Err(RecordError::Truncated)
        );
    }

    #[test]
    fn test_small_buffer() {
        let record = CredentialRecord::new(provisioned());
        let mut tiny = [0u8; 8];
        assert_eq!(record.encode(&mut tiny), Err(RecordError::BufferTooSmall));
        let mut none = [0u8; 2];
        assert_eq!(record.encode(&mut none), Err(RecordError::BufferTooSmall));
    }

    #[test]
    fn test_wrong_magic_and_version() {
        let mut buf = [0u8; MAX_RECORD_SIZE];

        let mut record = CredentialRecord::new(provisioned());
        record.magic = 0xDEAD_BEEF;
        let encoded = record.encode(&mut buf).unwrap();
        assert_eq!(CredentialRecord::decode(encoded), Err(RecordError::BadMagic));

        let mut record = CredentialRecord::new(provisioned());
        record.version = RECORD_VERSION + 1;
        let encoded = record.encode(&mut buf).unwrap();
        assert_eq!(
            CredentialRecord::decode(encoded),
            Err(RecordError::VersionMismatch)
        );
    }
}
