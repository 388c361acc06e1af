//! Persistent storage abstractions
//!
//! Provides the key/value storage trait that replaces the monitor's raw
//! EEPROM access. Implementations handle wear levelling and integrity.

use core::future::Future;

/// Storage keys for configuration data
///
/// Each key holds one independent blob. The configuration layer decides
/// the encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Provisioned credential record (postcard + CRC)
    Credentials = 0,
    /// Deployer TOML overlay as UTF-8 text
    ConfigToml = 1,
}

impl StorageKey {
    /// Every key, in numeric order
    pub const ALL: [StorageKey; 2] = [StorageKey::Credentials, StorageKey::ConfigToml];

    /// Get the key as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a key from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageKey::Credentials),
            1 => Some(StorageKey::ConfigToml),
            _ => None,
        }
    }
}

/// Errors from storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Underlying flash operation failed
    Flash,
    /// Storage layer failed
    Storage,
    /// Key not found
    NotFound,
    /// Buffer too small for the data
    BufferTooSmall,
    /// Data corrupted or invalid
    Corrupted,
    /// Storage is full
    Full,
}

/// Configuration storage trait
///
/// Key/value storage for configuration blobs. Implementations should handle:
/// - Wear levelling across erase blocks
/// - Data integrity of individual items
/// - Atomic replacement of a key's value
pub trait ConfigStorage {
    /// Read a value by key into the provided buffer
    ///
    /// # Returns
    /// The number of bytes read, or [`StorageError::NotFound`] if the key was
    /// never written (or has been removed).
    fn read(
        &mut self,
        key: StorageKey,
        buffer: &mut [u8],
    ) -> impl Future<Output = Result<usize, StorageError>>;

    /// Write a value by key, replacing any previous value
    fn write(&mut self, key: StorageKey, data: &[u8])
        -> impl Future<Output = Result<(), StorageError>>;

    /// Check if a key exists in storage
    fn exists(&mut self, key: StorageKey) -> impl Future<Output = bool>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&mut self, key: StorageKey) -> impl Future<Output = Result<(), StorageError>>;

    /// Erase all stored data
    fn erase_all(&mut self) -> impl Future<Output = Result<(), StorageError>>;
}

impl sequential_storage::map::Key for StorageKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        buffer[0] = self.as_u8();
        Ok(1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        match StorageKey::from_u8(buffer[0]) {
            Some(key) => Ok((key, 1)),
            None => Err(sequential_storage::map::SerializationError::InvalidFormat),
        }
    }
}
