//! Wear-levelled configuration storage over NOR flash
//!
//! Uses sequential-storage for key/value storage in a dedicated flash
//! range. Any flash implementing the `embedded-storage-async` NOR traits
//! can be used; on the ESP8266 this is the sector range the Arduino core
//! reserves for its EEPROM emulation.

use core::ops::Range;

use embedded_storage_async::nor_flash::MultiwriteNorFlash;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

use crate::storage::{ConfigStorage, StorageError, StorageKey};

/// Largest item (key + value) the storage will read or write
pub const MAX_ITEM_SIZE: usize = 1024;

/// NOR flash backed configuration storage
pub struct NorFlashStorage<F> {
    flash: F,
    range: Range<u32>,
}

impl<F: MultiwriteNorFlash> NorFlashStorage<F> {
    /// Create a new storage over `range` of `flash`
    ///
    /// The range must be aligned to the flash erase size and span at least
    /// two erase blocks.
    pub fn new(flash: F, range: Range<u32>) -> Self {
        Self { flash, range }
    }

    /// The flash range holding configuration data
    pub fn range(&self) -> Range<u32> {
        self.range.clone()
    }

    /// Get the raw flash for low-level access
    pub fn flash(&mut self) -> &mut F {
        &mut self.flash
    }

    /// Consume the storage and return the flash
    pub fn release(self) -> F {
        self.flash
    }
}

fn map_error<E>(error: sequential_storage::Error<E>) -> StorageError {
    match error {
        sequential_storage::Error::Storage { .. } => StorageError::Flash,
        sequential_storage::Error::FullStorage => StorageError::Full,
        sequential_storage::Error::Corrupted { .. } => StorageError::Corrupted,
        _ => StorageError::Storage,
    }
}

impl<F: MultiwriteNorFlash> ConfigStorage for NorFlashStorage<F> {
    async fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, StorageError> {
        let mut data_buffer = [0u8; MAX_ITEM_SIZE];

        let result = map::fetch_item::<StorageKey, &[u8], _>(
            &mut self.flash,
            self.range.clone(),
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
        )
        .await;

        match result {
            Ok(Some(data)) => {
                let len = data.len();
                if buffer.len() < len {
                    return Err(StorageError::BufferTooSmall);
                }
                buffer[..len].copy_from_slice(data);
                Ok(len)
            }
            Ok(None) => Err(StorageError::NotFound),
            Err(e) => Err(map_error(e)),
        }
    }

    async fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), StorageError> {
        if data.len() >= MAX_ITEM_SIZE {
            return Err(StorageError::BufferTooSmall);
        }
        let mut data_buffer = [0u8; MAX_ITEM_SIZE];

        map::store_item(
            &mut self.flash,
            self.range.clone(),
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
            &data,
        )
        .await
        .map_err(map_error)
    }

    async fn exists(&mut self, key: StorageKey) -> bool {
        let mut data_buffer = [0u8; MAX_ITEM_SIZE];

        matches!(
            map::fetch_item::<StorageKey, &[u8], _>(
                &mut self.flash,
                self.range.clone(),
                &mut NoCache::new(),
                &mut data_buffer,
                &key,
            )
            .await,
            Ok(Some(_))
        )
    }

    async fn remove(&mut self, key: StorageKey) -> Result<(), StorageError> {
        let mut data_buffer = [0u8; MAX_ITEM_SIZE];

        map::remove_item(
            &mut self.flash,
            self.range.clone(),
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
        )
        .await
        .map_err(map_error)
    }

    async fn erase_all(&mut self) -> Result<(), StorageError> {
        sequential_storage::erase_all(&mut self.flash, self.range.clone())
            .await
            .map_err(map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embedded_storage_async::nor_flash::{
        ErrorType, NorFlash, NorFlashErrorKind, ReadNorFlash,
    };

    const PAGE_SIZE: usize = 1024;
    const PAGES: usize = 4;
    const CAPACITY: usize = PAGE_SIZE * PAGES;

    /// RAM model of a NOR flash: erase sets bytes to 0xFF, writes can only
    /// clear bits.
    struct RamFlash {
        bytes: [u8; CAPACITY],
    }

    impl RamFlash {
        fn new() -> Self {
            Self {
                bytes: [0xFF; CAPACITY],
            }
        }

        fn check(&self, offset: u32, len: usize) -> Result<(usize, usize), NorFlashErrorKind> {
            let start = offset as usize;
            let end = start + len;
            if end > CAPACITY {
                return Err(NorFlashErrorKind::OutOfBounds);
            }
            Ok((start, end))
        }
    }

    impl ErrorType for RamFlash {
        type Error = NorFlashErrorKind;
    }

    impl ReadNorFlash for RamFlash {
        const READ_SIZE: usize = 1;

        async fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
            let (start, end) = self.check(offset, bytes.len())?;
            bytes.copy_from_slice(&self.bytes[start..end]);
            Ok(())
        }

        fn capacity(&self) -> usize {
            CAPACITY
        }
    }

    impl NorFlash for RamFlash {
        const WRITE_SIZE: usize = 4;
        const ERASE_SIZE: usize = PAGE_SIZE;

        async fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
            let (start, end) = self.check(from, (to - from) as usize)?;
            if start % PAGE_SIZE != 0 || end % PAGE_SIZE != 0 {
                return Err(NorFlashErrorKind::NotAligned);
            }
            self.bytes[start..end].fill(0xFF);
            Ok(())
        }

        async fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
            let (start, end) = self.check(offset, bytes.len())?;
            for (dst, src) in self.bytes[start..end].iter_mut().zip(bytes) {
                *dst &= *src;
            }
            Ok(())
        }
    }

    impl MultiwriteNorFlash for RamFlash {}

    fn storage() -> NorFlashStorage<RamFlash> {
        NorFlashStorage::new(RamFlash::new(), 0..CAPACITY as u32)
    }

    #[test]
    fn test_missing_key_is_not_found() {
        let mut storage = storage();
        let mut buf = [0u8; 32];
        assert_eq!(
            block_on(storage.read(StorageKey::Credentials, &mut buf)),
            Err(StorageError::NotFound)
        );
        assert!(!block_on(storage.exists(StorageKey::Credentials)));
    }

    #[test]
    fn test_write_then_read() {
        let mut storage = storage();
        block_on(storage.write(StorageKey::ConfigToml, b"[timing]\nwarm_up_s = 45\n")).unwrap();

        let mut buf = [0u8; 64];
        let len = block_on(storage.read(StorageKey::ConfigToml, &mut buf)).unwrap();
        assert_eq!(&buf[..len], b"[timing]\nwarm_up_s = 45\n");
        assert!(block_on(storage.exists(StorageKey::ConfigToml)));
        assert!(!block_on(storage.exists(StorageKey::Credentials)));
    }

    #[test]
    fn test_latest_write_wins() {
        let mut storage = storage();
        block_on(storage.write(StorageKey::Credentials, b"first")).unwrap();
        block_on(storage.write(StorageKey::Credentials, b"second")).unwrap();

        let mut buf = [0u8; 16];
        let len = block_on(storage.read(StorageKey::Credentials, &mut buf)).unwrap();
        assert_eq!(&buf[..len], b"second");
    }

    #[test]
    fn test_read_into_short_buffer() {
        let mut storage = storage();
        block_on(storage.write(StorageKey::Credentials, b"0123456789")).unwrap();

        let mut buf = [0u8; 4];
        assert_eq!(
            block_on(storage.read(StorageKey::Credentials, &mut buf)),
            Err(StorageError::BufferTooSmall)
        );
    }

    #[test]
    fn test_remove_and_erase() {
        let mut storage = storage();
        block_on(storage.write(StorageKey::Credentials, b"abc")).unwrap();
        block_on(storage.write(StorageKey::ConfigToml, b"def")).unwrap();

        block_on(storage.remove(StorageKey::Credentials)).unwrap();
        assert!(!block_on(storage.exists(StorageKey::Credentials)));
        assert!(block_on(storage.exists(StorageKey::ConfigToml)));

        block_on(storage.erase_all()).unwrap();
        assert!(!block_on(storage.exists(StorageKey::ConfigToml)));
    }

    #[test]
    fn test_oversized_write_rejected() {
        let mut storage = storage();
        let data = [0x55u8; MAX_ITEM_SIZE];
        assert_eq!(
            block_on(storage.write(StorageKey::ConfigToml, &data)),
            Err(StorageError::BufferTooSmall)
        );
    }
}
