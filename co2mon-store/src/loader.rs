//! Configuration persistence
//!
//! Loads the monitor configuration from storage, falling back to the
//! factory table for anything missing or unreadable.

use core::str;

use co2mon_core::config::{ConfigError, CredentialSet, MonitorConfig};
use co2mon_core::record::{CredentialRecord, RecordError, MAX_RECORD_SIZE};
use co2mon_hal::{ConfigStorage, StorageError, StorageKey};

use crate::overlay::{parse_overlay, ConfigOverlay, ParseError};

/// Maximum stored TOML overlay size
pub const MAX_TOML_SIZE: usize = 768;

/// Configuration persistence errors
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Storage operation failed
    Storage(StorageError),
    /// Credential record invalid
    Record(RecordError),
    /// TOML parsing failed
    Parse(ParseError),
    /// Overlay produced an invalid configuration
    Config(ConfigError),
    /// Invalid UTF-8 in TOML data
    InvalidUtf8,
    /// Overlay larger than [`MAX_TOML_SIZE`]
    TooLarge,
}

impl From<StorageError> for StoreError {
    fn from(e: StorageError) -> Self {
        StoreError::Storage(e)
    }
}

impl From<RecordError> for StoreError {
    fn from(e: RecordError) -> Self {
        StoreError::Record(e)
    }
}

impl From<ParseError> for StoreError {
    fn from(e: ParseError) -> Self {
        StoreError::Parse(e)
    }
}

impl From<ConfigError> for StoreError {
    fn from(e: ConfigError) -> Self {
        StoreError::Config(e)
    }
}

impl StoreError {
    /// True if the key was simply never written
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Storage(StorageError::NotFound))
    }
}

/// Configuration persistence manager
///
/// Owns the storage for the duration of startup and provisioning.
pub struct ConfigStore<S> {
    storage: S,
}

impl<S: ConfigStorage> ConfigStore<S> {
    /// Create a new config persistence manager
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Consume this manager and return the underlying storage
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Load the configuration
    ///
    /// Starts from `factory`, applies the stored TOML overlay, then the
    /// stored credentials. Missing entries are skipped; unreadable entries
    /// are logged and skipped. Never fails: the worst case is `factory`.
    pub async fn load(&mut self, factory: MonitorConfig) -> MonitorConfig {
        info!("Loading configuration from storage...");
        let mut config = factory.clone();

        match self.load_overlay().await {
            Ok(overlay) => match overlay.apply(&mut config) {
                Ok(()) => info!("Applied TOML overlay"),
                Err(e) => warn!("TOML overlay rejected: {:?}", e),
            },
            Err(e) if e.is_not_found() => debug!("No TOML overlay stored"),
            Err(e) => warn!("Failed to load TOML overlay: {:?}", e),
        }

        match self.load_credentials().await {
            Ok(credentials) => {
                info!("Loaded stored credentials");
                config.network.credentials = credentials;
            }
            Err(e) if e.is_not_found() => debug!("No stored credentials, using placeholders"),
            Err(e) => warn!("Failed to load credentials: {:?}", e),
        }

        if let Err(e) = config.validate() {
            error!("Loaded configuration invalid: {:?}, using factory table", e);
            return factory;
        }

        log_config_summary(&config);
        config
    }

    /// Load the stored overlay document
    pub async fn load_overlay(&mut self) -> Result<ConfigOverlay, StoreError> {
        let mut buffer = [0u8; MAX_TOML_SIZE];
        let len = self
            .storage
            .read(StorageKey::ConfigToml, &mut buffer)
            .await?;

        debug!("Read {} bytes of TOML from storage", len);

        let text = str::from_utf8(&buffer[..len]).map_err(|_| StoreError::InvalidUtf8)?;
        Ok(parse_overlay(text)?)
    }

    /// Load the stored credentials
    pub async fn load_credentials(&mut self) -> Result<CredentialSet, StoreError> {
        let mut buffer = [0u8; MAX_RECORD_SIZE];
        let len = self
            .storage
            .read(StorageKey::Credentials, &mut buffer)
            .await?;

        let record = CredentialRecord::decode(&buffer[..len])?;
        Ok(record.credentials)
    }

    /// Persist credentials set by the provisioning flow
    pub async fn save_credentials(&mut self, credentials: &CredentialSet) -> Result<(), StoreError> {
        let mut buffer = [0u8; MAX_RECORD_SIZE];
        let encoded = CredentialRecord::new(credentials.clone()).encode(&mut buffer)?;

        self.storage
            .write(StorageKey::Credentials, encoded)
            .await?;
        info!("Saved credentials ({} bytes)", encoded.len());
        Ok(())
    }

    /// Persist a TOML overlay document
    ///
    /// The document is parsed and checked against the factory table first;
    /// a document that would not load is never written.
    pub async fn save_overlay(&mut self, text: &str) -> Result<(), StoreError> {
        if text.len() > MAX_TOML_SIZE {
            return Err(StoreError::TooLarge);
        }

        let overlay = parse_overlay(text)?;
        overlay.apply(&mut MonitorConfig::factory())?;

        self.storage
            .write(StorageKey::ConfigToml, text.as_bytes())
            .await?;
        info!("Saved TOML overlay ({} bytes)", text.len());
        Ok(())
    }

    /// Forget the stored credentials
    pub async fn clear_credentials(&mut self) -> Result<(), StoreError> {
        self.storage.remove(StorageKey::Credentials).await?;
        info!("Cleared stored credentials");
        Ok(())
    }

    /// Erase everything, restoring the factory configuration on next load
    pub async fn erase(&mut self) -> Result<(), StoreError> {
        warn!("Erasing stored configuration");
        self.storage.erase_all().await?;
        Ok(())
    }
}

/// Log a summary of the loaded configuration
fn log_config_summary(config: &MonitorConfig) {
    info!("Configuration loaded successfully");
    debug!("  {} sensor(s)", config.sensor_count);
    debug!("  warm-up {} s", config.timing.warm_up_s);
    debug!(
        "  averaging {} s upload, {} s graph",
        config.timing.data_average_s,
        config.timing.graph_average_s
    );
    debug!("  {} LEDs", config.leds.count);
    debug!("  {} debug switches on", config.debug.enabled_count());
    if config.debug.mqtt {
        debug!(
            "  broker {}:{}",
            config.network.server.as_str(),
            config.network.port
        );
    }
    if !config.credentials().is_provisioned() {
        warn!("Credentials not provisioned, publishing disabled until setup");
    }
}
