//! Adafruit IO credential fields
//!
//! The username, API key, and feed name are the only values set after the
//! firmware is built. Each field is a [`heapless::String`] whose capacity is
//! part of its type, so an oversized value can never be stored; writes that
//! do not fit are rejected and leave the previous value in place.

use heapless::String;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Username capacity in bytes
pub const USERNAME_LEN: usize = 20;

/// API key capacity in bytes
pub const API_KEY_LEN: usize = 50;

/// Feed name capacity in bytes
pub const FEED_NAME_LEN: usize = 20;

/// Factory placeholder for the username
pub const USERNAME_PLACEHOLDER: &str = "YOUR AIO USERNAME";

/// Factory placeholder for the API key
pub const API_KEY_PLACEHOLDER: &str = "YOUR ADAFRUIT API KEY";

/// Factory placeholder for the feed name
pub const FEED_NAME_PLACEHOLDER: &str = "YOUR FEED NAME";

const _: () = assert!(USERNAME_PLACEHOLDER.len() <= USERNAME_LEN);
const _: () = assert!(API_KEY_PLACEHOLDER.len() <= API_KEY_LEN);
const _: () = assert!(FEED_NAME_PLACEHOLDER.len() <= FEED_NAME_LEN);

/// One of the provisionable credential fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CredentialField {
    Username,
    ApiKey,
    FeedName,
}

impl CredentialField {
    /// All fields, in provisioning order
    pub const ALL: [CredentialField; 3] = [
        CredentialField::Username,
        CredentialField::ApiKey,
        CredentialField::FeedName,
    ];

    /// Label used by the provisioning portal for this field
    pub const fn label(self) -> &'static str {
        match self {
            CredentialField::Username => "AIO_Username",
            CredentialField::ApiKey => "AIO_API_Key",
            CredentialField::FeedName => "AIO_Feed_Name",
        }
    }

    /// Maximum value length in bytes
    pub const fn capacity(self) -> usize {
        match self {
            CredentialField::Username => USERNAME_LEN,
            CredentialField::ApiKey => API_KEY_LEN,
            CredentialField::FeedName => FEED_NAME_LEN,
        }
    }

    /// Factory placeholder value
    pub const fn placeholder(self) -> &'static str {
        match self {
            CredentialField::Username => USERNAME_PLACEHOLDER,
            CredentialField::ApiKey => API_KEY_PLACEHOLDER,
            CredentialField::FeedName => FEED_NAME_PLACEHOLDER,
        }
    }

    /// Look up a field by its portal label (exact match)
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.label() == label)
    }
}

/// Provisioned Adafruit IO credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CredentialSet {
    username: String<USERNAME_LEN>,
    api_key: String<API_KEY_LEN>,
    feed_name: String<FEED_NAME_LEN>,
}

impl Default for CredentialSet {
    fn default() -> Self {
        Self {
            username: String::try_from(USERNAME_PLACEHOLDER).unwrap_or_default(),
            api_key: String::try_from(API_KEY_PLACEHOLDER).unwrap_or_default(),
            feed_name: String::try_from(FEED_NAME_PLACEHOLDER).unwrap_or_default(),
        }
    }
}

impl CredentialSet {
    /// Credentials holding the factory placeholders
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from explicit values
    pub fn from_values(username: &str, api_key: &str, feed_name: &str) -> Result<Self, ConfigError> {
        let mut set = Self::default();
        set.set(CredentialField::Username, username)?;
        set.set(CredentialField::ApiKey, api_key)?;
        set.set(CredentialField::FeedName, feed_name)?;
        Ok(set)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn feed_name(&self) -> &str {
        &self.feed_name
    }

    /// Read a field
    pub fn get(&self, field: CredentialField) -> &str {
        match field {
            CredentialField::Username => &self.username,
            CredentialField::ApiKey => &self.api_key,
            CredentialField::FeedName => &self.feed_name,
        }
    }

    /// Overwrite a field
    ///
    /// Fails with [`ConfigError::TooLong`] if `value` exceeds the field's
    /// capacity; the field keeps its previous value in that case.
    pub fn set(&mut self, field: CredentialField, value: &str) -> Result<(), ConfigError> {
        match field {
            CredentialField::Username => assign(&mut self.username, field, value),
            CredentialField::ApiKey => assign(&mut self.api_key, field, value),
            CredentialField::FeedName => assign(&mut self.feed_name, field, value),
        }
    }

    /// Overwrite the field registered under a portal label
    pub fn set_by_label(&mut self, label: &str, value: &str) -> Result<CredentialField, ConfigError> {
        let field = CredentialField::from_label(label).ok_or(ConfigError::UnknownLabel)?;
        self.set(field, value)?;
        Ok(field)
    }

    /// Iterate over `(field, value)` pairs
    pub fn fields(&self) -> impl Iterator<Item = (CredentialField, &str)> + '_ {
        CredentialField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }

    /// True once every field has been changed from its factory placeholder
    /// to a non-empty value
    pub fn is_provisioned(&self) -> bool {
        self.fields()
            .all(|(field, value)| !value.is_empty() && value != field.placeholder())
    }
}

fn assign<const N: usize>(
    slot: &mut String<N>,
    field: CredentialField,
    value: &str,
) -> Result<(), ConfigError> {
    let bounded = String::try_from(value).map_err(|_| ConfigError::TooLong {
        field,
        capacity: N,
    })?;
    *slot = bounded;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults_are_placeholders() {
        let set = CredentialSet::new();
        for (field, value) in set.fields() {
            assert_eq!(value, field.placeholder());
            assert!(value.len() <= field.capacity());
        }
        assert!(!set.is_provisioned());
    }

    #[test]
    fn test_labels() {
        assert_eq!(CredentialField::Username.label(), "AIO_Username");
        assert_eq!(CredentialField::ApiKey.label(), "AIO_API_Key");
        assert_eq!(CredentialField::FeedName.label(), "AIO_Feed_Name");
        assert_eq!(
            CredentialField::from_label("AIO_Feed_Name"),
            Some(CredentialField::FeedName)
        );
        assert_eq!(CredentialField::from_label("aio_feed_name"), None);
    }

    #[test]
    fn test_set_by_label() {
        let mut set = CredentialSet::new();
        assert_eq!(
            set.set_by_label("AIO_Username", "alice"),
            Ok(CredentialField::Username)
        );
        assert_eq!(set.username(), "alice");
        assert_eq!(
            set.set_by_label("AIO_Password", "x"),
            Err(ConfigError::UnknownLabel)
        );
    }

    #[test]
    fn test_oversized_value_rejected() {
        let mut set = CredentialSet::new();
        set.set(CredentialField::FeedName, "office-co2").unwrap();

        let too_long = "this-feed-name-is-too-long";
        assert_eq!(
            set.set(CredentialField::FeedName, too_long),
            Err(ConfigError::TooLong {
                field: CredentialField::FeedName,
                capacity: FEED_NAME_LEN,
            })
        );
        assert_eq!(set.feed_name(), "office-co2");
    }

    #[test]
    fn test_exact_capacity_accepted() {
        let mut set = CredentialSet::new();
        let key = "k".repeat(API_KEY_LEN);
        assert!(set.set(CredentialField::ApiKey, &key).is_ok());
        assert_eq!(set.api_key().len(), API_KEY_LEN);
    }

    #[test]
    fn test_provisioned() {
        let set = CredentialSet::from_values("alice", "aio_abc123", "co2").unwrap();
        assert!(set.is_provisioned());

        let mut partial = set.clone();
        partial.set(CredentialField::ApiKey, "").unwrap();
        assert!(!partial.is_provisioned());
    }

    proptest! {
        #[test]
        fn prop_field_never_exceeds_capacity(value in "\\PC{0,80}") {
            let mut set = CredentialSet::new();
            for field in CredentialField::ALL {
                let before = set.get(field).len();
                match set.set(field, &value) {
                    Ok(()) => prop_assert_eq!(set.get(field), value.as_str()),
                    Err(_) => {
                        prop_assert!(value.len() > field.capacity());
                        prop_assert_eq!(set.get(field).len(), before);
                    }
                }
                prop_assert!(set.get(field).len() <= field.capacity());
            }
        }
    }
}
