//! Resource tags.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::errors::TagError;

pub const MAX_TAGS: usize = 50;
const MAX_KEY_LEN: usize = 128;
const MAX_VALUE_LEN: usize = 256;

/// A key/value tag. Config files use `key`/`value`; templates use `Key`/`Value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tag {
    #[serde(rename(serialize = "Key"))]
    pub key: String,
    #[serde(rename(serialize = "Value"))]
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Result<Self, TagError> {
        let tag = Self {
            key: key.into(),
            value: value.into(),
        };
        tag.validate()?;
        Ok(tag)
    }

    pub fn validate(&self) -> Result<(), TagError> {
        let key_len = self.key.chars().count();
        if key_len == 0 || key_len > MAX_KEY_LEN {
            return Err(TagError::KeyLength(key_len));
        }
        if self.key.to_ascii_lowercase().starts_with("aws:") {
            return Err(TagError::ReservedPrefix(self.key.clone()));
        }
        let value_len = self.value.chars().count();
        if value_len > MAX_VALUE_LEN {
            return Err(TagError::ValueLength {
                key: self.key.clone(),
                len: value_len,
            });
        }
        Ok(())
    }
}

/// Checks a whole tag list: each tag, the count, and key uniqueness.
/// Order is preserved as given.
pub fn validate_tags(tags: &[Tag]) -> Result<(), TagError> {
    if tags.len() > MAX_TAGS {
        return Err(TagError::TooMany(tags.len()));
    }
    let mut seen = BTreeSet::new();
    for tag in tags {
        tag.validate()?;
        if !seen.insert(tag.key.as_str()) {
            return Err(TagError::DuplicateKey(tag.key.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_capitalised_keys() {
        let tag = Tag::new("Environment", "Production").unwrap();
        assert_eq!(
            serde_json::to_string(&tag).unwrap(),
            r#"{"Key":"Environment","Value":"Production"}"#
        );
    }

    #[test]
    fn rejects_reserved_and_oversized() {
        assert_eq!(
            Tag::new("aws:createdBy", "me").unwrap_err(),
            TagError::ReservedPrefix("aws:createdBy".into())
        );
        assert_eq!(Tag::new("", "x").unwrap_err(), TagError::KeyLength(0));
        assert!(matches!(
            Tag::new("k", "v".repeat(257)),
            Err(TagError::ValueLength { len: 257, .. })
        ));
    }

    #[test]
    fn list_rejects_duplicate_keys() {
        let tags = vec![
            Tag::new("Environment", "Production").unwrap(),
            Tag::new("Environment", "Staging").unwrap(),
        ];
        assert_eq!(
            validate_tags(&tags).unwrap_err(),
            TagError::DuplicateKey("Environment".into())
        );
    }

    #[test]
    fn list_rejects_more_than_fifty() {
        let tags: Vec<Tag> = (0..51)
            .map(|i| Tag::new(format!("k{i}"), "v").unwrap())
            .collect();
        assert_eq!(validate_tags(&tags).unwrap_err(), TagError::TooMany(51));
    }
}
