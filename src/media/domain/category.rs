//! Upload categories and the buckets they map to.

use super::MediaDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of uploaded file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadCategory {
    /// Photo taken at the venue.
    #[default]
    Image,
    /// Screenshot of the published review.
    Screenshot,
}

impl UploadCategory {
    /// Returns the upload form value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Screenshot => "screenshot",
        }
    }

    /// Returns the bucket files of this kind are stored in.
    #[must_use]
    pub const fn bucket(self) -> &'static str {
        match self {
            Self::Image => "images",
            Self::Screenshot => "screenshots",
        }
    }

    /// Resolves a bucket name back to its category.
    ///
    /// # Errors
    ///
    /// Returns [`MediaDomainError::UnknownBucket`] for any other name.
    pub fn from_bucket(bucket: &str) -> Result<Self, MediaDomainError> {
        match bucket {
            "images" => Ok(Self::Image),
            "screenshots" => Ok(Self::Screenshot),
            _ => Err(MediaDomainError::UnknownBucket(bucket.to_owned())),
        }
    }
}

impl TryFrom<&str> for UploadCategory {
    type Error = MediaDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(Self::Image),
            "screenshot" => Ok(Self::Screenshot),
            _ => Err(MediaDomainError::UnknownCategory(value.to_owned())),
        }
    }
}

impl fmt::Display for UploadCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
