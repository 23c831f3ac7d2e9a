//! Versioning of the binary tournament format.
//!
//! The first byte of every encoding is the version tag. Any change to field
//! order, enum indices or bit widths needs a new version.

use super::errors::{CodecError, CodecResult};

/// Binary format version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatVersion {
    /// V1: bit-packed header, optional name and court sections
    V1,
}

impl FormatVersion {
    /// The version written by this build
    pub fn current() -> Self {
        FormatVersion::V1
    }

    pub fn tag(self) -> u8 {
        match self {
            FormatVersion::V1 => 1,
        }
    }

    pub fn from_tag(tag: u8) -> CodecResult<Self> {
        match tag {
            1 => Ok(FormatVersion::V1),
            other => Err(CodecError::UnsupportedVersion(other)),
        }
    }
}

impl Default for FormatVersion {
    fn default() -> Self {
        Self::current()
    }
}
