//! Release descriptors as published by the release catalog

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One known PHP release line.
///
/// Field names follow the catalog's JSON (`isFutureVersion`, `isEOLVersion`,
/// `isSecureVersion`); missing flags read as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseDescriptor {
    /// Version label as published, not guaranteed to be a valid version
    #[serde(default)]
    pub name: String,

    /// Not yet generally available
    #[serde(rename = "isFutureVersion", default)]
    pub is_future: bool,

    /// No longer maintained
    #[serde(rename = "isEOLVersion", default)]
    pub is_end_of_life: bool,

    /// Still receives security fixes
    #[serde(rename = "isSecureVersion", default)]
    pub is_secure: bool,
}

impl ReleaseDescriptor {
    /// A generally available, maintained release
    pub fn new(name: impl Into<String>) -> Self {
        ReleaseDescriptor {
            name: name.into(),
            is_future: false,
            is_end_of_life: false,
            is_secure: false,
        }
    }

    pub fn future(mut self, is_future: bool) -> Self {
        self.is_future = is_future;
        self
    }

    pub fn end_of_life(mut self, is_end_of_life: bool) -> Self {
        self.is_end_of_life = is_end_of_life;
        self
    }

    pub fn secure(mut self, is_secure: bool) -> Self {
        self.is_secure = is_secure;
        self
    }

    /// Whether `policy` considers this release supported
    pub fn is_supported(&self, policy: SupportPolicy) -> bool {
        match policy {
            SupportPolicy::SecureOrMaintained => self.is_secure || !self.is_end_of_life,
            SupportPolicy::SecureOnly => self.is_secure,
        }
    }
}

/// What counts as a supported release when unsupported ones are excluded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SupportPolicy {
    /// Secure, or not yet end-of-life
    #[default]
    SecureOrMaintained,
    /// Only releases still receiving security fixes
    SecureOnly,
}

impl SupportPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupportPolicy::SecureOrMaintained => "secure-or-maintained",
            SupportPolicy::SecureOnly => "secure-only",
        }
    }
}

impl fmt::Display for SupportPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SupportPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "secure-or-maintained" => Ok(SupportPolicy::SecureOrMaintained),
            "secure-only" => Ok(SupportPolicy::SecureOnly),
            _ => Err(format!(
                "invalid support policy \"{}\", expected secure-or-maintained or secure-only",
                s
            )),
        }
    }
}
