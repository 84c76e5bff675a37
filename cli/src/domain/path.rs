//! Remote filesystem paths and artifact search parameters.
//!
//! Pure value types: nothing here talks to a device.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::InputError;

/// A location in the device's filesystem namespace. Never empty.
///
/// No escaping or normalisation is applied beyond what the transport does;
/// use [`shell_quote`] when interpolating into a shell command.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RemotePath(String);

impl RemotePath {
    /// # Errors
    ///
    /// Returns [`InputError::EmptyPath`] for an empty string.
    pub fn new(path: impl Into<String>) -> Result<Self, InputError> {
        let path = path.into();
        if path.is_empty() {
            return Err(InputError::EmptyPath);
        }
        Ok(Self(path))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append a child entry name, inserting exactly one `/` separator.
    #[must_use]
    pub fn join(&self, name: &str) -> Self {
        let name = name.trim_start_matches('/');
        if self.0.ends_with('/') {
            Self(format!("{}{name}", self.0))
        } else {
            Self(format!("{}/{name}", self.0))
        }
    }

    /// `true` when the trailing path segment is exactly `name`.
    ///
    /// This is an exact suffix check on `"/" + name`, not a glob.
    #[must_use]
    pub fn ends_with_segment(&self, name: &str) -> bool {
        self.0
            .strip_suffix(name)
            .is_some_and(|head| head.ends_with('/'))
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RemotePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RemotePath {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RemotePath> for String {
    fn from(path: RemotePath) -> Self {
        path.0
    }
}

/// What the artifact locator looks for: a file named `name` anywhere below `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpec {
    root: RemotePath,
    name: String,
}

impl SearchSpec {
    /// # Errors
    ///
    /// Returns [`InputError::EmptyName`] when `name` is empty.
    pub fn new(root: RemotePath, name: impl Into<String>) -> Result<Self, InputError> {
        let name = name.into();
        if name.is_empty() {
            return Err(InputError::EmptyName);
        }
        Ok(Self { root, name })
    }

    #[must_use]
    pub fn root(&self) -> &RemotePath {
        &self.root
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Leaf match test used by the locator.
    #[must_use]
    pub fn matches(&self, candidate: &RemotePath) -> bool {
        candidate.ends_with_segment(&self.name)
    }
}

/// Quote `s` for a POSIX shell using single quotes.
#[must_use]
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}
