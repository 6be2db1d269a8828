//! Location model.
//!
//! A named point in the municipality. Corridors connect two locations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};

/// An immutable named location.
///
/// Identity and ordering are by name. The name is reference counted so the
/// many corridors and traffic entries that mention a location share it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Location {
    name: Arc<str>,
}

impl Location {
    /// Creates a location. Fails if `name` is empty.
    pub fn new(name: impl AsRef<str>) -> Result<Self> {
        let name = name.as_ref();
        if name.is_empty() {
            return Err(Error::invalid_argument("location name must not be empty"));
        }
        Ok(Self { name: name.into() })
    }

    /// Location name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl TryFrom<String> for Location {
    type Error = Error;

    fn try_from(name: String) -> Result<Self> {
        Self::new(name)
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        location.name.to_string()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
