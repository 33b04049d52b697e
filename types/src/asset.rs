//! Asset identifiers.
//!
//! A project pays out either in the base currency itself or in an external
//! asset reached through the exchange. [`Asset`] makes that distinction a
//! tagged variant instead of a sentinel identifier.

use crate::error::TypeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of an external asset (e.g. a token contract or ticker).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetId(String);

impl AssetId {
    /// # Panics
    /// Panics on an empty, whitespace-bearing or reserved id.
    pub fn new(raw: impl Into<String>) -> Self {
        match Self::parse(raw) {
            Ok(id) => id,
            Err(e) => panic!("invalid asset id: {e}"),
        }
    }

    pub fn parse(raw: impl Into<String>) -> Result<Self, TypeError> {
        let s = raw.into();
        if s.is_empty() {
            return Err(TypeError::EmptyIdentifier);
        }
        if s.chars().any(char::is_whitespace) {
            return Err(TypeError::Whitespace(s));
        }
        if s.eq_ignore_ascii_case(Asset::NATIVE_TAG) {
            return Err(TypeError::ReservedAssetId(s));
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for AssetId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<AssetId> for String {
    fn from(id: AssetId) -> Self {
        id.0
    }
}

/// A denomination held in custody or paid out by a project.
///
/// Serialized as the string `"native"` for the base currency and as the
/// bare asset id otherwise.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Asset {
    /// The base currency deposits are made in. A project targeting it pays
    /// out without any conversion.
    Native,
    /// An asset reached by converting the pool through the exchange.
    External(AssetId),
}

impl Asset {
    pub const NATIVE_TAG: &'static str = "native";

    pub fn external(id: impl Into<String>) -> Self {
        Self::External(AssetId::new(id))
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }

    /// The external asset id, or `None` for the base currency.
    pub fn external_id(&self) -> Option<&AssetId> {
        match self {
            Self::Native => None,
            Self::External(id) => Some(id),
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => f.write_str(Self::NATIVE_TAG),
            Self::External(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for Asset {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case(Self::NATIVE_TAG) {
            Ok(Self::Native)
        } else {
            AssetId::parse(s).map(Self::External)
        }
    }
}

impl TryFrom<String> for Asset {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Asset> for String {
    fn from(asset: Asset) -> Self {
        asset.to_string()
    }
}
