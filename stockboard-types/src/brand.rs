//! Brand identifiers for the fixed set of displayed sections.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Typed key identifying a brand section in a payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrandKey(Cow<'static, str>);

impl BrandKey {
    /// Apple iPhone listings.
    pub const IPHONE: Self = Self::new_static("iphone");
    /// OnePlus listings.
    pub const ONEPLUS: Self = Self::new_static("oneplus");
    /// Nothing listings.
    pub const NOTHING: Self = Self::new_static("nothing");
    /// Motorola listings.
    pub const MOTO: Self = Self::new_static("moto");
    /// iQOO listings.
    pub const IQOO: Self = Self::new_static("iqoo");
    /// Tecno listings.
    pub const TECNO: Self = Self::new_static("tecno");
    /// POCO listings.
    pub const POCO: Self = Self::new_static("poco");
    /// Infinix listings.
    pub const INFINIX: Self = Self::new_static("infinix");
    /// OPPO listings.
    pub const OPPO: Self = Self::new_static("oppo");
    /// Samsung listings.
    pub const SAMSUNG: Self = Self::new_static("samsung");
    /// Nokia listings.
    pub const NOKIA: Self = Self::new_static("nokia");

    /// Construct a key from a static name.
    #[must_use]
    pub const fn new_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Construct a key from an owned or borrowed name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Returns the key as it appears in payload documents.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The default display set, in section order.
    #[must_use]
    pub fn default_set() -> Vec<Self> {
        vec![
            Self::IPHONE,
            Self::ONEPLUS,
            Self::NOTHING,
            Self::MOTO,
            Self::IQOO,
            Self::TECNO,
            Self::POCO,
            Self::INFINIX,
            Self::OPPO,
            Self::SAMSUNG,
            Self::NOKIA,
        ]
    }
}

impl fmt::Display for BrandKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for BrandKey {
    fn from(name: &'static str) -> Self {
        Self::new_static(name)
    }
}
