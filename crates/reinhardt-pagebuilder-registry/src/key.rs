//! Normalized component type identifiers.

use crate::error::{RegistryError, RegistryResult};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Canonical registry key for a component type.
///
/// Keys are trimmed and lowercased, so `"HeroSection"`, `" heroSection "` and
/// `"HEROSECTION"` all address the same registry entry. The original spelling
/// is kept separately on [`RegisteredComponent`](crate::RegisteredComponent).
///
/// # Examples
///
/// ```
/// use reinhardt_pagebuilder_registry::ComponentKey;
///
/// let key = ComponentKey::new(" HeroSection ").unwrap();
/// assert_eq!(key.as_str(), "herosection");
/// assert_eq!(key, ComponentKey::new("heroSection").unwrap());
/// assert!(ComponentKey::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComponentKey(String);

impl ComponentKey {
	/// Normalizes a type name into a key.
	///
	/// # Errors
	///
	/// Returns [`RegistryError::EmptyTypeName`] if nothing remains after
	/// trimming.
	pub fn new(name: impl AsRef<str>) -> RegistryResult<Self> {
		normalize(name.as_ref())
			.map(Self)
			.ok_or(RegistryError::EmptyTypeName)
	}

	/// Returns the normalized key.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

/// Applies the key normalization rule without allocating a key.
///
/// Returns `None` for blank names.
pub(crate) fn normalize(name: &str) -> Option<String> {
	let trimmed = name.trim();
	if trimmed.is_empty() {
		None
	} else {
		Some(trimmed.to_lowercase())
	}
}

impl fmt::Display for ComponentKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for ComponentKey {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for ComponentKey {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl TryFrom<String> for ComponentKey {
	type Error = RegistryError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}

impl From<ComponentKey> for String {
	fn from(key: ComponentKey) -> Self {
		key.0
	}
}
