//! Descriptive component metadata used for admin listing and grouping.

use crate::error::{RegistryError, RegistryResult};
use semver::Version;
use serde::{Deserialize, Serialize};

/// Category assigned when none is given.
pub const DEFAULT_CATEGORY: &str = "general";

/// Descriptive information about a component type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentMetadata {
	/// Grouping used by the components manager (e.g. `"layout"`).
	pub category: String,

	/// Short description shown in pickers.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,

	/// Icon identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub icon: Option<String>,

	/// Free-form search tags.
	#[serde(default)]
	pub tags: Vec<String>,

	/// Component version following Semantic Versioning 2.0.0.
	#[serde(with = "version_serde")]
	pub version: Version,
}

impl Default for ComponentMetadata {
	fn default() -> Self {
		Self {
			category: DEFAULT_CATEGORY.to_string(),
			description: None,
			icon: None,
			tags: Vec::new(),
			version: Version::new(1, 0, 0),
		}
	}
}

impl ComponentMetadata {
	/// Creates a metadata builder for the given category.
	///
	/// # Example
	///
	/// ```
	/// use reinhardt_pagebuilder_registry::ComponentMetadata;
	///
	/// let metadata = ComponentMetadata::builder("layout")
	/// 	.description("Full-width banner")
	/// 	.icon("image")
	/// 	.tag("hero")
	/// 	.version("2.1.0")
	/// 	.build()
	/// 	.unwrap();
	///
	/// assert_eq!(metadata.category, "layout");
	/// assert_eq!(metadata.version.major, 2);
	/// ```
	pub fn builder(category: impl Into<String>) -> ComponentMetadataBuilder {
		ComponentMetadataBuilder::new(category)
	}
}

/// Builder for [`ComponentMetadata`].
#[derive(Debug, Clone)]
pub struct ComponentMetadataBuilder {
	category: String,
	description: Option<String>,
	icon: Option<String>,
	tags: Vec<String>,
	version: String,
}

impl ComponentMetadataBuilder {
	/// Creates a new builder with version `1.0.0`.
	pub fn new(category: impl Into<String>) -> Self {
		Self {
			category: category.into(),
			description: None,
			icon: None,
			tags: Vec::new(),
			version: "1.0.0".to_string(),
		}
	}

	/// Sets the description.
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Sets the icon identifier.
	pub fn icon(mut self, icon: impl Into<String>) -> Self {
		self.icon = Some(icon.into());
		self
	}

	/// Adds a tag.
	pub fn tag(mut self, tag: impl Into<String>) -> Self {
		self.tags.push(tag.into());
		self
	}

	/// Sets the version string (semver).
	pub fn version(mut self, version: impl AsRef<str>) -> Self {
		self.version = version.as_ref().to_string();
		self
	}

	/// Builds the metadata.
	///
	/// A blank category falls back to [`DEFAULT_CATEGORY`].
	///
	/// # Errors
	///
	/// Returns [`RegistryError::InvalidVersion`] if the version string is not
	/// valid semver.
	pub fn build(self) -> RegistryResult<ComponentMetadata> {
		let version = Version::parse(self.version.trim())
			.map_err(|e| RegistryError::InvalidVersion(format!("{}: {}", self.version, e)))?;

		let category = match self.category.trim() {
			"" => DEFAULT_CATEGORY.to_string(),
			category => category.to_string(),
		};

		Ok(ComponentMetadata {
			category,
			description: self.description,
			icon: self.icon,
			tags: self.tags,
			version,
		})
	}
}

/// Serde support for semver::Version.
mod version_serde {
	use semver::Version;
	use serde::{Deserialize, Deserializer, Serialize, Serializer};

	pub(super) fn serialize<S>(version: &Version, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		version.to_string().serialize(serializer)
	}

	pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Version, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		Version::parse(&s).map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_builder_defaults() {
		// Act
		let metadata = ComponentMetadata::builder("content").build().unwrap();

		// Assert
		assert_eq!(metadata.category, "content");
		assert_eq!(metadata.version, Version::new(1, 0, 0));
		assert!(metadata.tags.is_empty());
		assert!(metadata.description.is_none());
	}

	#[rstest]
	fn test_blank_category_falls_back() {
		// Act
		let metadata = ComponentMetadata::builder("  ").build().unwrap();

		// Assert
		assert_eq!(metadata.category, DEFAULT_CATEGORY);
	}

	#[rstest]
	#[case("1")]
	#[case("one.two.three")]
	#[case("")]
	fn test_invalid_version(#[case] version: &str) {
		// Act
		let result = ComponentMetadata::builder("layout").version(version).build();

		// Assert
		assert!(matches!(result, Err(RegistryError::InvalidVersion(_))));
	}

	#[rstest]
	fn test_version_serializes_as_string() {
		// Arrange
		let metadata = ComponentMetadata::builder("layout")
			.version("0.3.1-beta.1")
			.tag("hero")
			.build()
			.unwrap();

		// Act
		let json = serde_json::to_value(&metadata).unwrap();
		let back: ComponentMetadata = serde_json::from_value(json.clone()).unwrap();

		// Assert
		assert_eq!(json["version"], "0.3.1-beta.1");
		assert_eq!(back, metadata);
	}
}
