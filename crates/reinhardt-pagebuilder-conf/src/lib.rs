//! # Reinhardt Page Builder Settings
//!
//! Layered configuration for the page builder runtime.
//!
//! Settings start from [`Settings::default`] and are overridden, key by key,
//! by each [`ConfigSource`] in ascending priority:
//!
//! 1. a TOML file ([`TomlFileSource`])
//! 2. `PAGEBUILDER_*` environment variables ([`EnvSource`])
//! 3. programmatic overrides ([`MemorySource`])
//!
//! ```
//! use reinhardt_pagebuilder_conf::{Environment, MemorySource, Settings};
//!
//! let settings = Settings::builder()
//! 	.add_source(MemorySource::new().set("environment", "development"))
//! 	.build()
//! 	.unwrap();
//!
//! assert_eq!(settings.environment, Environment::Development);
//! assert!(settings.dev_validation_enabled());
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod settings;
pub mod sources;

pub use error::{SettingsError, SettingsResult};
pub use settings::{Environment, Settings, SettingsBuilder};
pub use sources::{ConfigSource, ENV_PREFIX, EnvSource, MemorySource, TomlFileSource};
