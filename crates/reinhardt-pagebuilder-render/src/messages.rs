//! Localized system messages shown by the renderer.
//!
//! Two layers: built-in catalogs (English, Japanese, French) and runtime
//! overrides, typically loaded from a translations table. Lookup tries the
//! overrides before the built-ins for each candidate locale, in the order
//! requested locale, its language subtag, the default locale, English.

use std::collections::HashMap;
use std::fmt;

/// Message identifiers used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
	/// Diagnostic title for an unregistered type. Placeholder: `{type}`.
	UnknownComponent,
	/// Diagnostic title for a failed render.
	RenderError,
	/// Viewer-facing placeholder for a failed render.
	ContentUnavailable,
	/// Label of the retry action.
	Retry,
	/// Badge on hidden instances in edit mode.
	HiddenBadge,
}

impl MessageKey {
	/// Every key.
	pub const ALL: [MessageKey; 5] = [
		Self::UnknownComponent,
		Self::RenderError,
		Self::ContentUnavailable,
		Self::Retry,
		Self::HiddenBadge,
	];

	/// Catalog key.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::UnknownComponent => "unknown_component",
			Self::RenderError => "render_error",
			Self::ContentUnavailable => "content_unavailable",
			Self::Retry => "retry",
			Self::HiddenBadge => "hidden_badge",
		}
	}
}

impl fmt::Display for MessageKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

const FALLBACK_LOCALE: &str = "en";

fn builtin(locale: &str, key: MessageKey) -> Option<&'static str> {
	let text = match (locale, key) {
		("en", MessageKey::UnknownComponent) => "Unknown Component: {type}",
		("en", MessageKey::RenderError) => "Component failed to render",
		("en", MessageKey::ContentUnavailable) => "Content unavailable",
		("en", MessageKey::Retry) => "Retry",
		("en", MessageKey::HiddenBadge) => "Hidden",
		("ja", MessageKey::UnknownComponent) => "不明なコンポーネント: {type}",
		("ja", MessageKey::RenderError) => "コンポーネントの描画に失敗しました",
		("ja", MessageKey::ContentUnavailable) => "コンテンツを表示できません",
		("ja", MessageKey::Retry) => "再試行",
		("ja", MessageKey::HiddenBadge) => "非表示",
		("fr", MessageKey::UnknownComponent) => "Composant inconnu : {type}",
		("fr", MessageKey::RenderError) => "Le rendu du composant a échoué",
		("fr", MessageKey::ContentUnavailable) => "Contenu indisponible",
		("fr", MessageKey::Retry) => "Réessayer",
		("fr", MessageKey::HiddenBadge) => "Masqué",
		_ => return None,
	};
	Some(text)
}

/// Layered message catalog.
///
/// # Example
///
/// ```
/// use reinhardt_pagebuilder_render::{MessageKey, Messages};
///
/// let mut messages = Messages::new("en");
/// messages.set_override("de", MessageKey::Retry, "Wiederholen");
///
/// assert_eq!(messages.get("de-AT", MessageKey::Retry), "Wiederholen");
/// assert_eq!(messages.get("ja", MessageKey::Retry), "再試行");
/// assert_eq!(messages.get("pt", MessageKey::Retry), "Retry");
/// assert_eq!(
/// 	messages.unknown_component("fr", "Hero"),
/// 	"Composant inconnu : Hero"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Messages {
	default_locale: String,
	overrides: HashMap<String, HashMap<MessageKey, String>>,
}

impl Default for Messages {
	fn default() -> Self {
		Self::new(FALLBACK_LOCALE)
	}
}

impl Messages {
	/// Creates a catalog with only the built-in layer.
	pub fn new(default_locale: impl Into<String>) -> Self {
		Self {
			default_locale: normalize_locale(&default_locale.into()),
			overrides: HashMap::new(),
		}
	}

	/// The locale tried after the requested one.
	pub fn default_locale(&self) -> &str {
		&self.default_locale
	}

	/// Adds or replaces a runtime override.
	pub fn set_override(&mut self, locale: &str, key: MessageKey, text: impl Into<String>) {
		self.overrides
			.entry(normalize_locale(locale))
			.or_default()
			.insert(key, text.into());
	}

	/// Adds runtime overrides keyed by catalog key string.
	///
	/// Unknown keys are skipped with a debug log. Returns the number applied.
	pub fn extend_overrides<I, K, V>(&mut self, locale: &str, entries: I) -> usize
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: Into<String>,
	{
		let mut applied = 0;
		for (key, text) in entries {
			match MessageKey::ALL.iter().find(|k| k.as_str() == key.as_ref()) {
				Some(message_key) => {
					self.set_override(locale, *message_key, text);
					applied += 1;
				}
				None => tracing::debug!(locale, key = key.as_ref(), "ignoring unknown message key"),
			}
		}
		applied
	}

	/// Looks up a message.
	pub fn get(&self, locale: &str, key: MessageKey) -> String {
		for candidate in self.candidates(locale) {
			if let Some(text) = self.overrides.get(&candidate).and_then(|m| m.get(&key)) {
				return text.clone();
			}
			if let Some(text) = builtin(&candidate, key) {
				return text.to_string();
			}
		}
		key.as_str().to_string()
	}

	/// The "unknown component" message with the type name filled in.
	pub fn unknown_component(&self, locale: &str, type_name: &str) -> String {
		self.get(locale, MessageKey::UnknownComponent)
			.replace("{type}", type_name)
	}

	fn candidates(&self, locale: &str) -> Vec<String> {
		let mut candidates: Vec<String> = Vec::with_capacity(5);
		let mut push = |candidate: String| {
			if !candidate.is_empty() && !candidates.contains(&candidate) {
				candidates.push(candidate);
			}
		};

		let requested = normalize_locale(locale);
		let requested_language = language(&requested).to_string();
		push(requested);
		push(requested_language);
		push(self.default_locale.clone());
		push(language(&self.default_locale).to_string());
		push(FALLBACK_LOCALE.to_string());

		candidates
	}
}

fn normalize_locale(locale: &str) -> String {
	locale.trim().replace('_', "-").to_lowercase()
}

fn language(locale: &str) -> &str {
	locale.split('-').next().unwrap_or(locale)
}
