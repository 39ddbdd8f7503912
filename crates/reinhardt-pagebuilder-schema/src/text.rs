//! Label helpers for editor fields and select options.

/// Converts a prop identifier into a human-readable label.
///
/// A space is inserted before every uppercase letter, `_` and `-` become
/// word breaks, and each word gets an uppercase first character. Acronyms are
/// not special-cased.
///
/// # Examples
///
/// ```
/// use reinhardt_pagebuilder_schema::text::humanize_field_name;
///
/// assert_eq!(humanize_field_name("backgroundColor"), "Background Color");
/// assert_eq!(humanize_field_name("ctaText"), "Cta Text");
/// assert_eq!(humanize_field_name("HeroSection"), "Hero Section");
/// assert_eq!(humanize_field_name("active_user"), "Active User");
/// ```
pub fn humanize_field_name(name: &str) -> String {
	let mut spaced = String::with_capacity(name.len() + 8);
	for ch in name.chars() {
		if ch.is_uppercase() {
			spaced.push(' ');
			spaced.push(ch);
		} else if ch == '_' || ch == '-' {
			spaced.push(' ');
		} else {
			spaced.push(ch);
		}
	}

	spaced
		.split_whitespace()
		.map(capitalize_first)
		.collect::<Vec<_>>()
		.join(" ")
}

/// Converts an enumerated value into an option label.
///
/// Uses the same rule as [`humanize_field_name`], so `"left"` becomes
/// `"Left"` and `"spaceBetween"` becomes `"Space Between"`.
pub fn humanize_option_label(value: &str) -> String {
	let label = humanize_field_name(value);
	if label.is_empty() {
		value.to_string()
	} else {
		label
	}
}

fn capitalize_first(word: &str) -> String {
	let mut chars = word.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}
