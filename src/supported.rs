//! Lookup of server-supported media types by canonical key

use crate::error::ParseResult;
use crate::media_type::format_media_type;
use indexmap::IndexMap;

/// Caller-supplied supported media types keyed by their lower-cased
/// canonical form
///
/// The lookup keeps the caller's list order; wildcard matches depend on it.
/// Entries that canonicalize to the same key overwrite each other: the
/// later entry's string is kept at the earlier entry's position.
#[derive(Debug, Clone, Default)]
pub struct SupportedTypes<'a> {
	lookup: IndexMap<String, &'a str>,
}

impl<'a> SupportedTypes<'a> {
	/// Builds the lookup from the caller's list
	///
	/// # Examples
	///
	/// ```
	/// use mimetype_negotiation::SupportedTypes;
	///
	/// let supported = SupportedTypes::new(&["Text/HTML; b=2; a=1", "application/json"]).unwrap();
	/// assert_eq!(supported.len(), 2);
	/// assert_eq!(supported.match_range("text/html;a=1;b=2"), Some("Text/HTML; b=2; a=1"));
	/// ```
	pub fn new<S: AsRef<str>>(supported: &'a [S]) -> ParseResult<Self> {
		let mut lookup = IndexMap::with_capacity(supported.len());
		for entry in supported {
			let original = entry.as_ref();
			let key = format_media_type(&original.to_ascii_lowercase())?;
			lookup.insert(key, original);
		}
		Ok(Self { lookup })
	}

	/// Finds the supported type matched by a media-range key
	///
	/// In order: an exact canonical match; for `*/*` the first supported
	/// entry; for `type/*` the first entry of that type. Other ranges only
	/// match exactly.
	///
	/// # Examples
	///
	/// ```
	/// use mimetype_negotiation::SupportedTypes;
	///
	/// let supported = SupportedTypes::new(&["image/png", "text/plain", "text/html"]).unwrap();
	/// assert_eq!(supported.match_range("text/html"), Some("text/html"));
	/// assert_eq!(supported.match_range("text/*"), Some("text/plain"));
	/// assert_eq!(supported.match_range("*/*"), Some("image/png"));
	/// assert_eq!(supported.match_range("audio/*"), None);
	/// ```
	pub fn match_range(&self, range_key: &str) -> Option<&'a str> {
		if let Some(original) = self.lookup.get(range_key) {
			return Some(*original);
		}

		let prefix = wildcard_prefix(range_key)?;
		self.lookup
			.iter()
			.find(|(key, _)| key.starts_with(&prefix))
			.map(|(_, original)| *original)
	}

	/// Returns every supported type a media-range key accepts, in list order
	///
	/// An exact match comes first, followed by the wildcard expansion.
	pub fn matches_for(&self, range_key: &str) -> Vec<&'a str> {
		let mut matched: Vec<&'a str> = self.lookup.get(range_key).copied().into_iter().collect();

		if let Some(prefix) = wildcard_prefix(range_key) {
			for (key, original) in &self.lookup {
				if key.starts_with(&prefix) && !matched.contains(original) {
					matched.push(*original);
				}
			}
		}
		matched
	}

	/// Returns the first supported type in list order
	pub fn first(&self) -> Option<&'a str> {
		self.lookup.values().next().copied()
	}

	/// Returns the number of distinct canonical keys
	pub fn len(&self) -> usize {
		self.lookup.len()
	}

	/// Returns true when no type is supported
	pub fn is_empty(&self) -> bool {
		self.lookup.is_empty()
	}
}

/// Returns the canonical-key prefix a wildcard range matches
///
/// `*/*` matches every key (empty prefix), `type/*` matches keys starting
/// with `type/`. Range parameters are ignored. Other ranges have no prefix.
fn wildcard_prefix(range_key: &str) -> Option<String> {
	let essence = range_key
		.split_once(';')
		.map_or(range_key, |(essence, _)| essence);
	match essence.split_once('/') {
		Some(("*", "*")) => Some(String::new()),
		Some((general, "*")) => Some(format!("{}/", general)),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ParseError;
	use rstest::rstest;

	#[rstest]
	#[case("*/*", Some(""))]
	#[case("*/*;level=1", Some(""))]
	#[case("text/*", Some("text/"))]
	#[case("text/*;level=1", Some("text/"))]
	#[case("text/html", None)]
	#[case("*/html", None)]
	fn test_wildcard_prefix(#[case] range_key: &str, #[case] expected: Option<&str>) {
		assert_eq!(wildcard_prefix(range_key).as_deref(), expected);
	}

	#[rstest]
	fn test_exact_match_is_case_insensitive() {
		let supported = SupportedTypes::new(&["Application/JSON"]).unwrap();
		assert_eq!(supported.match_range("application/json"), Some("Application/JSON"));
	}

	#[rstest]
	fn test_exact_match_ignores_parameter_order() {
		let supported = SupportedTypes::new(&["text/html; level=1; charset=utf-8"]).unwrap();
		assert_eq!(
			supported.match_range("text/html;charset=utf-8;level=1"),
			Some("text/html; level=1; charset=utf-8")
		);
		assert_eq!(supported.match_range("text/html;level=1"), None);
	}

	#[rstest]
	fn test_full_wildcard_returns_first_entry() {
		let supported = SupportedTypes::new(&["application/x-a", "application/x-a-b"]).unwrap();
		assert_eq!(supported.match_range("*/*"), Some("application/x-a"));
		assert_eq!(supported.match_range("*/*;level=1"), Some("application/x-a"));
	}

	#[rstest]
	fn test_subtype_wildcard_ignores_parameters() {
		let supported = SupportedTypes::new(&["image/png", "text/html;level=3"]).unwrap();
		assert_eq!(supported.match_range("text/*"), Some("text/html;level=3"));
		assert_eq!(supported.match_range("text/*;level=1"), Some("text/html;level=3"));
	}

	#[rstest]
	fn test_subtype_wildcard_requires_whole_type() {
		let supported = SupportedTypes::new(&["textual/plain"]).unwrap();
		assert_eq!(supported.match_range("text/*"), None);
	}

	#[rstest]
	fn test_no_match() {
		let supported = SupportedTypes::new(&["image/png", "image/jpeg"]).unwrap();
		assert_eq!(supported.match_range("text/html"), None);
		assert_eq!(supported.match_range("text/*"), None);
		assert_eq!(supported.match_range("*/html"), None);
	}

	#[rstest]
	fn test_duplicate_keys_last_write_wins_in_first_position() {
		let supported = SupportedTypes::new(&["text/html", "image/png", "TEXT/HTML"]).unwrap();
		assert_eq!(supported.len(), 2);
		assert_eq!(supported.first(), Some("TEXT/HTML"));
		assert_eq!(supported.match_range("text/html"), Some("TEXT/HTML"));
	}

	#[rstest]
	fn test_empty() {
		let empty: [&str; 0] = [];
		let supported = SupportedTypes::new(&empty).unwrap();
		assert!(supported.is_empty());
		assert_eq!(supported.match_range("*/*"), None);
	}

	#[rstest]
	fn test_malformed_entry_is_error() {
		let result = SupportedTypes::new(&["text/html", "json"]);
		assert!(matches!(result, Err(ParseError::MissingSlash(_))));
	}

	#[rstest]
	fn test_matches_for() {
		let supported =
			SupportedTypes::new(&["text/plain", "image/png", "text/html"]).unwrap();
		assert_eq!(supported.matches_for("text/html"), vec!["text/html"]);
		assert_eq!(supported.matches_for("text/*"), vec!["text/plain", "text/html"]);
		assert_eq!(
			supported.matches_for("*/*"),
			vec!["text/plain", "image/png", "text/html"]
		);
		assert!(supported.matches_for("audio/basic").is_empty());
	}
}
