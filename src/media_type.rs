//! Media type parsing and canonical formatting
//!
//! A media type is a `type/subtype` pair followed by `;`-separated
//! `key=value` parameters. Parsing is literal: no case folding, no
//! percent-decoding and no quoted-string unescaping.

use crate::error::{ParseError, ParseResult};
use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;

/// A parsed media type such as `text/html;charset=utf-8`.
///
/// Parameters keep the order they were first declared in, but equality
/// treats them as a set of key/value pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
	/// Top-level type (e.g. "text", "application", "*")
	pub type_: String,
	/// Subtype (e.g. "html", "json", "*")
	pub subtype: String,
	/// Parameters in declaration order
	pub parameters: IndexMap<String, String>,
}

impl MediaType {
	/// Creates a media type without parameters
	///
	/// # Examples
	///
	/// ```
	/// use mimetype_negotiation::MediaType;
	///
	/// let html = MediaType::new("text", "html");
	/// assert_eq!(html.type_, "text");
	/// assert_eq!(html.subtype, "html");
	/// assert!(html.parameters.is_empty());
	/// ```
	pub fn new(type_: impl Into<String>, subtype: impl Into<String>) -> Self {
		Self {
			type_: type_.into(),
			subtype: subtype.into(),
			parameters: IndexMap::new(),
		}
	}

	/// Adds a parameter, replacing the value of an existing key
	///
	/// # Examples
	///
	/// ```
	/// use mimetype_negotiation::MediaType;
	///
	/// let html = MediaType::new("text", "html").with_param("level", "1");
	/// assert_eq!(html.param("level"), Some("1"));
	/// ```
	pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.parameters.insert(key.into(), value.into());
		self
	}

	/// Parses a raw media type string
	///
	/// The string is split on `;` and every segment is trimmed. The first
	/// segment is split once on `/`, every following segment once on `=`.
	/// A repeated parameter key overwrites the earlier value but keeps its
	/// original position.
	///
	/// # Examples
	///
	/// ```
	/// use mimetype_negotiation::MediaType;
	///
	/// let media = MediaType::parse("foo/bar; baz=qux; quux=corge").unwrap();
	/// assert_eq!(media.type_, "foo");
	/// assert_eq!(media.subtype, "bar");
	/// assert_eq!(media.param("baz"), Some("qux"));
	/// assert_eq!(media.param("quux"), Some("corge"));
	///
	/// assert!(MediaType::parse("foobar").is_err());
	/// assert!(MediaType::parse("foo/bar; baz").is_err());
	/// ```
	pub fn parse(raw: &str) -> ParseResult<Self> {
		let mut segments = raw.split(';').map(str::trim);
		let essence = segments.next().unwrap_or_default();

		let (type_, subtype) = essence
			.split_once('/')
			.ok_or_else(|| ParseError::MissingSlash(raw.to_string()))?;

		let mut parameters = IndexMap::new();
		for segment in segments {
			let (key, value) =
				segment
					.split_once('=')
					.ok_or_else(|| ParseError::MissingEquals {
						media_type: raw.to_string(),
						segment: segment.to_string(),
					})?;
			parameters.insert(key.trim().to_string(), value.trim().to_string());
		}

		Ok(Self {
			type_: type_.to_string(),
			subtype: subtype.to_string(),
			parameters,
		})
	}

	/// Returns the value of a parameter
	pub fn param(&self, key: &str) -> Option<&str> {
		self.parameters.get(key).map(String::as_str)
	}

	/// Returns true for the full wildcard `*/*`
	pub fn is_wildcard(&self) -> bool {
		self.type_ == "*" && self.subtype == "*"
	}

	/// Returns true when the subtype is `*` (this includes `*/*`)
	pub fn is_subtype_wildcard(&self) -> bool {
		self.subtype == "*"
	}

	/// Checks whether a declared media type satisfies this one
	///
	/// Type and subtype must be equal (case-sensitive) and every parameter
	/// of `self` must be present in `declared` with the same value.
	/// Parameters only `declared` carries are ignored.
	///
	/// # Examples
	///
	/// ```
	/// use mimetype_negotiation::MediaType;
	///
	/// let supported = MediaType::parse("text/html").unwrap();
	/// let declared = MediaType::parse("text/html; charset=utf-8").unwrap();
	/// assert!(supported.is_satisfied_by(&declared));
	///
	/// let leveled = MediaType::parse("text/html;level=1").unwrap();
	/// assert!(!leveled.is_satisfied_by(&declared));
	/// ```
	pub fn is_satisfied_by(&self, declared: &MediaType) -> bool {
		self.type_ == declared.type_
			&& self.subtype == declared.subtype
			&& self
				.parameters
				.iter()
				.all(|(key, value)| declared.parameters.get(key) == Some(value))
	}

	/// Returns the canonical form: parameters sorted by key, no spaces
	///
	/// # Examples
	///
	/// ```
	/// use mimetype_negotiation::MediaType;
	///
	/// let media = MediaType::parse("text/html; level=1; charset=utf-8").unwrap();
	/// assert_eq!(media.canonical(), "text/html;charset=utf-8;level=1");
	/// ```
	pub fn canonical(&self) -> String {
		self.to_string()
	}

	pub(crate) fn sorted_params(&self) -> Vec<(&str, &str)> {
		let mut params: Vec<(&str, &str)> = self
			.parameters
			.iter()
			.map(|(key, value)| (key.as_str(), value.as_str()))
			.collect();
		params.sort_by(|a, b| a.0.cmp(b.0));
		params
	}
}

impl fmt::Display for MediaType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.type_, self.subtype)?;
		for (key, value) in self.sorted_params() {
			write!(f, ";{}={}", key, value)?;
		}
		Ok(())
	}
}

impl FromStr for MediaType {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

/// Re-serializes a raw media type into its canonical form
///
/// # Examples
///
/// ```
/// use mimetype_negotiation::format_media_type;
///
/// assert_eq!(
///     format_media_type("text/html; level=2; charset=utf-8").unwrap(),
///     "text/html;charset=utf-8;level=2"
/// );
/// ```
pub fn format_media_type(raw: &str) -> ParseResult<String> {
	MediaType::parse(raw).map(|media| media.canonical())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("text/html", "text", "html")]
	#[case("application/vnd.api+json", "application", "vnd.api+json")]
	#[case("*/*", "*", "*")]
	#[case("  image/png  ", "image", "png")]
	fn test_parse_without_parameters(
		#[case] raw: &str,
		#[case] type_: &str,
		#[case] subtype: &str,
	) {
		let media = MediaType::parse(raw).unwrap();
		assert_eq!(media.type_, type_);
		assert_eq!(media.subtype, subtype);
		assert!(media.parameters.is_empty());
	}

	#[rstest]
	fn test_parse_keeps_parameter_order() {
		let media = MediaType::parse("foo/bar; baz=qux; quux=corge").unwrap();
		let keys: Vec<&str> = media.parameters.keys().map(String::as_str).collect();
		assert_eq!(keys, vec!["baz", "quux"]);
	}

	#[rstest]
	fn test_parse_trims_keys_and_values() {
		let media = MediaType::parse("text/html;level= 2 ; charset =utf-8").unwrap();
		assert_eq!(media.param("level"), Some("2"));
		assert_eq!(media.param("charset"), Some("utf-8"));
	}

	#[rstest]
	fn test_parse_splits_once() {
		let media = MediaType::parse("a/b/c; k=v=w").unwrap();
		assert_eq!(media.type_, "a");
		assert_eq!(media.subtype, "b/c");
		assert_eq!(media.param("k"), Some("v=w"));
	}

	#[rstest]
	fn test_parse_is_case_sensitive() {
		let media = MediaType::parse("Text/HTML; Charset=UTF-8").unwrap();
		assert_eq!(media.type_, "Text");
		assert_eq!(media.subtype, "HTML");
		assert_eq!(media.param("Charset"), Some("UTF-8"));
	}

	#[rstest]
	fn test_parse_duplicate_key_overwrites_in_place() {
		let media = MediaType::parse("text/html; a=1; b=2; a=3").unwrap();
		let pairs: Vec<(&str, &str)> = media
			.parameters
			.iter()
			.map(|(k, v)| (k.as_str(), v.as_str()))
			.collect();
		assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
	}

	#[rstest]
	fn test_parse_takes_quoted_values_literally() {
		let media = MediaType::parse("multipart/form-data; boundary=\"a b\"").unwrap();
		assert_eq!(media.param("boundary"), Some("\"a b\""));
	}

	#[rstest]
	#[case("texthtml")]
	#[case("")]
	#[case("; charset=utf-8")]
	fn test_parse_missing_slash(#[case] raw: &str) {
		assert!(matches!(
			MediaType::parse(raw),
			Err(ParseError::MissingSlash(_))
		));
	}

	#[rstest]
	#[case("text/html; level")]
	#[case("text/html;")]
	#[case("text/html; a=1; ; b=2")]
	fn test_parse_missing_equals(#[case] raw: &str) {
		assert!(matches!(
			MediaType::parse(raw),
			Err(ParseError::MissingEquals { .. })
		));
	}

	#[rstest]
	fn test_equality_ignores_parameter_order() {
		let a = MediaType::parse("text/html; a=1; b=2").unwrap();
		let b = MediaType::parse("text/html; b=2; a=1").unwrap();
		assert_eq!(a, b);
	}

	#[rstest]
	#[case("text/html", "text/html")]
	#[case("text/html; b=2; a=1", "text/html;a=1;b=2")]
	#[case("text/html;a=1;b=2", "text/html;a=1;b=2")]
	#[case("Text/HTML; Level=1", "Text/HTML;Level=1")]
	fn test_format_media_type(#[case] raw: &str, #[case] expected: &str) {
		assert_eq!(format_media_type(raw).unwrap(), expected);
	}

	#[rstest]
	fn test_format_propagates_parse_error() {
		assert!(format_media_type("nonsense").is_err());
	}

	#[rstest]
	fn test_from_str() {
		let media: MediaType = "application/json; charset=utf-8".parse().unwrap();
		assert_eq!(media, MediaType::new("application", "json").with_param("charset", "utf-8"));
	}

	#[rstest]
	fn test_wildcards() {
		assert!(MediaType::new("*", "*").is_wildcard());
		assert!(MediaType::new("*", "*").is_subtype_wildcard());
		assert!(MediaType::new("text", "*").is_subtype_wildcard());
		assert!(!MediaType::new("text", "*").is_wildcard());
		assert!(!MediaType::new("text", "html").is_subtype_wildcard());
	}

	#[rstest]
	#[case("text/html", "text/html", true)]
	#[case("text/html", "text/html; charset=utf-8", true)]
	#[case("text/html;level=1", "text/html;level=1;charset=utf-8", true)]
	#[case("text/html;level=2", "text/html;level=1", false)]
	#[case("text/html;level=1", "text/html", false)]
	#[case("text/html", "text/plain", false)]
	#[case("text/html", "TEXT/html", false)]
	fn test_is_satisfied_by(#[case] supported: &str, #[case] declared: &str, #[case] expected: bool) {
		let supported = MediaType::parse(supported).unwrap();
		let declared = MediaType::parse(declared).unwrap();
		assert_eq!(supported.is_satisfied_by(&declared), expected);
	}
}
