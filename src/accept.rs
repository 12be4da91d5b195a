//! Accept header parsing and ranking
//!
//! Every comma-separated element of an `Accept` header becomes a
//! [`MediaRange`]. Ranges are ranked by quality, then specificity, then
//! declaration order, all descending.

use crate::config::{NegotiatorConfig, QualityPolicy};
use crate::error::ParseResult;
use crate::media_type::MediaType;
use indexmap::IndexMap;

/// Quality of `*/*` without an explicit `q`
pub const FULL_WILDCARD_QUALITY: u16 = 1;
/// Quality of `type/*` without an explicit `q`
pub const SUBTYPE_WILDCARD_QUALITY: u16 = 2;
/// Quality of a fully explicit range without an explicit `q`
pub const EXPLICIT_QUALITY: u16 = 100;

/// One media range of an `Accept` header with its ranking attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRange {
	/// Type, subtype and the range parameters declared before `q`
	pub media_type: MediaType,
	/// Quality on a 0-100 scale
	pub quality: u16,
	/// Number of range parameters
	pub specificity: usize,
	/// `N - i` for the i-th of N header elements; earlier is higher
	pub priority: usize,
	/// Accept-extension parameters declared after `q`
	pub extensions: IndexMap<String, String>,
}

impl MediaRange {
	/// Parses one header element
	///
	/// `q` is read as an ordinary parameter first. Parameters before it
	/// identify the range, parameters after it are accept-extensions.
	///
	/// # Examples
	///
	/// ```
	/// use mimetype_negotiation::{MediaRange, QualityPolicy};
	///
	/// let range = MediaRange::parse("text/html;level=1;q=0.4;ext=x", 3, QualityPolicy::Clamp).unwrap();
	/// assert_eq!(range.quality, 40);
	/// assert_eq!(range.specificity, 1);
	/// assert_eq!(range.priority, 3);
	/// assert_eq!(range.key(), "text/html;level=1");
	/// assert_eq!(range.extensions.get("ext").map(String::as_str), Some("x"));
	///
	/// let wildcard = MediaRange::parse("text/*", 1, QualityPolicy::Clamp).unwrap();
	/// assert_eq!(wildcard.quality, 2);
	/// ```
	pub fn parse(element: &str, priority: usize, policy: QualityPolicy) -> ParseResult<Self> {
		let parsed = MediaType::parse(element)?;

		let quality = match parsed.param("q") {
			Some(q) => policy.scale(q)?,
			None if parsed.is_wildcard() => FULL_WILDCARD_QUALITY,
			None if parsed.is_subtype_wildcard() => SUBTYPE_WILDCARD_QUALITY,
			None => EXPLICIT_QUALITY,
		};

		let mut media_type = MediaType::new(parsed.type_, parsed.subtype);
		let mut extensions = IndexMap::new();
		let mut after_quality = false;
		for (key, value) in parsed.parameters {
			if key == "q" {
				after_quality = true;
			} else if after_quality {
				extensions.insert(key, value);
			} else {
				media_type.parameters.insert(key, value);
			}
		}

		Ok(Self {
			specificity: media_type.parameters.len(),
			media_type,
			quality,
			priority,
			extensions,
		})
	}

	/// Returns the media-range key: `type/subtype` plus the range
	/// parameters sorted by key
	pub fn key(&self) -> String {
		self.media_type.canonical()
	}

	fn rank(&self) -> (u16, usize, usize) {
		(self.quality, self.specificity, self.priority)
	}
}

/// A parsed and ranked `Accept` header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcceptHeader {
	/// Unique media ranges, highest rank first
	pub ranges: Vec<MediaRange>,
}

impl AcceptHeader {
	/// Parses and ranks an `Accept` header with the default configuration
	///
	/// # Examples
	///
	/// ```
	/// use mimetype_negotiation::AcceptHeader;
	///
	/// let accept = AcceptHeader::parse("audio/*; q=0.2, audio/basic").unwrap();
	/// assert_eq!(accept.keys(), vec!["audio/basic", "audio/*"]);
	/// ```
	pub fn parse(header: &str) -> ParseResult<Self> {
		Self::parse_with(header, &NegotiatorConfig::default())
	}

	/// Parses and ranks an `Accept` header
	///
	/// The header is lower-cased before parsing. Elements that are empty
	/// after trimming are skipped. When the same media-range key occurs
	/// more than once, the later occurrence's ranking data wins.
	pub fn parse_with(header: &str, config: &NegotiatorConfig) -> ParseResult<Self> {
		let header = header.to_ascii_lowercase();
		let elements: Vec<&str> = header.split(',').collect();
		let count = elements.len();

		let mut unique: IndexMap<String, MediaRange> = IndexMap::new();
		for (index, element) in elements.into_iter().enumerate() {
			if element.trim().is_empty() {
				continue;
			}
			let range = MediaRange::parse(element, count - index, config.quality_policy)?;
			unique.insert(range.key(), range);
		}

		let mut ranges: Vec<MediaRange> = unique
			.into_values()
			.filter(|range| !(config.exclude_zero_quality && range.quality == 0))
			.collect();
		ranges.sort_by(|a, b| b.rank().cmp(&a.rank()));

		tracing::trace!(header = %header, ranges = ranges.len(), "Ranked Accept header");

		Ok(Self { ranges })
	}

	/// Returns the media-range keys in rank order
	pub fn keys(&self) -> Vec<String> {
		self.ranges.iter().map(MediaRange::key).collect()
	}

	/// Returns true when no media range was declared
	pub fn is_empty(&self) -> bool {
		self.ranges.is_empty()
	}
}

/// Parses an `Accept` header into media-range keys, highest priority first
///
/// # Examples
///
/// ```
/// use mimetype_negotiation::parse_accept_types;
///
/// let keys = parse_accept_types("text/*, text/html, text/html;level=1, */*").unwrap();
/// assert_eq!(keys, vec!["text/html;level=1", "text/html", "text/*", "*/*"]);
/// ```
pub fn parse_accept_types(header: &str) -> ParseResult<Vec<String>> {
	AcceptHeader::parse(header).map(|accept| accept.keys())
}
