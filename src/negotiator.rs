//! Content-Type and Accept negotiation
//!
//! [`MediaTypeNegotiator`] holds nothing but its configuration, so one
//! instance can serve any number of concurrent requests.

use crate::accept::AcceptHeader;
use crate::config::NegotiatorConfig;
use crate::error::ParseResult;
use crate::media_type::MediaType;
use crate::supported::SupportedTypes;

/// Selects a supported media type for a request
#[derive(Debug, Clone, Default)]
pub struct MediaTypeNegotiator {
	config: NegotiatorConfig,
}

impl MediaTypeNegotiator {
	/// Creates a negotiator with the default configuration
	///
	/// # Examples
	///
	/// ```
	/// use mimetype_negotiation::MediaTypeNegotiator;
	///
	/// let negotiator = MediaTypeNegotiator::new();
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a negotiator with a custom configuration
	///
	/// # Examples
	///
	/// ```
	/// use mimetype_negotiation::{MediaTypeNegotiator, NegotiatorConfig, QualityPolicy};
	///
	/// let config = NegotiatorConfig::builder()
	///     .quality_policy(QualityPolicy::Strict)
	///     .build();
	/// let negotiator = MediaTypeNegotiator::with_config(config);
	/// assert_eq!(negotiator.config().quality_policy, QualityPolicy::Strict);
	/// ```
	pub fn with_config(config: NegotiatorConfig) -> Self {
		Self { config }
	}

	/// Returns the configuration
	pub fn config(&self) -> &NegotiatorConfig {
		&self.config
	}

	/// Negotiates a request body's declared `Content-Type`
	///
	/// Returns the first supported entry, verbatim, whose type and subtype
	/// equal the declared ones and whose parameters all appear in the
	/// declared type with identical values. Comparison is case-sensitive.
	///
	/// # Examples
	///
	/// ```
	/// use mimetype_negotiation::MediaTypeNegotiator;
	///
	/// let negotiator = MediaTypeNegotiator::new();
	///
	/// let result = negotiator
	///     .negotiate_content_type("text/html; charset=utf-8", &["text/plain", "text/html"], None)
	///     .unwrap();
	/// assert_eq!(result, Some("text/html"));
	///
	/// // The supported type requires a parameter the request lacks
	/// let result = negotiator
	///     .negotiate_content_type("text/html", &["text/html;level=1"], Some("text/plain"))
	///     .unwrap();
	/// assert_eq!(result, Some("text/plain"));
	/// ```
	pub fn negotiate_content_type<'a, S: AsRef<str>>(
		&self,
		declared: &str,
		supported: &'a [S],
		default: Option<&'a str>,
	) -> ParseResult<Option<&'a str>> {
		if supported.is_empty() {
			return Ok(default);
		}

		let declared_type = MediaType::parse(declared)?;
		for candidate in supported {
			let candidate = candidate.as_ref();
			if MediaType::parse(candidate)?.is_satisfied_by(&declared_type) {
				tracing::debug!(content_type = %declared, negotiated = %candidate, "Negotiated Content-Type");
				return Ok(Some(candidate));
			}
		}

		tracing::debug!(content_type = %declared, "No supported Content-Type matched, using default");
		Ok(default)
	}

	/// Negotiates a response media type from an `Accept` header
	///
	/// Media ranges are tried in rank order; the first one matching a
	/// supported entry decides. Matching ignores ASCII case.
	///
	/// # Examples
	///
	/// ```
	/// use mimetype_negotiation::MediaTypeNegotiator;
	///
	/// let negotiator = MediaTypeNegotiator::new();
	/// let supported = ["text/html;level=2", "text/html;level=3"];
	///
	/// let result = negotiator
	///     .negotiate_accept_type(
	///         "text/*;q=0.3, text/html;q=0.7, text/html;level=1, text/html;level=2;q=0.4, */*;q=0.5",
	///         &supported,
	///         Some("nouse"),
	///     )
	///     .unwrap();
	/// assert_eq!(result, Some("text/html;level=2"));
	/// ```
	pub fn negotiate_accept_type<'a, S: AsRef<str>>(
		&self,
		accept: &str,
		supported: &'a [S],
		default: Option<&'a str>,
	) -> ParseResult<Option<&'a str>> {
		if supported.is_empty() {
			return Ok(default);
		}

		let lookup = SupportedTypes::new(supported)?;
		let accept_header = self.parse_accept(accept)?;

		for range in &accept_header.ranges {
			let key = range.key();
			tracing::trace!(range = %key, quality = range.quality, "Trying media range");
			if let Some(matched) = lookup.match_range(&key) {
				tracing::debug!(accept = %accept, negotiated = %matched, "Negotiated Accept type");
				return Ok(Some(matched));
			}
		}

		tracing::debug!(accept = %accept, "No supported type accepted, using default");
		Ok(default)
	}

	/// Lists every supported type the `Accept` header accepts, best first
	///
	/// # Examples
	///
	/// ```
	/// use mimetype_negotiation::MediaTypeNegotiator;
	///
	/// let negotiator = MediaTypeNegotiator::new();
	/// let supported = ["image/png", "text/plain", "text/html"];
	///
	/// let acceptable = negotiator
	///     .acceptable_types("text/html, text/*;q=0.5", &supported)
	///     .unwrap();
	/// assert_eq!(acceptable, vec!["text/html", "text/plain"]);
	/// ```
	pub fn acceptable_types<'a, S: AsRef<str>>(
		&self,
		accept: &str,
		supported: &'a [S],
	) -> ParseResult<Vec<&'a str>> {
		if supported.is_empty() {
			return Ok(Vec::new());
		}

		let lookup = SupportedTypes::new(supported)?;
		let accept_header = self.parse_accept(accept)?;

		let mut acceptable: Vec<&'a str> = Vec::new();
		for range in &accept_header.ranges {
			for matched in lookup.matches_for(&range.key()) {
				if !acceptable.contains(&matched) {
					acceptable.push(matched);
				}
			}
		}
		Ok(acceptable)
	}

	/// Parses and ranks an `Accept` header with this negotiator's
	/// configuration
	pub fn parse_accept(&self, accept: &str) -> ParseResult<AcceptHeader> {
		AcceptHeader::parse_with(accept, &self.config)
	}
}
