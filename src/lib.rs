//! # mimetype-negotiation
//!
//! HTTP media type negotiation following RFC 7231.
//!
//! Two negotiations share one media type parser:
//!
//! - **Content-Type negotiation** matches the media type a request body
//!   declares against the types a handler can consume. A supported type
//!   matches when type and subtype are equal and each of its parameters is
//!   present in the declared type with the same value.
//! - **Accept negotiation** ranks the media ranges of an `Accept` header by
//!   quality, specificity and declaration order, then returns the first
//!   supported type a range matches exactly, by `type/*` or by `*/*`.
//!
//! Both return one of the caller's supported strings verbatim, or the
//! caller's default when nothing matches.
//!
//! ## Quick Example
//!
//! ```
//! use mimetype_negotiation::{negotiate_accept_type, negotiate_content_type};
//!
//! let supported = ["application/json", "text/html"];
//!
//! let response_type = negotiate_accept_type("text/html, */*;q=0.1", &supported, None).unwrap();
//! assert_eq!(response_type, Some("text/html"));
//!
//! let body_type = negotiate_content_type("application/json; charset=utf-8", &supported, None).unwrap();
//! assert_eq!(body_type, Some("application/json"));
//! ```
//!
//! ## Feature Flags
//!
//! - `http` (default) - negotiate directly from an `http::HeaderMap`

pub mod accept;
pub mod config;
pub mod error;
#[cfg(feature = "http")]
pub mod headers;
pub mod media_type;
pub mod negotiator;
pub mod supported;

pub use accept::{AcceptHeader, MediaRange, parse_accept_types};
pub use config::{NegotiatorConfig, NegotiatorConfigBuilder, QualityPolicy};
pub use error::{ParseError, ParseResult};
pub use media_type::{MediaType, format_media_type};
pub use negotiator::MediaTypeNegotiator;
pub use supported::SupportedTypes;

/// Parses a raw media type string
///
/// # Examples
///
/// ```
/// use mimetype_negotiation::parse_media_type;
///
/// let media = parse_media_type("t/s").unwrap();
/// assert_eq!(media.type_, "t");
/// assert_eq!(media.subtype, "s");
/// assert!(media.parameters.is_empty());
/// ```
pub fn parse_media_type(raw: &str) -> ParseResult<MediaType> {
	MediaType::parse(raw)
}

/// Negotiates a declared `Content-Type` with the default configuration
///
/// See [`MediaTypeNegotiator::negotiate_content_type`].
pub fn negotiate_content_type<'a, S: AsRef<str>>(
	declared: &str,
	supported: &'a [S],
	default: Option<&'a str>,
) -> ParseResult<Option<&'a str>> {
	MediaTypeNegotiator::new().negotiate_content_type(declared, supported, default)
}

/// Negotiates an `Accept` header with the default configuration
///
/// See [`MediaTypeNegotiator::negotiate_accept_type`].
pub fn negotiate_accept_type<'a, S: AsRef<str>>(
	accept: &str,
	supported: &'a [S],
	default: Option<&'a str>,
) -> ParseResult<Option<&'a str>> {
	MediaTypeNegotiator::new().negotiate_accept_type(accept, supported, default)
}

/// Prelude for glob imports
pub mod prelude {
	pub use crate::{
		AcceptHeader, MediaRange, MediaType, MediaTypeNegotiator, NegotiatorConfig, ParseError,
		ParseResult, QualityPolicy, SupportedTypes, format_media_type, negotiate_accept_type,
		negotiate_content_type, parse_accept_types, parse_media_type,
	};
}
