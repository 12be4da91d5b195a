//! Error types for media type parsing and negotiation.
//!
//! Negotiation itself never fails for "no match" or an empty supported list;
//! those fall back to the caller's default. Only malformed input is an error.

use thiserror::Error;

/// Errors that can occur while parsing media types, `Accept` headers or
/// negotiator configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
	/// The `type/subtype` segment has no `/`.
	#[error("Media type has no '/' separating type and subtype: {0:?}")]
	MissingSlash(String),

	/// A parameter segment has no `=`.
	#[error("Parameter {segment:?} of media type {media_type:?} has no '='")]
	MissingEquals {
		/// The media type being parsed.
		media_type: String,
		/// The offending parameter segment.
		segment: String,
	},

	/// The `q` parameter of a media range is not an acceptable quality value.
	#[error("Invalid quality value: {0:?}")]
	InvalidQuality(String),

	/// A header value could not be read as visible ASCII text.
	#[error("Header {0} is not a valid visible ASCII string")]
	InvalidHeaderValue(&'static str),

	/// Negotiator configuration could not be loaded.
	#[error("Configuration error: {0}")]
	Config(String),
}

/// Result type alias for parsing and negotiation.
pub type ParseResult<T> = Result<T, ParseError>;
