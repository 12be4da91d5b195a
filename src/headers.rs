//! Negotiation straight from request headers
//!
//! Reads `Accept` and `Content-Type` out of an [`http::HeaderMap`] and hands
//! the raw values to [`MediaTypeNegotiator`].

use crate::error::{ParseError, ParseResult};
use crate::negotiator::MediaTypeNegotiator;
use http::HeaderMap;
use http::header::{ACCEPT, CONTENT_TYPE};

/// `Accept` value assumed when the request carries none
pub const ACCEPT_ANY: &str = "*/*";

impl MediaTypeNegotiator {
	/// Negotiates against the `Accept` header(s) of a request
	///
	/// Multiple `Accept` fields are combined as one comma-separated list.
	/// A request without `Accept` accepts any media type.
	///
	/// # Examples
	///
	/// ```
	/// use http::{HeaderMap, HeaderValue, header::ACCEPT};
	/// use mimetype_negotiation::MediaTypeNegotiator;
	///
	/// let mut headers = HeaderMap::new();
	/// headers.insert(ACCEPT, HeaderValue::from_static("text/html;q=0.5, application/json"));
	///
	/// let negotiator = MediaTypeNegotiator::new();
	/// let result = negotiator
	///     .negotiate_accept_from_headers(&headers, &["text/html", "application/json"], None)
	///     .unwrap();
	/// assert_eq!(result, Some("application/json"));
	/// ```
	pub fn negotiate_accept_from_headers<'a, S: AsRef<str>>(
		&self,
		headers: &HeaderMap,
		supported: &'a [S],
		default: Option<&'a str>,
	) -> ParseResult<Option<&'a str>> {
		let values = headers
			.get_all(ACCEPT)
			.iter()
			.map(|value| {
				value
					.to_str()
					.map_err(|_| ParseError::InvalidHeaderValue("Accept"))
			})
			.collect::<ParseResult<Vec<&str>>>()?;

		let accept = if values.is_empty() {
			ACCEPT_ANY.to_string()
		} else {
			values.join(", ")
		};
		self.negotiate_accept_type(&accept, supported, default)
	}

	/// Negotiates against the `Content-Type` header of a request
	///
	/// A request without `Content-Type` yields the default.
	///
	/// # Examples
	///
	/// ```
	/// use http::{HeaderMap, HeaderValue, header::CONTENT_TYPE};
	/// use mimetype_negotiation::MediaTypeNegotiator;
	///
	/// let mut headers = HeaderMap::new();
	/// headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json; charset=utf-8"));
	///
	/// let negotiator = MediaTypeNegotiator::new();
	/// let result = negotiator
	///     .negotiate_content_type_from_headers(&headers, &["application/json"], None)
	///     .unwrap();
	/// assert_eq!(result, Some("application/json"));
	/// ```
	pub fn negotiate_content_type_from_headers<'a, S: AsRef<str>>(
		&self,
		headers: &HeaderMap,
		supported: &'a [S],
		default: Option<&'a str>,
	) -> ParseResult<Option<&'a str>> {
		let Some(value) = headers.get(CONTENT_TYPE) else {
			tracing::debug!("Request has no Content-Type, using default");
			return Ok(default);
		};
		let declared = value
			.to_str()
			.map_err(|_| ParseError::InvalidHeaderValue("Content-Type"))?;
		self.negotiate_content_type(declared, supported, default)
	}
}
