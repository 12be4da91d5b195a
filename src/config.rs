//! Negotiator configuration
//!
//! Configuration can be built in code with [`NegotiatorConfig::builder`] or
//! loaded from a TOML table:
//!
//! ```toml
//! quality_policy = "strict"
//! exclude_zero_quality = true
//! ```

use crate::error::{ParseError, ParseResult};
use serde::Deserialize;

/// How `q` values outside `[0, 1]` are handled
///
/// A `q` value that is not a number is always rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityPolicy {
	/// Clamp out-of-range values into `[0, 1]`
	#[default]
	Clamp,
	/// Reject out-of-range values with [`ParseError::InvalidQuality`]
	Strict,
}

impl QualityPolicy {
	/// Converts a raw `q` parameter into the 0-100 integer scale
	///
	/// # Examples
	///
	/// ```
	/// use mimetype_negotiation::QualityPolicy;
	///
	/// assert_eq!(QualityPolicy::Clamp.scale("0.7").unwrap(), 70);
	/// assert_eq!(QualityPolicy::Clamp.scale("1.5").unwrap(), 100);
	/// assert!(QualityPolicy::Strict.scale("1.5").is_err());
	/// assert!(QualityPolicy::Clamp.scale("high").is_err());
	/// ```
	pub fn scale(self, raw: &str) -> ParseResult<u16> {
		let q: f32 = raw
			.trim()
			.parse()
			.map_err(|_| ParseError::InvalidQuality(raw.to_string()))?;
		if !q.is_finite() {
			return Err(ParseError::InvalidQuality(raw.to_string()));
		}

		let q = if (0.0..=1.0).contains(&q) {
			q
		} else {
			match self {
				QualityPolicy::Clamp => {
					tracing::warn!(quality = %raw, "Clamping out-of-range quality value");
					q.clamp(0.0, 1.0)
				}
				QualityPolicy::Strict => {
					return Err(ParseError::InvalidQuality(raw.to_string()));
				}
			}
		};

		Ok((q * 100.0).round() as u16)
	}
}

/// Configuration shared by every negotiation call of a
/// [`MediaTypeNegotiator`](crate::MediaTypeNegotiator)
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct NegotiatorConfig {
	/// Handling of out-of-range `q` values (default: clamp)
	pub quality_policy: QualityPolicy,
	/// Drop `q=0` ranges from the `Accept` ranking (default: false)
	pub exclude_zero_quality: bool,
}

impl NegotiatorConfig {
	/// Creates the default configuration
	///
	/// # Examples
	///
	/// ```
	/// use mimetype_negotiation::{NegotiatorConfig, QualityPolicy};
	///
	/// let config = NegotiatorConfig::new();
	/// assert_eq!(config.quality_policy, QualityPolicy::Clamp);
	/// assert!(!config.exclude_zero_quality);
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a builder for fluent configuration
	///
	/// # Examples
	///
	/// ```
	/// use mimetype_negotiation::{NegotiatorConfig, QualityPolicy};
	///
	/// let config = NegotiatorConfig::builder()
	///     .quality_policy(QualityPolicy::Strict)
	///     .exclude_zero_quality(true)
	///     .build();
	///
	/// assert_eq!(config.quality_policy, QualityPolicy::Strict);
	/// assert!(config.exclude_zero_quality);
	/// ```
	pub fn builder() -> NegotiatorConfigBuilder {
		NegotiatorConfigBuilder::default()
	}

	/// Loads a configuration from a TOML document
	///
	/// Missing keys take their default values.
	///
	/// # Examples
	///
	/// ```
	/// use mimetype_negotiation::{NegotiatorConfig, QualityPolicy};
	///
	/// let config = NegotiatorConfig::from_toml_str("quality_policy = \"strict\"").unwrap();
	/// assert_eq!(config.quality_policy, QualityPolicy::Strict);
	/// assert!(!config.exclude_zero_quality);
	/// ```
	pub fn from_toml_str(source: &str) -> ParseResult<Self> {
		toml::from_str(source).map_err(|e| ParseError::Config(e.to_string()))
	}
}

/// Builder for NegotiatorConfig
#[derive(Debug, Default)]
pub struct NegotiatorConfigBuilder {
	quality_policy: Option<QualityPolicy>,
	exclude_zero_quality: Option<bool>,
}

impl NegotiatorConfigBuilder {
	/// Set the quality policy
	pub fn quality_policy(mut self, policy: QualityPolicy) -> Self {
		self.quality_policy = Some(policy);
		self
	}

	/// Set whether `q=0` ranges are dropped
	pub fn exclude_zero_quality(mut self, exclude: bool) -> Self {
		self.exclude_zero_quality = Some(exclude);
		self
	}

	/// Build the configuration
	pub fn build(self) -> NegotiatorConfig {
		let default = NegotiatorConfig::default();
		NegotiatorConfig {
			quality_policy: self.quality_policy.unwrap_or(default.quality_policy),
			exclude_zero_quality: self
				.exclude_zero_quality
				.unwrap_or(default.exclude_zero_quality),
		}
	}
}
