//! # File I/O Module
//!
//! Loads and saves [`RateCard`] files.
//!
//! - **Format by extension**: `.toml` or `.json`
//! - **Validated loads**: a card that fails [`RateCard::validate`] is rejected
//! - **Atomic saves**: write to `.tmp`, sync, rename
//!
//! ## Example
//!
//! ```rust,no_run
//! use pricing_core::file_io::{load_rate_card, save_rate_card};
//! use pricing_core::rate_card::RateCard;
//! use std::path::Path;
//!
//! save_rate_card(&RateCard::default(), Path::new("rates.toml"))?;
//! let rates = load_rate_card(Path::new("rates.toml"))?;
//! # Ok::<(), pricing_core::errors::PricingError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::errors::{PricingError, PricingResult};
use crate::rate_card::RateCard;

/// Supported rate card file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateCardFormat {
    Toml,
    Json,
}

impl RateCardFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> PricingResult<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "toml" => Ok(RateCardFormat::Toml),
            "json" => Ok(RateCardFormat::Json),
            _ => Err(PricingError::config_error(
                path.display().to_string(),
                "rate card must be a .toml or .json file",
            )),
        }
    }

    /// Serialize a rate card in this format
    pub fn render(&self, rates: &RateCard) -> PricingResult<String> {
        match self {
            RateCardFormat::Toml => toml::to_string_pretty(rates).map_err(|e| PricingError::SerializationError {
                reason: e.to_string(),
            }),
            RateCardFormat::Json => Ok(serde_json::to_string_pretty(rates)?),
        }
    }

    /// Parse a rate card in this format (no validation)
    pub fn parse(&self, contents: &str) -> PricingResult<RateCard> {
        match self {
            RateCardFormat::Toml => toml::from_str(contents).map_err(|e| PricingError::SerializationError {
                reason: e.to_string(),
            }),
            RateCardFormat::Json => Ok(serde_json::from_str(contents)?),
        }
    }
}

/// Load and validate a rate card.
///
/// # Returns
///
/// * `Ok(RateCard)` - Parsed and validated
/// * `Err(PricingError::ConfigError)` - Unreadable file or unsupported extension
/// * `Err(PricingError::SerializationError)` - Malformed contents
/// * `Err(PricingError::InvalidRateCard)` - Parsed but unusable values
pub fn load_rate_card(path: &Path) -> PricingResult<RateCard> {
    let format = RateCardFormat::from_path(path)?;

    let contents = fs::read_to_string(path)
        .map_err(|e| PricingError::config_error(path.display().to_string(), e.to_string()))?;

    let rates = format.parse(&contents).map_err(|e| match e {
        PricingError::SerializationError { reason } => PricingError::SerializationError {
            reason: format!("Invalid rate card in {}: {}", path.display(), reason),
        },
        other => other,
    })?;
    rates.validate()?;

    debug!(path = %path.display(), "loaded rate card");
    Ok(rates)
}

/// Save a rate card with atomic write semantics.
///
/// The card is written to a sibling `.tmp` file, synced, then renamed over
/// the destination so a reader never sees a half-written card.
pub fn save_rate_card(rates: &RateCard, path: &Path) -> PricingResult<()> {
    let format = RateCardFormat::from_path(path)?;
    let text = format.render(rates)?;

    let tmp_path = path.with_extension("tmp");

    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| PricingError::config_error(tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .write_all(text.as_bytes())
        .map_err(|e| PricingError::config_error(tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .sync_all()
        .map_err(|e| PricingError::config_error(tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        PricingError::config_error(path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), "saved rate card");
    Ok(())
}
