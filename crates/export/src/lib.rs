//! Renderings of an [`zodiac_chart::EphemerisResult`].
//!
//! Every adapter consumes an already computed result; none of them calls
//! back into the ephemeris.

pub mod csv;
pub mod html;
pub mod json;
pub mod text;

use thiserror::Error;

/// Errors raised while writing an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to encode CSV: {0}")]
    Csv(#[from] ::csv::Error),
}
