//! Latitude/longitude from a map detail-view URL.
//!
//! Detail URLs carry the viewport centre after an `/@` marker:
//!
//! ```text
//! https://www.google.com/maps/place/Cafe/@-23.5613,-46.6565,17z/data=...
//! ```

use crate::error::ScraperError;

const MARKER: &str = "/@";

/// Extracts `(latitude, longitude)` from the segment after the last `/@`.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidCoordinates`] if the marker is missing or
/// the first two comma-separated components are not numbers. There is no
/// fallback value.
pub fn parse_coordinates(url: &str) -> Result<(f64, f64), ScraperError> {
    let invalid = |reason: String| ScraperError::InvalidCoordinates {
        url: url.to_owned(),
        reason,
    };

    let start = url
        .rfind(MARKER)
        .ok_or_else(|| invalid(format!("missing \"{MARKER}\" marker")))?
        + MARKER.len();

    let segment = url[start..].split('/').next().unwrap_or_default();
    let mut parts = segment.split(',');

    let mut component = |name: &str| -> Result<f64, ScraperError> {
        let raw = parts
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| invalid(format!("missing {name}")))?;
        raw.trim()
            .parse::<f64>()
            .map_err(|e| invalid(format!("{name} \"{raw}\": {e}")))
    };

    let latitude = component("latitude")?;
    let longitude = component("longitude")?;
    Ok((latitude, longitude))
}
