//! Output file names derived from query text.

/// Prefix shared by every exported file.
pub const FILE_PREFIX: &str = "google_maps_data_";

/// File stem (no extension) for a query's exports.
///
/// The query is trimmed, then whitespace and path separators become `_`,
/// so `"coffee shop"` maps to `google_maps_data_coffee_shop`.
#[must_use]
pub fn file_stem(query: &str) -> String {
    let body: String = query
        .trim()
        .chars()
        .map(|c| {
            if c.is_whitespace() || matches!(c, '/' | '\\') {
                '_'
            } else {
                c
            }
        })
        .collect();
    format!("{FILE_PREFIX}{body}")
}
