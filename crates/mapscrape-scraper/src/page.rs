//! Capabilities the scraper needs from a browser-automation client.
//!
//! The collector, extractor and session are written against these traits
//! only. [`crate::chrome::ChromePage`] implements them over the Chrome
//! DevTools protocol; tests implement them with scripted fakes.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// An XPath expression matching zero or more elements on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator(String);

impl Locator {
    #[must_use]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self(expr.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum PageError {
    #[error("no element matches {locator}")]
    NotFound { locator: String },

    #[error("navigation to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    #[error("browser error: {0}")]
    Browser(String),
}

/// A page the scraper drives. Every call completes before the next one is
/// issued; implementations need no internal synchronisation beyond that.
#[allow(async_fn_in_trait)]
pub trait PageClient {
    type Element: ElementHandle;

    async fn goto(&self, url: &str, timeout: Duration) -> Result<(), PageError>;

    /// Replace the contents of the first input matching `locator` with `text`.
    async fn fill(&self, locator: &Locator, text: &str) -> Result<(), PageError>;

    /// Press a named key (e.g. `"Enter"`) on the focused element.
    async fn press_key(&self, key: &str) -> Result<(), PageError>;

    async fn hover(&self, locator: &Locator) -> Result<(), PageError>;

    /// Mouse-wheel scroll at the last hovered position.
    async fn scroll(&self, dx: f64, dy: f64) -> Result<(), PageError>;

    async fn count(&self, locator: &Locator) -> Result<usize, PageError>;

    /// All matches in document order, truncated to `limit` when given.
    async fn all(
        &self,
        locator: &Locator,
        limit: Option<usize>,
    ) -> Result<Vec<Self::Element>, PageError>;

    /// The element enclosing `element`.
    async fn parent(&self, element: &Self::Element) -> Result<Self::Element, PageError>;

    async fn current_url(&self) -> Result<String, PageError>;
}

#[allow(async_fn_in_trait)]
pub trait ElementHandle {
    async fn inner_text(&self) -> Result<String, PageError>;

    /// `Ok(None)` when the element exists but lacks the attribute.
    async fn attribute(&self, name: &str) -> Result<Option<String>, PageError>;

    async fn click(&self) -> Result<(), PageError>;
}
