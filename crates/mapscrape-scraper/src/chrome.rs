//! [`PageClient`] over the Chrome DevTools protocol.
//!
//! Element handles are lazy: each one is an XPath that pins a single match
//! (`(<locator>)[n]`, or `<handle>/..` for a parent) and is re-resolved on
//! every call. A handle therefore follows whatever element currently sits at
//! that position, which is what the scroll-then-read flow expects.

use std::cell::Cell;
use std::path::Path;
use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::input::{
    DispatchKeyEventParams, DispatchKeyEventType, DispatchMouseEventParams,
    DispatchMouseEventType,
};
use chromiumoxide::error::CdpError;
use chromiumoxide::{Browser, BrowserConfig, Element, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::page::{ElementHandle, Locator, PageClient, PageError};

fn cdp(err: CdpError) -> PageError {
    PageError::Browser(err.to_string())
}

/// A launched Chromium instance and the task pumping its CDP connection.
pub struct ChromeBrowser {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl ChromeBrowser {
    /// Launches Chromium, headed unless `headless` is set.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Browser`] if the browser cannot be configured or
    /// started.
    pub async fn launch(headless: bool, executable: Option<&Path>) -> Result<Self, PageError> {
        let mut builder = BrowserConfig::builder();
        if !headless {
            builder = builder.with_head();
        }
        if let Some(path) = executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(PageError::Browser)?;

        let (browser, mut handler) = Browser::launch(config).await.map_err(cdp)?;
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!(error = %e, "browser handler stopped");
                    break;
                }
            }
        });

        tracing::info!(headless, "browser launched");
        Ok(Self { browser, handler })
    }

    /// Opens a blank tab.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Browser`] if the tab cannot be created.
    pub async fn new_page(&self) -> Result<ChromePage, PageError> {
        let page = self.browser.new_page("about:blank").await.map_err(cdp)?;
        Ok(ChromePage::new(page))
    }

    /// Closes the browser and waits for the process to exit.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Browser`] if the close command fails.
    pub async fn close(mut self) -> Result<(), PageError> {
        self.browser.close().await.map_err(cdp)?;
        self.browser.wait().await.map_err(|e| PageError::Browser(e.to_string()))?;
        self.handler.abort();
        Ok(())
    }
}

/// A single browser tab.
///
/// Driven by one task at a time, so the last hover position is a plain
/// [`Cell`].
pub struct ChromePage {
    page: Page,
    pointer: Cell<Option<(f64, f64)>>,
}

impl ChromePage {
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            page,
            pointer: Cell::new(None),
        }
    }

    async fn first(&self, xpath: &str) -> Result<Element, PageError> {
        self.page
            .find_xpath(xpath)
            .await
            .map_err(|_| PageError::NotFound {
                locator: xpath.to_owned(),
            })
    }

    async fn dispatch_key(&self, kind: DispatchKeyEventType, key: &str) -> Result<(), PageError> {
        let mut builder = DispatchKeyEventParams::builder()
            .r#type(kind.clone())
            .key(key)
            .code(key);
        if key == "Enter" {
            builder = builder.windows_virtual_key_code(13).native_virtual_key_code(13);
            if kind == DispatchKeyEventType::KeyDown {
                builder = builder.text("\r");
            }
        }
        let params = builder.build().map_err(PageError::Browser)?;
        self.page.execute(params).await.map_err(cdp)?;
        Ok(())
    }
}

/// Where wheel events are dispatched: the last hovered point, else the
/// viewport origin.
fn wheel_origin(last_hover: Option<(f64, f64)>) -> (f64, f64) {
    last_hover.unwrap_or((0.0, 0.0))
}

/// XPath snapshot length for `xpath`, evaluated in the page.
fn count_script(xpath: &str) -> String {
    let literal = xpath_literal(xpath);
    format!(
        "document.evaluate({literal}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null).snapshotLength"
    )
}

/// Quotes `xpath` as a JavaScript string literal.
fn xpath_literal(xpath: &str) -> String {
    let mut out = String::with_capacity(xpath.len() + 2);
    out.push('"');
    for c in xpath.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// XPath selecting the `position`-th (1-based) match of `locator`.
fn nth_xpath(locator: &str, position: usize) -> String {
    format!("({locator})[{position}]")
}

impl PageClient for ChromePage {
    type Element = ChromeElement;

    async fn goto(&self, url: &str, timeout: Duration) -> Result<(), PageError> {
        match tokio::time::timeout(timeout, self.page.goto(url)).await {
            Ok(result) => result.map(|_| ()).map_err(cdp),
            Err(_) => Err(PageError::Timeout {
                url: url.to_owned(),
                timeout_secs: timeout.as_secs(),
            }),
        }
    }

    async fn fill(&self, locator: &Locator, text: &str) -> Result<(), PageError> {
        let input = self.first(locator.as_str()).await?;
        input.click().await.map_err(cdp)?;
        input
            .call_js_fn("function() { this.value = ''; }", false)
            .await
            .map_err(cdp)?;
        input.type_str(text).await.map_err(cdp)?;
        Ok(())
    }

    async fn press_key(&self, key: &str) -> Result<(), PageError> {
        self.dispatch_key(DispatchKeyEventType::KeyDown, key).await?;
        self.dispatch_key(DispatchKeyEventType::KeyUp, key).await
    }

    async fn hover(&self, locator: &Locator) -> Result<(), PageError> {
        let element = self.first(locator.as_str()).await?;
        element.hover().await.map_err(cdp)?;
        let point = element.clickable_point().await.map_err(cdp)?;
        self.pointer.set(Some((point.x, point.y)));
        Ok(())
    }

    async fn scroll(&self, dx: f64, dy: f64) -> Result<(), PageError> {
        let (x, y) = wheel_origin(self.pointer.get());
        let params = DispatchMouseEventParams::builder()
            .r#type(DispatchMouseEventType::MouseWheel)
            .x(x)
            .y(y)
            .delta_x(dx)
            .delta_y(dy)
            .build()
            .map_err(PageError::Browser)?;
        self.page.execute(params).await.map_err(cdp)?;
        Ok(())
    }

    async fn count(&self, locator: &Locator) -> Result<usize, PageError> {
        let n: u64 = self
            .page
            .evaluate(count_script(locator.as_str()))
            .await
            .map_err(cdp)?
            .into_value()
            .map_err(|e| PageError::Browser(e.to_string()))?;
        usize::try_from(n).map_err(|e| PageError::Browser(e.to_string()))
    }

    async fn all(
        &self,
        locator: &Locator,
        limit: Option<usize>,
    ) -> Result<Vec<ChromeElement>, PageError> {
        let total = self.count(locator).await?;
        let take = limit.map_or(total, |limit| limit.min(total));
        Ok((1..=take)
            .map(|position| ChromeElement {
                page: self.page.clone(),
                xpath: nth_xpath(locator.as_str(), position),
            })
            .collect())
    }

    async fn parent(&self, element: &ChromeElement) -> Result<ChromeElement, PageError> {
        Ok(ChromeElement {
            page: self.page.clone(),
            xpath: format!("{}/..", element.xpath),
        })
    }

    async fn current_url(&self) -> Result<String, PageError> {
        self.page
            .url()
            .await
            .map_err(cdp)?
            .ok_or_else(|| PageError::Browser("page has no URL".to_owned()))
    }
}

/// Lazy handle to one element, re-resolved by XPath on each call.
#[derive(Debug, Clone)]
pub struct ChromeElement {
    page: Page,
    xpath: String,
}

impl ChromeElement {
    #[must_use]
    pub fn xpath(&self) -> &str {
        &self.xpath
    }

    async fn resolve(&self) -> Result<Element, PageError> {
        self.page
            .find_xpath(self.xpath.as_str())
            .await
            .map_err(|_| PageError::NotFound {
                locator: self.xpath.clone(),
            })
    }
}

impl ElementHandle for ChromeElement {
    async fn inner_text(&self) -> Result<String, PageError> {
        let element = self.resolve().await?;
        Ok(element.inner_text().await.map_err(cdp)?.unwrap_or_default())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, PageError> {
        let element = self.resolve().await?;
        element.attribute(name).await.map_err(cdp)
    }

    async fn click(&self) -> Result<(), PageError> {
        let element = self.resolve().await?;
        element.click().await.map_err(cdp)?;
        Ok(())
    }
}
