//! Scroll-and-count collection of result listings.
//!
//! The results panel loads more entries as it is scrolled. Each step scrolls
//! once, waits for the panel to settle and re-counts the listing anchors:
//!
//! - count reached the target: **Satisfied**, keep exactly the first
//!   `target` anchors and resolve each to its enclosing container;
//! - count equal to the previous step: **Exhausted**, the provider has
//!   nothing more to give, keep every anchor currently on the page;
//! - otherwise scroll again.
//!
//! Stall detection compares raw counts only. A provider that swaps listings
//! without changing the total looks exhausted.

use mapscrape_core::Target;

use crate::error::ScraperError;
use crate::locators::LISTING_ANCHOR;
use crate::page::{Locator, PageClient};
use crate::settle::{SettlePhase, SettlePolicy};

/// Default wheel delta per scroll step, in pixels.
pub const DEFAULT_SCROLL_STEP_PX: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectOutcome {
    /// The target count was reached.
    Satisfied,
    /// Scrolling stopped producing new listings before the target.
    Exhausted,
}

impl std::fmt::Display for CollectOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectOutcome::Satisfied => write!(f, "satisfied"),
            CollectOutcome::Exhausted => write!(f, "exhausted"),
        }
    }
}

/// Listing handles produced by one collection pass.
#[derive(Debug)]
pub struct Collected<E> {
    pub listings: Vec<E>,
    pub outcome: CollectOutcome,
    /// Number of scroll steps taken.
    pub steps: usize,
}

#[derive(Debug, Clone)]
pub struct ListingCollector {
    listing: Locator,
    scroll_step_px: f64,
}

impl Default for ListingCollector {
    fn default() -> Self {
        Self::new(Locator::xpath(LISTING_ANCHOR), DEFAULT_SCROLL_STEP_PX)
    }
}

impl ListingCollector {
    #[must_use]
    pub fn new(listing: Locator, scroll_step_px: f64) -> Self {
        Self {
            listing,
            scroll_step_px,
        }
    }

    #[must_use]
    pub fn listing_locator(&self) -> &Locator {
        &self.listing
    }

    /// Scrolls the results panel until `target` listings are loaded or no
    /// new listings appear.
    ///
    /// With [`Target::Unbounded`] only the stall rule can end the loop.
    ///
    /// # Errors
    ///
    /// Propagates any page error from hovering, scrolling, counting or
    /// resolving listings.
    pub async fn collect<P, S>(
        &self,
        page: &P,
        settle: &S,
        target: Target,
    ) -> Result<Collected<P::Element>, ScraperError>
    where
        P: PageClient,
        S: SettlePolicy,
    {
        // Wheel events only reach the results panel while the pointer is over it.
        page.hover(&self.listing).await?;

        let mut previous = 0usize;
        let mut steps = 0usize;

        loop {
            page.scroll(0.0, self.scroll_step_px).await?;
            settle.settle(SettlePhase::Scroll).await;
            steps += 1;

            let current = page.count(&self.listing).await?;

            if target.is_satisfied_by(current) {
                let anchors = page.all(&self.listing, target.limit()).await?;
                let mut listings = Vec::with_capacity(anchors.len());
                for anchor in &anchors {
                    listings.push(page.parent(anchor).await?);
                }
                tracing::info!(count = listings.len(), steps, %target, "collected listings");
                return Ok(Collected {
                    listings,
                    outcome: CollectOutcome::Satisfied,
                    steps,
                });
            }

            if current == previous {
                let listings = page.all(&self.listing, None).await?;
                tracing::info!(
                    count = listings.len(),
                    steps,
                    %target,
                    "reached all available listings"
                );
                return Ok(Collected {
                    listings,
                    outcome: CollectOutcome::Exhausted,
                    steps,
                });
            }

            tracing::debug!(count = current, steps, "listings loaded so far");
            previous = current;
        }
    }
}
