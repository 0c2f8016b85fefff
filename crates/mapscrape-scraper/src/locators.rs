//! XPath locators for the Google Maps search and detail panels.

use crate::page::Locator;

/// Search box on the maps landing page.
pub const SEARCH_BOX: &str = r#"//input[@id="searchboxinput"]"#;

/// One anchor per result entry in the results panel.
pub const LISTING_ANCHOR: &str = r#"//a[contains(@href, "https://www.google.com/maps/place")]"#;

/// Attribute holding a listing's display name, also used for the rating label.
pub const LABEL_ATTRIBUTE: &str = "aria-label";

/// Locators for the fields of an open detail view.
#[derive(Debug, Clone)]
pub struct FieldLocators {
    pub address: Locator,
    pub website: Locator,
    pub phone: Locator,
    pub review_count: Locator,
    pub review_average: Locator,
    pub label_attribute: String,
}

impl FieldLocators {
    #[must_use]
    pub fn google_maps() -> Self {
        Self {
            address: Locator::xpath(
                r#"//button[@data-item-id="address"]//div[contains(@class, "fontBodyMedium")]"#,
            ),
            website: Locator::xpath(
                r#"//a[@data-item-id="authority"]//div[contains(@class, "fontBodyMedium")]"#,
            ),
            phone: Locator::xpath(
                r#"//button[contains(@data-item-id, "phone:tel:")]//div[contains(@class, "fontBodyMedium")]"#,
            ),
            review_count: Locator::xpath(
                r#"//button[@jsaction="pane.reviewChart.moreReviews"]//span"#,
            ),
            review_average: Locator::xpath(
                r#"//div[@jsaction="pane.reviewChart.moreReviews"]//div[@role="img"]"#,
            ),
            label_attribute: LABEL_ATTRIBUTE.to_owned(),
        }
    }
}

impl Default for FieldLocators {
    fn default() -> Self {
        Self::google_maps()
    }
}
