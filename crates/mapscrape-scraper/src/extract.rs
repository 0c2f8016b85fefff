//! Field extraction for an open listing detail view.
//!
//! The detail panel simply omits fields a business has not filled in, so
//! every field is probed for presence before it is read. Reading a missing
//! element is an error; probing first is what lets absent fields fall back
//! to their defaults instead of failing the whole listing.

use mapscrape_core::{Business, ReviewAverage, ReviewCount};

use crate::coordinates::parse_coordinates;
use crate::error::ScraperError;
use crate::locators::FieldLocators;
use crate::page::{ElementHandle, Locator, PageClient, PageError};
use crate::settle::{SettlePhase, SettlePolicy};

/// What to read from the first element matching a locator.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    /// The element's rendered inner text.
    Text,
    /// A named attribute; a missing attribute reads as `""`.
    Attribute(&'a str),
}

/// Reads and coerces the first match of `locator`, or returns `Ok(None)`
/// when nothing matches.
///
/// # Errors
///
/// Returns an error if the page read fails or `coerce` rejects the raw value.
pub async fn try_read<P, T, F>(
    page: &P,
    locator: &Locator,
    source: Source<'_>,
    coerce: F,
) -> Result<Option<T>, ScraperError>
where
    P: PageClient,
    F: FnOnce(&str) -> Result<T, ScraperError>,
{
    if page.count(locator).await? == 0 {
        return Ok(None);
    }

    let first = page
        .all(locator, Some(1))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| PageError::NotFound {
            locator: locator.to_string(),
        })?;

    let raw = match source {
        Source::Text => first.inner_text().await?,
        Source::Attribute(name) => first.attribute(name).await?.unwrap_or_default(),
    };
    coerce(&raw).map(Some)
}

/// Parses a review-count label such as `"1,234 avaliações"` or `"(1.234)"`.
///
/// Takes the first whitespace-separated token, drops a leading non-digit
/// prefix and a closing `)`, and removes `,` separators. A `.` is accepted
/// only as a thousands separator between groups of exactly three digits, so
/// `"1.5K"` or `"1,234.5"` are rejected rather than misread.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidNumber`] if no integer remains.
pub fn parse_review_count(raw: &str) -> Result<u64, ScraperError> {
    let invalid = || ScraperError::InvalidNumber {
        field: "review_count",
        raw: raw.to_owned(),
    };

    let token = raw.split_whitespace().next().ok_or_else(invalid)?;
    let body = token
        .trim_start_matches(|c: char| !c.is_ascii_digit())
        .trim_end_matches(')');

    let digits = if body.contains('.') {
        dot_grouped_digits(body).ok_or_else(invalid)?
    } else {
        body.replace(',', "")
    };
    digits.parse::<u64>().map_err(|_| invalid())
}

/// `"1.234.567"` → `"1234567"`; anything other than 1-3 leading digits
/// followed by dot-separated groups of exactly three is `None`.
fn dot_grouped_digits(body: &str) -> Option<String> {
    let mut groups = body.split('.');
    let lead = groups.next()?;
    if lead.is_empty() || lead.len() > 3 || !lead.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut digits = lead.to_owned();
    for group in groups {
        if group.len() != 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

/// Parses a rating label such as `"4,5 estrelas"` or `"4.5 stars"`.
///
/// Takes the first whitespace-separated token and maps a decimal comma to a
/// decimal point.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidNumber`] if the token is not a number.
pub fn parse_review_average(raw: &str) -> Result<f64, ScraperError> {
    let invalid = || ScraperError::InvalidNumber {
        field: "review_average",
        raw: raw.to_owned(),
    };

    let token = raw.split_whitespace().next().ok_or_else(invalid)?;
    let normalized = token
        .trim_matches(|c: char| !c.is_ascii_digit())
        .replace(',', ".");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(invalid)
}

#[allow(clippy::unnecessary_wraps)]
fn as_text(raw: &str) -> Result<String, ScraperError> {
    Ok(raw.to_owned())
}

/// Turns listing handles into [`Business`] records.
#[derive(Debug, Clone, Default)]
pub struct FieldExtractor {
    locators: FieldLocators,
}

impl FieldExtractor {
    #[must_use]
    pub fn new(locators: FieldLocators) -> Self {
        Self { locators }
    }

    #[must_use]
    pub fn locators(&self) -> &FieldLocators {
        &self.locators
    }

    /// Opens `listing`'s detail view and extracts every field.
    ///
    /// # Errors
    ///
    /// Any failed click, read, numeric coercion or coordinate parse fails
    /// the whole listing. Nothing partial is returned.
    pub async fn extract_listing<P, S>(
        &self,
        page: &P,
        settle: &S,
        listing: &P::Element,
    ) -> Result<Business, ScraperError>
    where
        P: PageClient,
        S: SettlePolicy,
    {
        listing.click().await?;
        settle.settle(SettlePhase::Detail).await;
        self.extract_open(page, listing).await
    }

    /// Extracts fields from the detail view that is already open.
    ///
    /// # Errors
    ///
    /// See [`Self::extract_listing`].
    pub async fn extract_open<P>(
        &self,
        page: &P,
        listing: &P::Element,
    ) -> Result<Business, ScraperError>
    where
        P: PageClient,
    {
        let loc = &self.locators;

        let name = listing
            .attribute(&loc.label_attribute)
            .await?
            .unwrap_or_default();

        let address = try_read(page, &loc.address, Source::Text, as_text)
            .await?
            .unwrap_or_default();
        let website = try_read(page, &loc.website, Source::Text, as_text)
            .await?
            .unwrap_or_default();
        let phone = try_read(page, &loc.phone, Source::Text, as_text)
            .await?
            .unwrap_or_default();
        let review_count: ReviewCount =
            try_read(page, &loc.review_count, Source::Text, parse_review_count)
                .await?
                .into();
        let review_average: ReviewAverage = try_read(
            page,
            &loc.review_average,
            Source::Attribute(&loc.label_attribute),
            parse_review_average,
        )
        .await?
        .into();

        let url = page.current_url().await?;
        let (latitude, longitude) = parse_coordinates(&url)?;

        Ok(Business {
            name,
            address,
            website,
            phone,
            review_count,
            review_average,
            latitude,
            longitude,
        })
    }
}
