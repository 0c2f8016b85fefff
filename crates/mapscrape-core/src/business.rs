//! Records extracted from a map-search result set.

use serde::{Serialize, Serializer};

/// Number of reviews shown for a listing.
///
/// `Absent` means the detail view showed no review summary at all, which is
/// not the same thing as a listing with zero reviews. It serializes as an
/// empty string so exported sheets show a blank cell rather than `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReviewCount {
    Count(u64),
    #[default]
    Absent,
}

impl ReviewCount {
    #[must_use]
    pub fn value(self) -> Option<u64> {
        match self {
            ReviewCount::Count(n) => Some(n),
            ReviewCount::Absent => None,
        }
    }
}

impl From<Option<u64>> for ReviewCount {
    fn from(value: Option<u64>) -> Self {
        value.map_or(ReviewCount::Absent, ReviewCount::Count)
    }
}

impl Serialize for ReviewCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ReviewCount::Count(n) => serializer.serialize_u64(*n),
            ReviewCount::Absent => serializer.serialize_str(""),
        }
    }
}

/// Average star rating shown for a listing. Same absence rule as [`ReviewCount`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ReviewAverage {
    Average(f64),
    #[default]
    Absent,
}

impl ReviewAverage {
    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            ReviewAverage::Average(v) => Some(v),
            ReviewAverage::Absent => None,
        }
    }
}

impl From<Option<f64>> for ReviewAverage {
    fn from(value: Option<f64>) -> Self {
        value.map_or(ReviewAverage::Absent, ReviewAverage::Average)
    }
}

impl Serialize for ReviewAverage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ReviewAverage::Average(v) => serializer.serialize_f64(*v),
            ReviewAverage::Absent => serializer.serialize_str(""),
        }
    }
}

/// One business extracted from a listing's detail view.
///
/// Field order is the export column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Business {
    pub name: String,
    pub address: String,
    pub website: String,
    pub phone: String,
    pub review_count: ReviewCount,
    pub review_average: ReviewAverage,
    pub latitude: f64,
    pub longitude: f64,
}

impl Business {
    /// Column names in export order.
    pub const COLUMNS: [&'static str; 8] = [
        "name",
        "address",
        "website",
        "phone",
        "review_count",
        "review_average",
        "latitude",
        "longitude",
    ];
}

/// All businesses extracted for a single query, in extraction order.
///
/// Duplicates are kept: a listing that shows up twice while scrolling is
/// extracted twice.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    query: String,
    businesses: Vec<Business>,
}

impl ResultSet {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            businesses: Vec::new(),
        }
    }

    pub fn push(&mut self, business: Business) {
        self.businesses.push(business);
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn businesses(&self) -> &[Business] {
        &self.businesses
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.businesses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.businesses.is_empty()
    }
}

/// How many listings to collect per query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Target {
    Bounded(usize),
    /// Keep scrolling until the provider stops producing new listings.
    #[default]
    Unbounded,
}

impl Target {
    /// Returns `true` once `count` listings are enough to stop scrolling.
    /// Never true for [`Target::Unbounded`].
    #[must_use]
    pub fn is_satisfied_by(self, count: usize) -> bool {
        match self {
            Target::Bounded(n) => count >= n,
            Target::Unbounded => false,
        }
    }

    #[must_use]
    pub fn limit(self) -> Option<usize> {
        match self {
            Target::Bounded(n) => Some(n),
            Target::Unbounded => None,
        }
    }
}

/// A missing total and a total of zero both mean "no limit".
impl From<Option<usize>> for Target {
    fn from(total: Option<usize>) -> Self {
        match total {
            Some(n) if n > 0 => Target::Bounded(n),
            _ => Target::Unbounded,
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Bounded(n) => write!(f, "{n}"),
            Target::Unbounded => write!(f, "unbounded"),
        }
    }
}
