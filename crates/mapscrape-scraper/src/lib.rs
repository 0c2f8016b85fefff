pub mod chrome;
pub mod collector;
pub mod coordinates;
pub mod error;
pub mod extract;
pub mod locators;
pub mod page;
pub mod session;
pub mod settle;

pub use chrome::{ChromeBrowser, ChromePage};
pub use collector::{CollectOutcome, Collected, ListingCollector};
pub use coordinates::parse_coordinates;
pub use error::ScraperError;
pub use extract::{parse_review_average, parse_review_count, try_read, FieldExtractor, Source};
pub use locators::FieldLocators;
pub use page::{ElementHandle, Locator, PageClient, PageError};
pub use session::{Progress, QueryReport, ResultSink, ScrapeSession, SessionOptions};
pub use settle::{FixedSettle, SettlePhase, SettlePolicy};
