//! Scripted in-memory page used by the integration tests.
//!
//! Each search query maps to a [`Scenario`]: the sequence of listing counts
//! the results panel reports after each scroll, and the detail view shown
//! for each listing. Filling the search box selects the scenario.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use mapscrape_scraper::locators::{FieldLocators, LISTING_ANCHOR, SEARCH_BOX};
use mapscrape_scraper::{ElementHandle, Locator, PageClient, PageError};

pub const SEARCH_URL: &str = "https://www.google.com/maps";

#[derive(Debug, Clone, Default)]
pub struct FakeNode {
    pub text: String,
    pub attrs: HashMap<String, String>,
}

impl FakeNode {
    pub fn text(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            attrs: HashMap::new(),
        }
    }

    pub fn attr(name: &str, value: &str) -> Self {
        let mut attrs = HashMap::new();
        attrs.insert(name.to_owned(), value.to_owned());
        Self {
            text: String::new(),
            attrs,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FakeListing {
    pub label: Option<String>,
    pub url: String,
    pub fields: HashMap<String, FakeNode>,
    pub fail_click: bool,
}

impl FakeListing {
    /// A listing whose detail view shows no optional fields at all.
    pub fn bare(index: usize) -> Self {
        Self {
            label: Some(format!("Listing {index}")),
            url: place_url(index),
            fields: HashMap::new(),
            fail_click: false,
        }
    }

    /// A listing with every field populated.
    pub fn full(index: usize) -> Self {
        let loc = FieldLocators::google_maps();
        let mut listing = Self::bare(index);
        listing
            .fields
            .insert(loc.address.to_string(), FakeNode::text(&format!("Rua {index}, 100")));
        listing.fields.insert(
            loc.website.to_string(),
            FakeNode::text(&format!("listing{index}.com.br")),
        );
        listing
            .fields
            .insert(loc.phone.to_string(), FakeNode::text("(11) 5555-0000"));
        listing.fields.insert(
            loc.review_count.to_string(),
            FakeNode::text("1,234 avaliações"),
        );
        listing.fields.insert(
            loc.review_average.to_string(),
            FakeNode::attr("aria-label", "4,5 estrelas"),
        );
        listing
    }

    pub fn with_field(mut self, locator: &Locator, node: FakeNode) -> Self {
        self.fields.insert(locator.to_string(), node);
        self
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_owned();
        self
    }

    pub fn without_label(mut self) -> Self {
        self.label = None;
        self
    }

    pub fn failing_click(mut self) -> Self {
        self.fail_click = true;
        self
    }
}

pub fn place_url(index: usize) -> String {
    let lat = -23.5 - index as f64 / 100.0;
    let lng = -46.6 + index as f64 / 100.0;
    format!("https://www.google.com/maps/place/Listing+{index}/@{lat},{lng},15z/data=!4m6")
}

#[derive(Debug, Clone, Default)]
pub struct Scenario {
    /// Listing count reported after each scroll; the last value repeats.
    pub counts: Vec<usize>,
    /// Detail views by listing position; positions past the end get
    /// [`FakeListing::full`].
    pub listings: Vec<FakeListing>,
}

impl Scenario {
    pub fn new(counts: &[usize]) -> Self {
        Self {
            counts: counts.to_vec(),
            listings: Vec::new(),
        }
    }

    pub fn with_listings(mut self, listings: Vec<FakeListing>) -> Self {
        self.listings = listings;
        self
    }

    fn listing(&self, index: usize) -> FakeListing {
        self.listings
            .get(index)
            .cloned()
            .unwrap_or_else(|| FakeListing::full(index))
    }
}

#[derive(Debug, Default)]
struct State {
    scenarios: HashMap<String, Scenario>,
    active: RefCell<Option<String>>,
    scrolls: Cell<usize>,
    loaded: Cell<usize>,
    open: Cell<Option<usize>>,
    calls: RefCell<Vec<String>>,
}

impl State {
    fn scenario(&self) -> Result<Scenario, PageError> {
        let active = self.active.borrow();
        let key = active
            .as_deref()
            .ok_or_else(|| PageError::Browser("no query submitted".to_owned()))?;
        self.scenarios
            .get(key)
            .cloned()
            .ok_or_else(|| PageError::Browser(format!("no scenario for {key}")))
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

#[derive(Clone)]
pub struct FakePage {
    state: Rc<State>,
}

impl FakePage {
    pub fn new(scenarios: Vec<(&str, Scenario)>) -> Self {
        let state = State {
            scenarios: scenarios
                .into_iter()
                .map(|(q, s)| (q.to_owned(), s))
                .collect(),
            ..State::default()
        };
        Self {
            state: Rc::new(state),
        }
    }

    /// A page with one scenario already active, for driving the collector
    /// or extractor directly.
    pub fn single(scenario: Scenario) -> Self {
        let page = Self::new(vec![("", scenario)]);
        *page.state.active.borrow_mut() = Some(String::new());
        page
    }

    pub fn scrolls(&self) -> usize {
        self.state.scrolls.get()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.calls.borrow().clone()
    }

    /// Opens the detail view of listing `index` without clicking.
    pub fn open(&self, index: usize) {
        self.state.open.set(Some(index));
    }

    pub fn anchor(&self, index: usize) -> FakeElement {
        FakeElement {
            state: Rc::clone(&self.state),
            kind: Kind::Anchor(index),
        }
    }

    fn open_field(&self, locator: &Locator) -> Result<Option<FakeNode>, PageError> {
        let Some(index) = self.state.open.get() else {
            return Ok(None);
        };
        let listing = self.state.scenario()?.listing(index);
        Ok(listing.fields.get(locator.as_str()).cloned())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Kind {
    Anchor(usize),
    Container(usize),
    Field(String),
}

#[derive(Clone)]
pub struct FakeElement {
    state: Rc<State>,
    kind: Kind,
}

impl FakeElement {
    pub fn is_container(&self) -> bool {
        matches!(self.kind, Kind::Container(_))
    }

    pub fn position(&self) -> Option<usize> {
        match self.kind {
            Kind::Anchor(i) | Kind::Container(i) => Some(i),
            Kind::Field(_) => None,
        }
    }
}

impl PageClient for FakePage {
    type Element = FakeElement;

    async fn goto(&self, url: &str, _timeout: Duration) -> Result<(), PageError> {
        self.state.record(format!("goto {url}"));
        Ok(())
    }

    async fn fill(&self, locator: &Locator, text: &str) -> Result<(), PageError> {
        assert_eq!(locator.as_str(), SEARCH_BOX, "fill targets the search box");
        self.state.record(format!("fill {text}"));
        *self.state.active.borrow_mut() = Some(text.to_owned());
        self.state.scrolls.set(0);
        self.state.loaded.set(0);
        self.state.open.set(None);
        Ok(())
    }

    async fn press_key(&self, key: &str) -> Result<(), PageError> {
        self.state.record(format!("press {key}"));
        Ok(())
    }

    async fn hover(&self, locator: &Locator) -> Result<(), PageError> {
        self.state.record(format!("hover {locator}"));
        Ok(())
    }

    async fn scroll(&self, _dx: f64, dy: f64) -> Result<(), PageError> {
        assert!(dy > 0.0, "collector scrolls down");
        let scenario = self.state.scenario()?;
        let step = self.state.scrolls.get();
        let loaded = scenario
            .counts
            .get(step)
            .or_else(|| scenario.counts.last())
            .copied()
            .unwrap_or(0);
        self.state.scrolls.set(step + 1);
        self.state.loaded.set(loaded);
        Ok(())
    }

    async fn count(&self, locator: &Locator) -> Result<usize, PageError> {
        if locator.as_str() == LISTING_ANCHOR {
            return Ok(self.state.loaded.get());
        }
        Ok(usize::from(self.open_field(locator)?.is_some()))
    }

    async fn all(
        &self,
        locator: &Locator,
        limit: Option<usize>,
    ) -> Result<Vec<FakeElement>, PageError> {
        if locator.as_str() == LISTING_ANCHOR {
            let loaded = self.state.loaded.get();
            let take = limit.map_or(loaded, |l| l.min(loaded));
            return Ok((0..take).map(|i| self.anchor(i)).collect());
        }
        let found = self.open_field(locator)?.map(|_| FakeElement {
            state: Rc::clone(&self.state),
            kind: Kind::Field(locator.to_string()),
        });
        Ok(found.into_iter().take(limit.unwrap_or(usize::MAX)).collect())
    }

    async fn parent(&self, element: &FakeElement) -> Result<FakeElement, PageError> {
        match element.kind {
            Kind::Anchor(i) => Ok(FakeElement {
                state: Rc::clone(&self.state),
                kind: Kind::Container(i),
            }),
            _ => Err(PageError::Browser("only anchors have parents here".to_owned())),
        }
    }

    async fn current_url(&self) -> Result<String, PageError> {
        match self.state.open.get() {
            Some(index) => Ok(self.state.scenario()?.listing(index).url),
            None => Ok(SEARCH_URL.to_owned()),
        }
    }
}

impl ElementHandle for FakeElement {
    async fn inner_text(&self) -> Result<String, PageError> {
        match &self.kind {
            Kind::Field(locator) => {
                let index = self.state.open.get().ok_or_else(|| PageError::NotFound {
                    locator: locator.clone(),
                })?;
                let listing = self.state.scenario()?.listing(index);
                listing
                    .fields
                    .get(locator)
                    .map(|node| node.text.clone())
                    .ok_or_else(|| PageError::NotFound {
                        locator: locator.clone(),
                    })
            }
            Kind::Anchor(i) | Kind::Container(i) => Ok(self
                .state
                .scenario()?
                .listing(*i)
                .label
                .unwrap_or_default()),
        }
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, PageError> {
        match &self.kind {
            Kind::Field(locator) => {
                let index = self.state.open.get().ok_or_else(|| PageError::NotFound {
                    locator: locator.clone(),
                })?;
                let listing = self.state.scenario()?.listing(index);
                let node = listing.fields.get(locator).ok_or_else(|| PageError::NotFound {
                    locator: locator.clone(),
                })?;
                Ok(node.attrs.get(name).cloned())
            }
            Kind::Anchor(i) | Kind::Container(i) => {
                if name == "aria-label" {
                    Ok(self.state.scenario()?.listing(*i).label)
                } else {
                    Ok(None)
                }
            }
        }
    }

    async fn click(&self) -> Result<(), PageError> {
        match self.kind {
            Kind::Anchor(i) | Kind::Container(i) => {
                let listing = self.state.scenario()?.listing(i);
                if listing.fail_click {
                    return Err(PageError::Browser(format!("listing {i} detached")));
                }
                self.state.record(format!("click {i}"));
                self.state.open.set(Some(i));
                Ok(())
            }
            Kind::Field(_) => Err(PageError::Browser("fields are not clickable".to_owned())),
        }
    }
}
