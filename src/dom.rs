//! The host document as seen by the dashboard's components.
//!
//! A [Document] is a set of named [Region]s. Components look up the regions
//! they need when they are constructed and replace their contents with
//! rendered markup. Clicks reach components as a [ClickPath], which resolves
//! the nearest element matching a CSS selector, starting at the click target.

use std::sync::{Arc, Mutex};

use maud::{Markup, PreEscaped, html};
use scraper::{ElementRef, Html, Selector};

use crate::{Error, endpoints::DOCUMENT_REGIONS, lock};

/// A mount point in the host document. Every write replaces the whole contents.
///
/// Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct Region {
    html: Arc<Mutex<String>>,
}

impl Region {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&self, markup: Markup) {
        *lock(&self.html) = markup.into_string();
    }

    /// The current contents as an HTML string.
    pub fn html(&self) -> String {
        lock(&self.html).clone()
    }
}

/// The regions of the host document, keyed by selector and kept in the
/// order they were added.
#[derive(Debug, Clone, Default)]
pub struct Document {
    regions: Vec<(String, Region)>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// A document with every region the dashboard's components use.
    pub fn dashboard() -> Self {
        DOCUMENT_REGIONS
            .iter()
            .fold(Self::new(), |document, selector| document.with_region(selector))
    }

    /// Add an empty region, replacing any region with the same selector.
    pub fn with_region(mut self, selector: &str) -> Self {
        self.regions.retain(|(existing, _)| existing != selector);
        self.regions.push((selector.to_owned(), Region::new()));
        self
    }

    pub fn query(&self, selector: &str) -> Option<Region> {
        self.regions
            .iter()
            .find(|(existing, _)| existing == selector)
            .map(|(_, region)| region.clone())
    }

    /// Every region wrapped in a `section` that names its selector.
    pub fn html(&self) -> String {
        html!(
            @for (selector, region) in &self.regions {
                section data-selector=(selector) { (PreEscaped(region.html())) }
            }
        )
        .into_string()
    }
}

/// An element on a [ClickPath].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// The value of the `data-id` attribute.
    pub data_id: Option<String>,
}

impl Node {
    fn from_element(element: ElementRef<'_>) -> Self {
        let value = element.value();

        Self {
            id: value.id().map(str::to_owned),
            classes: value.classes().map(str::to_owned).collect(),
            data_id: value.attr("data-id").map(str::to_owned),
        }
    }
}

/// A click on an element of some rendered markup.
///
/// The markup is kept as text and parsed when the path is queried, so a
/// path can be held across `.await` points.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickPath {
    markup: String,
    /// Position of the clicked element among all elements, in document order.
    target: usize,
}

impl ClickPath {
    /// A click on the first element of `markup` that matches the CSS
    /// selector `target`.
    ///
    /// # Errors
    /// Returns [Error::InvalidSelector] if `target` cannot be parsed and
    /// [Error::NoMatchingElement] if no element matches it.
    pub fn on(markup: &str, target: &str) -> Result<Self, Error> {
        let selector = parse_selector(target)?;
        let fragment = Html::parse_fragment(markup);

        let position = elements(&fragment)
            .position(|element| selector.matches(&element))
            .ok_or_else(|| Error::NoMatchingElement(target.to_owned()))?;

        Ok(Self {
            markup: markup.to_owned(),
            target: position,
        })
    }

    /// The nearest element, starting at the target itself, that matches the
    /// CSS selector `selector`. A selector that cannot be parsed matches
    /// nothing.
    pub fn closest(&self, selector: &str) -> Option<Node> {
        let selector = parse_selector(selector)
            .inspect_err(|error| tracing::warn!("{error}"))
            .ok()?;
        let fragment = Html::parse_fragment(&self.markup);
        let target = elements(&fragment).nth(self.target)?;

        std::iter::once(target)
            .chain(target.ancestors().filter_map(ElementRef::wrap))
            .find(|element| selector.matches(element))
            .map(Node::from_element)
    }
}

fn parse_selector(css: &str) -> Result<Selector, Error> {
    Selector::parse(css).map_err(|error| Error::InvalidSelector(format!("{css:?}: {error}")))
}

fn elements(fragment: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    fragment
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
}
