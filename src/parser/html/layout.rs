use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::core::{ScraperError, ScraperResult};

/// CSS selectors describing where each field lives on a product detail page.
///
/// The site ships hashed CSS-module class names that change between releases,
/// so every selector can be overridden from the `layout` section of the
/// settings file. Missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    pub title: String,
    pub pack_size: String,
    pub image: String,
    pub section_heading: String,
    pub warning_title: String,
    pub slashed_price: String,
    pub best_price: String,
    pub price: String,
    pub breadcrumbs: String,
    pub overview: String,
    /// Element whose presence means the page finished client-side rendering.
    pub readiness_marker: String,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            title: "h1.DrugHeader__title___1NKLq".to_string(),
            pack_size: "div.DrugPriceBox__quantity___2LGBX".to_string(),
            image: "div.slick-list img".to_string(),
            section_heading: "h2.DrugOverview__title___1OwgG".to_string(),
            warning_title: "div.DrugOverview__warning-top___UD3xX".to_string(),
            slashed_price: "div.DrugPriceBox__bestprice-slashed-price___2ANwD".to_string(),
            best_price: "div.DrugPriceBox__best-price___32JXw".to_string(),
            price: "div.DrugPriceBox__price___dj2lv".to_string(),
            breadcrumbs: "div#breadcrumbs-drug".to_string(),
            overview: "div#overview".to_string(),
            readiness_marker: "#overview".to_string(),
        }
    }
}

impl PageLayout {
    pub fn compile(&self) -> ScraperResult<CompiledLayout> {
        // The marker is only handed to the browser, but a typo should still
        // fail before any session is launched.
        compile_selector(&self.readiness_marker)?;

        Ok(CompiledLayout {
            title: compile_selector(&self.title)?,
            pack_size: compile_selector(&self.pack_size)?,
            image: compile_selector(&self.image)?,
            section_heading: compile_selector(&self.section_heading)?,
            warning_title: compile_selector(&self.warning_title)?,
            slashed_price: compile_selector(&self.slashed_price)?,
            best_price: compile_selector(&self.best_price)?,
            price: compile_selector(&self.price)?,
            breadcrumbs: compile_selector(&self.breadcrumbs)?,
            overview: compile_selector(&self.overview)?,
            readiness_marker: self.readiness_marker.clone(),
        })
    }
}

/// A [`PageLayout`] with every selector parsed once, shared by all workers.
#[derive(Debug, Clone)]
pub struct CompiledLayout {
    pub(crate) title: Selector,
    pub(crate) pack_size: Selector,
    pub(crate) image: Selector,
    pub(crate) section_heading: Selector,
    pub(crate) warning_title: Selector,
    pub(crate) slashed_price: Selector,
    pub(crate) best_price: Selector,
    pub(crate) price: Selector,
    pub(crate) breadcrumbs: Selector,
    pub(crate) overview: Selector,
    readiness_marker: String,
}

impl CompiledLayout {
    pub fn readiness_marker(&self) -> &str {
        &self.readiness_marker
    }
}

pub(crate) fn compile_selector(selector: &str) -> ScraperResult<Selector> {
    Selector::parse(selector).map_err(|e| ScraperError::SelectorError {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}
