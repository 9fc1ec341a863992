use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::layout::CompiledLayout;
use crate::parser::base::{child_texts, element_text, field, next_element, nth_token};
use crate::parser::patterns::{HOW_TO_USE, INTRODUCTION, LIST_ITEM, SAFETY_ADVICE, USES_OF};

/// One total accessor per output column.
///
/// No method here can fail: whatever is missing from the document turns into
/// the column's default (usually `""`), and nothing one accessor does affects
/// another.
#[derive(Debug, Clone, Copy)]
pub struct FieldExtractor<'l> {
    layout: &'l CompiledLayout,
}

impl<'l> FieldExtractor<'l> {
    pub fn new(layout: &'l CompiledLayout) -> Self {
        Self { layout }
    }

    fn first<'d>(&self, doc: &'d Html, selector: &Selector) -> Option<ElementRef<'d>> {
        doc.select(selector).next()
    }

    fn text_of(&self, doc: &Html, selector: &Selector) -> Option<String> {
        self.first(doc, selector).map(element_text)
    }

    /// Block following the first section heading whose text matches `heading`.
    fn section<'d>(&self, doc: &'d Html, heading: &Regex) -> Option<ElementRef<'d>> {
        doc.select(&self.layout.section_heading)
            .find(|h| heading.is_match(&element_text(*h)))
            .and_then(next_element)
    }

    fn section_text(&self, doc: &Html, heading: &Regex) -> Option<String> {
        self.section(doc, heading).map(element_text)
    }

    fn breadcrumb(&self, doc: &Html, index: usize) -> Option<String> {
        self.text_of(doc, &self.layout.breadcrumbs)?
            .split('>')
            .nth(index)
            .map(|crumb| crumb.trim().to_string())
    }

    /// Title text, `None` only when the title node is missing. The record
    /// builder treats that as "not a product page"; an empty node is kept.
    pub fn title_text(&self, doc: &Html) -> Option<String> {
        self.text_of(doc, &self.layout.title)
    }

    pub fn title(&self, doc: &Html) -> String {
        field("title", || self.title_text(doc))
    }

    pub fn brand_name(&self, doc: &Html) -> String {
        nth_token(&self.title(doc), 0)
    }

    pub fn pack_size(&self, doc: &Html) -> String {
        field("pack_size", || self.text_of(doc, &self.layout.pack_size))
    }

    /// Second token of the pack size, e.g. `"of"` for `"strip of 15 tablets"`.
    pub fn unit(&self, doc: &Html) -> String {
        nth_token(&self.pack_size(doc), 1)
    }

    pub fn image_url(&self, doc: &Html) -> String {
        field("image_url", || {
            self.first(doc, &self.layout.image)?
                .value()
                .attr("src")
                .map(str::to_string)
        })
    }

    pub fn introduction(&self, doc: &Html) -> String {
        field("introduction", || self.section_text(doc, &INTRODUCTION))
    }

    pub fn about(&self, doc: &Html) -> String {
        self.introduction(doc)
    }

    pub fn features(&self, doc: &Html) -> String {
        field("features", || self.section_text(doc, &HOW_TO_USE))
    }

    pub fn direction_of_use(&self, doc: &Html) -> String {
        self.features(doc)
    }

    pub fn dosage(&self, doc: &Html) -> String {
        self.features(doc)
    }

    /// List items of the "Uses of ..." section, one per line.
    pub fn uses_details(&self, doc: &Html) -> String {
        field("uses_details", || {
            let block = self.section(doc, &USES_OF)?;
            let uses: Vec<String> = block.select(&LIST_ITEM).map(element_text).collect();
            Some(uses.join("\n"))
        })
    }

    /// Safety advice rendered as `"<topic> - <verdict>\n\t<detail>"` entries.
    ///
    /// A warning title without a detail block blanks the whole column rather
    /// than emitting a half-formed entry.
    pub fn warnings(&self, doc: &Html) -> String {
        field("warnings", || {
            let block = self.section(doc, &SAFETY_ADVICE)?;
            let mut warnings = String::new();
            for title in block.select(&self.layout.warning_title) {
                let heading = child_texts(title)
                    .into_iter()
                    .filter(|text| !text.is_empty())
                    .collect::<Vec<_>>()
                    .join(" - ");
                let detail = element_text(next_element(title)?);

                warnings.push('\n');
                warnings.push_str(&heading);
                warnings.push_str("\n\t");
                warnings.push_str(&detail);
            }
            Some(warnings.trim().to_string())
        })
    }

    pub fn mrp(&self, doc: &Html) -> String {
        self.text_of(doc, &self.layout.slashed_price)
            .unwrap_or_else(|| self.selling_price(doc))
    }

    pub fn selling_price(&self, doc: &Html) -> String {
        field("selling_price", || {
            self.text_of(doc, &self.layout.best_price)
                .or_else(|| self.text_of(doc, &self.layout.price))
        })
    }

    pub fn sub_category_1(&self, doc: &Html) -> String {
        field("sub_category_1", || self.breadcrumb(doc, 1))
    }

    pub fn sub_category_2(&self, doc: &Html) -> String {
        field("sub_category_2", || self.breadcrumb(doc, 2))
    }

    /// Raw markup of the overview container.
    pub fn overview(&self, doc: &Html) -> String {
        field("overview", || {
            self.first(doc, &self.layout.overview)
                .map(|overview| overview.html())
        })
    }
}
