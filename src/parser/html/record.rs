use scraper::Html;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::Url;

use super::extractors::FieldExtractor;
use super::layout::CompiledLayout;
use crate::core::{ScraperError, ScraperResult};
use crate::http::ProductDescriptor;
use crate::parser::base::title_case;

/// Placeholder for pass-through fields the listing did not provide.
pub const NOT_AVAILABLE: &str = "NA";

/// Column names of an [`ExtractedRecord`], in export order.
pub const FIELD_NAMES: [&str; 21] = [
    "product_url",
    "brand_name",
    "title",
    "pack_size",
    "image_url",
    "company_name",
    "company_logo",
    "about",
    "features",
    "uses_details",
    "warnings",
    "introduction",
    "direction_of_use",
    "dosage",
    "unit",
    "mrp",
    "selling_price",
    "category",
    "sub_category_1",
    "sub_category_2",
    "overview[do-not-delete]",
];

/// One normalized product. Every column is always present; extraction
/// failures only ever show up as default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    pub product_url: String,
    pub brand_name: String,
    pub title: String,
    pub pack_size: String,
    pub image_url: String,
    pub company_name: String,
    pub company_logo: String,
    pub about: String,
    pub features: String,
    pub uses_details: String,
    pub warnings: String,
    pub introduction: String,
    pub direction_of_use: String,
    pub dosage: String,
    pub unit: String,
    pub mrp: String,
    pub selling_price: String,
    pub category: String,
    pub sub_category_1: String,
    pub sub_category_2: String,
    #[serde(rename = "overview[do-not-delete]")]
    pub overview: String,
}

impl ExtractedRecord {
    /// Column values in [`FIELD_NAMES`] order.
    pub fn values(&self) -> [&str; 21] {
        [
            &self.product_url,
            &self.brand_name,
            &self.title,
            &self.pack_size,
            &self.image_url,
            &self.company_name,
            &self.company_logo,
            &self.about,
            &self.features,
            &self.uses_details,
            &self.warnings,
            &self.introduction,
            &self.direction_of_use,
            &self.dosage,
            &self.unit,
            &self.mrp,
            &self.selling_price,
            &self.category,
            &self.sub_category_1,
            &self.sub_category_2,
            &self.overview,
        ]
    }
}

/// Assembles an [`ExtractedRecord`] from a rendered detail page and the
/// listing descriptor it came from.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    base_url: String,
    layout: Arc<CompiledLayout>,
}

impl RecordBuilder {
    pub fn new(base_url: &Url, layout: Arc<CompiledLayout>) -> Self {
        Self {
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            layout,
        }
    }

    /// Absolute detail-page URL for a listing slug.
    pub fn product_url(&self, slug: &str) -> String {
        if slug.starts_with('/') {
            format!("{}{}", self.base_url, slug)
        } else {
            format!("{}/{}", self.base_url, slug)
        }
    }

    pub fn build(&self, product: &ProductDescriptor, markup: &str) -> ScraperResult<ExtractedRecord> {
        let document = Html::parse_document(markup);
        self.build_from_document(product, &document)
    }

    pub fn build_from_document(
        &self,
        product: &ProductDescriptor,
        doc: &Html,
    ) -> ScraperResult<ExtractedRecord> {
        let fields = FieldExtractor::new(&self.layout);

        let title = fields.title_text(doc).ok_or_else(|| ScraperError::RecordBuild {
            slug: product.slug.clone(),
            reason: "document has no product title".to_string(),
        })?;

        Ok(ExtractedRecord {
            product_url: self.product_url(&product.slug),
            brand_name: fields.brand_name(doc),
            title,
            pack_size: fields.pack_size(doc),
            image_url: fields.image_url(doc),
            company_name: product
                .manufacturer_name
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            company_logo: NOT_AVAILABLE.to_string(),
            about: fields.about(doc),
            features: fields.features(doc),
            uses_details: fields.uses_details(doc),
            warnings: fields.warnings(doc),
            introduction: fields.introduction(doc),
            direction_of_use: fields.direction_of_use(doc),
            dosage: fields.dosage(doc),
            unit: fields.unit(doc),
            mrp: fields.mrp(doc),
            selling_price: fields.selling_price(doc),
            category: product
                .kind
                .as_deref()
                .map(title_case)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            sub_category_1: title_case(&fields.sub_category_1(doc)),
            sub_category_2: title_case(&fields.sub_category_2(doc)),
            overview: fields.overview(doc),
        })
    }
}
