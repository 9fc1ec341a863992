pub mod client;
pub(crate) mod request;
pub(crate) mod response;

pub use client::{HttpListingClient, ListingSource};
pub use request::ListingRequest;
pub use response::{ListingData, ListingMeta, ListingResponse, ProductDescriptor};
