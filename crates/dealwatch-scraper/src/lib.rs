pub mod client;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod types;

pub use client::DealsClient;
pub use error::ScraperError;
pub use extract::{extract_deals, extract_deals_with_base, extract_page, Extraction};
pub use normalize::normalize_thread;
pub use types::{RawThread, ThreadBlob};
