use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// JSON file holding the deduplicated deal collection.
    pub store_path: PathBuf,
    /// Listing page scraped when no URL is given on the command line.
    pub listing_url: String,
    pub request_timeout_secs: u64,
}
