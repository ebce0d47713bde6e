//! Frontend configuration

use herald_core::{DEFAULT_PROTECTED_PATH, LOGIN_PATH};

/// Console configuration, fixed at build time
pub struct AppConfig;

impl AppConfig {
    /// Art records fetched per page unless overridden at build time
    pub const DEFAULT_ART_RECORDS_PER_PAGE: u32 = 9;

    pub const LOGIN_PATH: &'static str = LOGIN_PATH;

    /// Where the login page sends an operator who already holds a valid session
    pub const LANDING_PATH: &'static str = DEFAULT_PROTECTED_PATH;

    /// Base URL of the community API.
    ///
    /// Taken from `HERALD_API_URL` when the bundle was built with it, otherwise
    /// the origin the console is served from.
    pub fn api_base_url() -> String {
        if let Some(url) = option_env!("HERALD_API_URL").filter(|url| !url.is_empty()) {
            return url.to_string();
        }

        // Try to get from window location
        if let Some(window) = web_sys::window() {
            if let Ok(origin) = window.location().origin() {
                return origin;
            }
        }

        // Default to relative URLs
        String::new()
    }

    pub fn art_records_per_page() -> u32 {
        option_env!("HERALD_ART_RECORDS_PER_PAGE")
            .and_then(|value| value.parse().ok())
            .filter(|per_page| *per_page > 0)
            .unwrap_or(Self::DEFAULT_ART_RECORDS_PER_PAGE)
    }
}
