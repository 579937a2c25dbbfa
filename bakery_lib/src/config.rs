//! Runtime settings read from the environment.

use bakery_api::DEFAULT_API_URL;

/// Products per page on the listing.
pub const DEFAULT_PAGE_SIZE: i64 = 12;
/// Products shown on the home page.
pub const DEFAULT_FEATURED_LIMIT: i64 = 6;
/// Products loaded by the admin list.
pub const DEFAULT_ADMIN_LIMIT: i64 = 100;
/// Public storefront URL used for the sitemap.
pub const DEFAULT_SITE_URL: &str = "https://frontend-vqvl.onrender.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// API base URL. Endpoints are appended verbatim.
    pub api_url: String,
    pub page_size: i64,
    pub featured_limit: i64,
    pub admin_limit: i64,
    pub site_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            featured_limit: DEFAULT_FEATURED_LIMIT,
            admin_limit: DEFAULT_ADMIN_LIMIT,
            site_url: DEFAULT_SITE_URL.to_string(),
        }
    }
}

impl Settings {
    /// Reads `BAKERY_API_URL`, `BAKERY_PAGE_SIZE`, `BAKERY_FEATURED_LIMIT`,
    /// `BAKERY_ADMIN_LIMIT` and `BAKERY_SITE_URL`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Settings::from_env`] but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        Self {
            api_url: env_string(&lookup, "BAKERY_API_URL", defaults.api_url),
            page_size: env_positive(&lookup, "BAKERY_PAGE_SIZE", defaults.page_size),
            featured_limit: env_positive(&lookup, "BAKERY_FEATURED_LIMIT", defaults.featured_limit),
            admin_limit: env_positive(&lookup, "BAKERY_ADMIN_LIMIT", defaults.admin_limit),
            site_url: env_string(&lookup, "BAKERY_SITE_URL", defaults.site_url),
        }
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.to_string();
        self
    }
}

fn env_string<F>(lookup: &F, key: &str, default: String) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
        .unwrap_or(default)
}

fn env_positive<F>(lookup: &F, key: &str, default: i64) -> i64
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(val) if val > 0 => val,
            _ => {
                tracing::warn!("Invalid {} value '{}', using default {}", key, raw, default);
                default
            }
        },
    }
}
