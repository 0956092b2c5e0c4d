use crate::geo::LatLng;

pub const DEFAULT_API_URL: &str = "http://localhost:8081";
pub const API_URL_ENV: &str = "CALOCHECK_API_URL";

/// Seolleung station, the fallback query center.
pub const DEFAULT_CENTER: LatLng = LatLng::new(37.504, 127.048);
pub const DEFAULT_LEVEL: u8 = 4;

/// Bounds fitting never zooms closer than this level.
pub const MIN_LEVEL: u8 = 3;
/// Bounds fitting and "search here" never zoom further out than this level.
pub const MAX_LEVEL: u8 = 7;

pub const FIT_PADDING_PX: u32 = 30;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocatorConfig {
    pub api: ApiConfig,
    pub view: ViewConfig,
}

impl LocatorConfig {
    pub fn from_env() -> Self {
        Self {
            api: ApiConfig::from_env(),
            view: ViewConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Runtime environment first, then the value baked in at build time.
    /// In the browser only the build-time value can apply.
    pub fn from_env() -> Self {
        let url = std::env::var(API_URL_ENV)
            .ok()
            .or_else(|| option_env!("CALOCHECK_API_URL").map(str::to_string))
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new(&url)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    pub default_center: LatLng,
    pub default_level: u8,
    pub min_level: u8,
    pub max_level: u8,
    pub fit_padding_px: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_center: DEFAULT_CENTER,
            default_level: DEFAULT_LEVEL,
            min_level: MIN_LEVEL,
            max_level: MAX_LEVEL,
            fit_padding_px: FIT_PADDING_PX,
        }
    }
}
