//! Theme configuration
//!
//! Settings, UI strings, backend routes and timing windows live in one
//! `ThemeConfig` value that is loaded once and handed to every component
//! at construction. Nothing reads configuration from ambient state.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading, saving or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file could not be written
    #[error("Failed to write config file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is outside its valid range
    #[error("Invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },

    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Complete theme configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub settings: Settings,
    pub strings: Strings,
    pub routes: Routes,
    pub timing: Timing,
    pub header: HeaderSettings,
    pub search: SearchSettings,
    pub http: HttpSettings,
}

/// How the cart is presented after adding an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartType {
    /// Slide-out drawer, opened after a successful add
    Drawer,
    /// Dedicated cart page; the drawer is never opened automatically
    Page,
}

/// Store-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Money format with a `{{ placeholder }}` (e.g. `${{amount}}`)
    pub money_format: String,
    pub cart_type: CartType,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            money_format: "${{amount}}".to_string(),
            cart_type: CartType::Drawer,
        }
    }
}

/// User-visible strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Strings {
    pub add_to_cart: String,
    pub adding: String,
    pub item_added: String,
    pub error_adding: String,
    pub error_updating: String,
    pub error_removing: String,
}

impl Default for Strings {
    fn default() -> Self {
        Self {
            add_to_cart: "Add to cart".to_string(),
            adding: "Adding...".to_string(),
            item_added: "Item added to cart".to_string(),
            error_adding: "Error adding item to cart".to_string(),
            error_updating: "Error updating cart".to_string(),
            error_removing: "Error removing item".to_string(),
        }
    }
}

/// Backend routes, relative to `http.base_url`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Routes {
    pub cart_add_url: String,
    pub cart_change_url: String,
    pub cart_url: String,
    pub cart_drawer_url: String,
    pub predictive_search_url: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            cart_add_url: "/cart/add.js".to_string(),
            cart_change_url: "/cart/change.js".to_string(),
            cart_url: "/cart.js".to_string(),
            cart_drawer_url: "/cart?view=drawer".to_string(),
            predictive_search_url: "/search/suggest.json".to_string(),
        }
    }
}

/// Debounce windows and UI delays, in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub scroll_debounce_ms: u64,
    pub search_debounce_ms: u64,
    pub toast_visible_ms: u64,
    pub toast_fade_ms: u64,
    pub overlay_hide_delay_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            scroll_debounce_ms: 100,
            search_debounce_ms: 300,
            toast_visible_ms: 3000,
            toast_fade_ms: 300,
            overlay_hide_delay_ms: 100,
        }
    }
}

impl Timing {
    pub fn scroll_debounce(&self) -> Duration {
        Duration::from_millis(self.scroll_debounce_ms)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn toast_visible(&self) -> Duration {
        Duration::from_millis(self.toast_visible_ms)
    }

    pub fn toast_fade(&self) -> Duration {
        Duration::from_millis(self.toast_fade_ms)
    }

    pub fn overlay_hide_delay(&self) -> Duration {
        Duration::from_millis(self.overlay_hide_delay_ms)
    }
}

/// Sticky header scroll thresholds, in pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderSettings {
    /// Offset past which the header gets `is-scrolled`
    pub scrolled_offset: u32,
    /// Offset past which scrolling down hides the header
    pub hide_offset: u32,
}

impl Default for HeaderSettings {
    fn default() -> Self {
        Self {
            scrolled_offset: 100,
            hide_offset: 200,
        }
    }
}

/// Predictive search parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Queries shorter than this clear the results instead of searching
    pub min_query_chars: usize,
    pub result_limit: u32,
    pub resource_type: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            min_query_chars: 2,
            result_limit: 6,
            resource_type: "product".to_string(),
        }
    }
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:9292".to_string(),
            timeout_secs: 30,
        }
    }
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ThemeConfig {
    /// Check every value against its valid range
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("timing.scroll_debounce_ms", self.timing.scroll_debounce_ms, 0, 10_000)?;
        check_range("timing.search_debounce_ms", self.timing.search_debounce_ms, 0, 10_000)?;
        check_range("timing.toast_visible_ms", self.timing.toast_visible_ms, 100, 60_000)?;
        check_range("timing.toast_fade_ms", self.timing.toast_fade_ms, 0, 10_000)?;
        check_range("timing.overlay_hide_delay_ms", self.timing.overlay_hide_delay_ms, 0, 10_000)?;
        check_range("search.min_query_chars", self.search.min_query_chars as u64, 1, 32)?;
        check_range("search.result_limit", self.search.result_limit as u64, 1, 10)?;
        check_range("http.timeout_secs", self.http.timeout_secs, 1, 300)?;

        if self.header.hide_offset < self.header.scrolled_offset {
            return Err(ConfigError::Invalid {
                key: "header.hide_offset",
                message: format!(
                    "must be at least header.scrolled_offset ({})",
                    self.header.scrolled_offset
                ),
            });
        }

        if !crate::money::has_placeholder(&self.settings.money_format) {
            return Err(ConfigError::Invalid {
                key: "settings.money_format",
                message: "must contain a {{ placeholder }}".to_string(),
            });
        }

        if self.http.base_url.is_empty() {
            return Err(ConfigError::Invalid {
                key: "http.base_url",
                message: "must not be empty".to_string(),
            });
        }

        let routes = [
            ("routes.cart_add_url", &self.routes.cart_add_url),
            ("routes.cart_change_url", &self.routes.cart_change_url),
            ("routes.cart_url", &self.routes.cart_url),
            ("routes.cart_drawer_url", &self.routes.cart_drawer_url),
            ("routes.predictive_search_url", &self.routes.predictive_search_url),
        ];
        for (key, route) in routes {
            if route.is_empty() {
                return Err(ConfigError::Invalid {
                    key,
                    message: "must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: ThemeConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn check_range(key: &'static str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::Invalid {
            key,
            message: format!("{} is outside {}-{}", value, min, max),
        });
    }
    Ok(())
}

/// Default config file location (`<config dir>/almliebe/config.toml`)
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(dir.join("almliebe").join("config.toml"))
}

/// Load configuration from the default location
pub fn load() -> Result<ThemeConfig, ConfigError> {
    load_from(&config_file_path()?)
}

/// Load configuration from `path`, falling back to defaults when missing
pub fn load_from(path: &Path) -> Result<ThemeConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(ThemeConfig::default());
    }

    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    ThemeConfig::from_toml(&text)
}

/// Validate and write configuration to `path`
///
/// Writes to a sibling temp file first and renames it over the target.
pub fn save_to(config: &ThemeConfig, path: &Path) -> Result<(), ConfigError> {
    config.validate()?;
    let text = config.to_toml()?;

    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, text).map_err(write_err)?;
    std::fs::rename(&tmp, path).map_err(write_err)?;
    Ok(())
}

/// Create the default config file if it does not exist yet
pub fn init_if_missing(path: &Path) -> Result<bool, ConfigError> {
    if path.exists() {
        return Ok(false);
    }
    save_to(&ThemeConfig::default(), path)?;
    Ok(true)
}

/// Annotated example configuration
pub fn example_config() -> &'static str {
    r##"# Almliebe storefront configuration

[settings]
money_format = "${{amount}}"
cart_type = "drawer"          # "drawer" or "page"

[strings]
add_to_cart = "Add to cart"
adding = "Adding..."
item_added = "Item added to cart"

[routes]
cart_add_url = "/cart/add.js"
cart_change_url = "/cart/change.js"
cart_url = "/cart.js"
cart_drawer_url = "/cart?view=drawer"
predictive_search_url = "/search/suggest.json"

[timing]
scroll_debounce_ms = 100      # 0-10000
search_debounce_ms = 300      # 0-10000
toast_visible_ms = 3000
toast_fade_ms = 300
overlay_hide_delay_ms = 100

[header]
scrolled_offset = 100
hide_offset = 200

[search]
min_query_chars = 2           # 1-32
result_limit = 6              # 1-10
resource_type = "product"

[http]
base_url = "http://127.0.0.1:9292"
timeout_secs = 30             # 1-300
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = ThemeConfig::default();
        config.validate().unwrap();
        assert_eq!(config.timing.scroll_debounce(), Duration::from_millis(100));
        assert_eq!(config.timing.search_debounce(), Duration::from_millis(300));
        assert_eq!(config.settings.cart_type, CartType::Drawer);
    }

    #[test]
    fn test_example_config_parses() {
        let config = ThemeConfig::from_toml(example_config()).unwrap();
        assert_eq!(config.routes, Routes::default());
        assert_eq!(config.timing, Timing::default());
        assert_eq!(config.search.result_limit, 6);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = ThemeConfig::from_toml(
            r#"
            [settings]
            cart_type = "page"

            [timing]
            search_debounce_ms = 150
            "#,
        )
        .unwrap();

        assert_eq!(config.settings.cart_type, CartType::Page);
        assert_eq!(config.settings.money_format, "${{amount}}");
        assert_eq!(config.timing.search_debounce_ms, 150);
        assert_eq!(config.timing.scroll_debounce_ms, 100);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let mut config = ThemeConfig::default();
        config.search.result_limit = 50;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { key: "search.result_limit", .. })
        ));

        for format in ["$ amount", "}} {{", "{{ a-b }}"] {
            let mut config = ThemeConfig::default();
            config.settings.money_format = format.to_string();
            assert!(
                matches!(
                    config.validate(),
                    Err(ConfigError::Invalid { key: "settings.money_format", .. })
                ),
                "accepted money format {:?}",
                format
            );
        }

        let mut config = ThemeConfig::default();
        config.routes.cart_url.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { key: "routes.cart_url", .. })
        ));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/config.toml");

        let mut config = ThemeConfig::default();
        config.http.base_url = "https://shop.example".to_string();
        save_to(&config, &path).unwrap();

        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = load_from(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, ThemeConfig::default());
    }

    #[test]
    fn test_init_if_missing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        assert!(init_if_missing(&path).unwrap());
        assert!(!init_if_missing(&path).unwrap());
        assert_eq!(load_from(&path).unwrap(), ThemeConfig::default());
    }
}
