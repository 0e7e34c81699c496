use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub share: ShareConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Where the wrapped summary comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    /// Built-in sample summary, delivered after a simulated delay
    #[default]
    Mock,
    /// JSON file on disk
    File,
    /// Remote summary endpoint returning JSON
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Source kind: "mock", "file" or "http"
    #[serde(default)]
    pub source: DataSourceKind,
    /// Path to the summary JSON (file source)
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Summary endpoint URL (http source)
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Bearer token forwarded to the endpoint
    #[serde(default)]
    pub token: Option<String>,
    /// Simulated latency of the mock source in milliseconds
    #[serde(default = "default_mock_delay")]
    pub mock_delay_ms: u64,
    /// Request timeout in seconds (http source)
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: DataSourceKind::default(),
            path: None,
            endpoint: None,
            token: None,
            mock_delay_ms: default_mock_delay(),
            request_timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds while nothing is animating
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
    /// Smooth scrolling of the presentation
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            theme: ThemeConfig::default(),
            scroll: ScrollConfig::default(),
        }
    }
}

/// Easing curve used for smooth scrolling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EasingType {
    /// Jump at the end of the animation
    None,
    Linear,
    /// 1 - (1-t)^3
    #[default]
    Cubic,
    /// 1 - (1-t)^5
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate scroll position changes
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Scroll animation duration in milliseconds
    #[serde(default = "default_scroll_duration")]
    pub animation_duration_ms: u64,
    /// Easing curve
    #[serde(default)]
    pub easing: EasingType,
    /// Lines moved per scroll step when smooth scrolling is off
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
    /// Frame rate while an animation is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_scroll_duration(),
            easing: EasingType::default(),
            scroll_lines: default_scroll_lines(),
            animation_fps: default_animation_fps(),
        }
    }
}

/// Reveal and count-up animation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Force reduced motion on or off; unset means detect from the environment
    #[serde(default)]
    pub reduced_motion: Option<bool>,
    /// Section entrance animation duration in milliseconds
    #[serde(default = "default_section_duration")]
    pub section_duration_ms: u64,
    /// Extra delay before each section entrance in milliseconds
    #[serde(default)]
    pub section_delay_ms: u64,
    /// Count-up duration in milliseconds
    #[serde(default = "default_counter_duration")]
    pub counter_duration_ms: u64,
    /// Visible fraction of an element that fires its reveal (0.0-1.0)
    #[serde(default = "default_reveal_threshold")]
    pub reveal_threshold: f64,
    /// Rows trimmed from the top and bottom of the viewport before testing visibility
    #[serde(default = "default_root_margin_rows")]
    pub root_margin_rows: u16,
    /// Rows a section slides up while it is revealed
    #[serde(default = "default_reveal_offset_rows")]
    pub reveal_offset_rows: u16,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            reduced_motion: None,
            section_duration_ms: default_section_duration(),
            section_delay_ms: 0,
            counter_duration_ms: default_counter_duration(),
            reveal_threshold: default_reveal_threshold(),
            root_margin_rows: default_root_margin_rows(),
            reveal_offset_rows: default_reveal_offset_rows(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Link appended to every share message
    #[serde(default = "default_share_url")]
    pub url: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            url: default_share_url(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "emerald", "midnight")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Accept either a string or a struct
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string (theme name) or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

/// Optional color overrides for theme customization
/// Each color is a hex string (e.g., "#10b981" or "10b981")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    pub bg: Option<String>,
    pub surface: Option<String>,
    pub fg: Option<String>,
    pub muted: Option<String>,
    pub accent: Option<String>,
    pub accent_strong: Option<String>,
    pub track: Option<String>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-d>" (Ctrl+d), "<S-g>" (Shift+g), "<CR>" (Enter), "<Esc>", "<Tab>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    #[serde(default = "default_key_quit")]
    pub quit: String,
    #[serde(default = "default_key_scroll_down")]
    pub scroll_down: String,
    #[serde(default = "default_key_scroll_up")]
    pub scroll_up: String,
    #[serde(default = "default_key_scroll_half_down")]
    pub scroll_half_down: String,
    #[serde(default = "default_key_scroll_half_up")]
    pub scroll_half_up: String,
    #[serde(default = "default_key_scroll_page_down")]
    pub scroll_page_down: String,
    #[serde(default = "default_key_scroll_page_up")]
    pub scroll_page_up: String,
    /// Jump to the hero section
    #[serde(default = "default_key_jump_to_top")]
    pub jump_to_top: String,
    /// Jump to the end of the presentation
    #[serde(default = "default_key_jump_to_bottom")]
    pub jump_to_bottom: String,
    /// Scroll to the start of the next section
    #[serde(default = "default_key_next_section")]
    pub next_section: String,
    /// Scroll to the start of the previous section
    #[serde(default = "default_key_prev_section")]
    pub prev_section: String,
    /// Skip straight to the share section
    #[serde(default = "default_key_skip_to_share")]
    pub skip_to_share: String,
    /// Open the share menu
    #[serde(default = "default_key_share")]
    pub share: String,
    /// Toggle reduced motion
    #[serde(default = "default_key_toggle_motion")]
    pub toggle_motion: String,
    /// Reload the summary after a failure
    #[serde(default = "default_key_retry")]
    pub retry: String,
    /// Show the help overlay
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            scroll_down: default_key_scroll_down(),
            scroll_up: default_key_scroll_up(),
            scroll_half_down: default_key_scroll_half_down(),
            scroll_half_up: default_key_scroll_half_up(),
            scroll_page_down: default_key_scroll_page_down(),
            scroll_page_up: default_key_scroll_page_up(),
            jump_to_top: default_key_jump_to_top(),
            jump_to_bottom: default_key_jump_to_bottom(),
            next_section: default_key_next_section(),
            prev_section: default_key_prev_section(),
            skip_to_share: default_key_skip_to_share(),
            share: default_key_share(),
            toggle_motion: default_key_toggle_motion(),
            retry: default_key_retry(),
            help: default_key_help(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_scroll_down() -> String { "j".to_string() }
fn default_key_scroll_up() -> String { "k".to_string() }
fn default_key_scroll_half_down() -> String { "<C-d>".to_string() }
fn default_key_scroll_half_up() -> String { "<C-u>".to_string() }
fn default_key_scroll_page_down() -> String { "<Space>".to_string() }
fn default_key_scroll_page_up() -> String { "<C-b>".to_string() }
fn default_key_jump_to_top() -> String { "gg".to_string() }
fn default_key_jump_to_bottom() -> String { "G".to_string() }
fn default_key_next_section() -> String { "n".to_string() }
fn default_key_prev_section() -> String { "p".to_string() }
fn default_key_skip_to_share() -> String { "S".to_string() }
fn default_key_share() -> String { "s".to_string() }
fn default_key_toggle_motion() -> String { "m".to_string() }
fn default_key_retry() -> String { "r".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wrapped")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_mock_delay() -> u64 {
    1500
}

fn default_timeout() -> u64 {
    30
}

fn default_tick_rate() -> u64 {
    100
}

fn default_scroll_duration() -> u64 {
    150
}

fn default_scroll_lines() -> u16 {
    1
}

fn default_animation_fps() -> u32 {
    60
}

fn default_section_duration() -> u64 {
    800
}

fn default_counter_duration() -> u64 {
    2000
}

fn default_reveal_threshold() -> f64 {
    0.1
}

fn default_root_margin_rows() -> u16 {
    2
}

fn default_reveal_offset_rows() -> u16 {
    2
}

fn default_share_url() -> String {
    "https://wrapped.opay.com".to_string()
}

fn default_theme_name() -> String {
    "emerald".to_string()
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default location or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path; a missing file yields defaults
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/wrapped/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("wrapped")
            .join("config.toml")
    }

    /// Get the log file path used while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("wrapped.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Get the summary file path (with tilde expansion)
    pub fn data_path(&self) -> Option<PathBuf> {
        self.data.path.as_deref().map(expand_tilde)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.data.source, DataSourceKind::Mock);
        assert_eq!(config.data.mock_delay_ms, 1500);
        assert_eq!(config.motion.counter_duration_ms, 2000);
        assert_eq!(config.motion.section_duration_ms, 800);
        assert!((config.motion.reveal_threshold - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.motion.reduced_motion, None);
        assert_eq!(config.share.url, "https://wrapped.opay.com");
        assert_eq!(config.keymap.jump_to_top, "gg");
        assert_eq!(config.ui.scroll.easing, EasingType::Cubic);
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_toml(
            r#"
            [data]
            source = "http"
            endpoint = "https://example.com/api/wrapped-data"

            [motion]
            reduced_motion = true
            counter_duration_ms = 500
            "#,
        )
        .unwrap();
        assert_eq!(config.data.source, DataSourceKind::Http);
        assert_eq!(config.data.endpoint.as_deref(), Some("https://example.com/api/wrapped-data"));
        assert_eq!(config.data.request_timeout_secs, 30);
        assert_eq!(config.motion.reduced_motion, Some(true));
        assert_eq!(config.motion.counter_duration_ms, 500);
        assert_eq!(config.motion.root_margin_rows, 2);
    }

    #[test]
    fn test_theme_as_string_or_table() {
        let config = AppConfig::from_toml("[ui]\ntheme = \"midnight\"").unwrap();
        assert_eq!(config.ui.theme.name, "midnight");

        let config = AppConfig::from_toml(
            "[ui.theme]\nname = \"emerald\"\n[ui.theme.colors]\naccent = \"#ff0000\"",
        )
        .unwrap();
        assert_eq!(config.ui.theme.name, "emerald");
        assert_eq!(config.ui.theme.colors.accent.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[data]\nsource = 42").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.ui.tick_rate_ms, 100);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[share]\nurl = \"https://example.org/w\"\n").unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.share.url, "https://example.org/w");
    }
}
