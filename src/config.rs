// src/config.rs
//! Flat settings record: API access, template, profile and selector overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::selectors::SelectorConfig;
use crate::core::template_engine::DEFAULT_TEMPLATE;
use crate::listing::FreshnessWindows;
use crate::types::FreelancerProfile;

pub const DEFAULT_SETTINGS_PATH: &str = "settings.toml";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_key: String,
    pub api_base_url: String,
    pub model: String,
    pub template: String,
    pub highlight_1h: bool,
    pub highlight_2h: bool,
    pub highlight_4h: bool,
    pub request_timeout_secs: u64,
    pub profile: FreelancerProfile,
    pub selectors: SelectorConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            template: DEFAULT_TEMPLATE.to_string(),
            highlight_1h: true,
            highlight_2h: true,
            highlight_4h: true,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            profile: FreelancerProfile::default(),
            selectors: SelectorConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path` (or `settings.toml`), then apply environment
    /// overrides. A missing file means defaults; an unreadable one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));

        let mut settings = if path.exists() {
            info!("Loading settings from: {}", path.display());
            Self::from_file(&path)?
        } else {
            warn!("Settings file not found: {}, using defaults", path.display());
            Self::default()
        };

        settings.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse settings: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let mut settings: Settings = toml::from_str(content)?;
        if settings.model.trim().is_empty() {
            settings.model = DEFAULT_MODEL.to_string();
        }
        if settings.template.trim().is_empty() {
            settings.template = DEFAULT_TEMPLATE.to_string();
        }
        Ok(settings)
    }

    /// Environment wins over the file for API access settings
    fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("OPENAI_API_KEY").filter(|v| !v.trim().is_empty()) {
            self.api_key = key.trim().to_string();
        }
        if let Some(model) = lookup("OPENAI_MODEL").filter(|v| !v.trim().is_empty()) {
            self.model = model.trim().to_string();
        }
        if let Some(url) = lookup("OPENAI_API_BASE_URL").filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url.trim().trim_end_matches('/').to_string();
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn freshness_windows(&self) -> FreshnessWindows {
        FreshnessWindows {
            one_hour: self.highlight_1h,
            two_hours: self.highlight_2h,
            four_hours: self.highlight_4h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.model, "gpt-4o-mini");
        assert_eq!(settings.template, DEFAULT_TEMPLATE);
        assert!(!settings.has_api_key());
        assert_eq!(settings.freshness_windows(), FreshnessWindows::default());
    }

    #[test]
    fn test_from_toml_partial_file() {
        let settings = Settings::from_toml(
            r#"
api_key = "sk-test"
model = ""
highlight_2h = false

[profile]
name = "Ann"
workExperience = "Built a search engine"

[selectors.extractor]
title = ["h1.title"]
"#,
        )
        .unwrap();

        assert_eq!(settings.api_key, "sk-test");
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert!(!settings.freshness_windows().two_hours);
        assert_eq!(settings.profile.name, "Ann");
        assert_eq!(settings.profile.work_experience, "Built a search engine");
        assert_eq!(settings.selectors.extractor.title, vec!["h1.title"]);
        assert_eq!(settings.template, DEFAULT_TEMPLATE);
    }

    #[test]
    fn test_blank_template_loads_default() {
        let settings = Settings::from_toml("api_key = \"sk\"\ntemplate = \"\"").unwrap();
        assert_eq!(settings.template, DEFAULT_TEMPLATE);

        let settings = Settings::from_toml("template = \"  \\n \"").unwrap();
        assert_eq!(settings.template, DEFAULT_TEMPLATE);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("OPENAI_API_KEY", " sk-env "),
            ("OPENAI_MODEL", "gpt-4o"),
            ("OPENAI_API_BASE_URL", "http://localhost:8080/v1/"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(settings.api_key, "sk-env");
        assert_eq!(settings.model, "gpt-4o");
        assert_eq!(settings.api_base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let mut settings = Settings::from_toml("api_key = \"sk-file\"").unwrap();
        settings.apply_env_overrides(|_| Some("   ".to_string()));
        assert_eq!(settings.api_key, "sk-file");
    }

    #[test]
    fn test_from_file_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key = [not toml").unwrap();
        let err = Settings::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse settings"));
    }

    #[test]
    fn test_from_file_reads_template() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "template = \"Hi {{{{clientName}}}}\"").unwrap();
        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.template, "Hi {{clientName}}");
    }
}
