use crate::booking::{clean_raw_url, is_cal_com_url, normalize_booking_url, BookingDuration};
use crate::error::{LevError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE: &str = "lev.yaml";

pub const ENV_CALCOM_30MIN_URL: &str = "LEV_CALCOM_30MIN_URL";
pub const ENV_CALCOM_15MIN_URL: &str = "LEV_CALCOM_15MIN_URL";
pub const ENV_FOUNDER_LINKEDIN_URL: &str = "LEV_FOUNDER_LINKEDIN_URL";

// ---------------------------------------------------------------------------
// SiteConfig
// ---------------------------------------------------------------------------

/// Public site settings. Nothing in here is secret; storage credentials are
/// held by the server's storage configuration instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_product_name")]
    pub product_name: String,
    #[serde(default = "default_founder_name")]
    pub founder_name: String,
    #[serde(default = "default_founder_role")]
    pub founder_role: String,
    #[serde(default = "default_founder_linkedin_url")]
    pub founder_linkedin_url: String,
    #[serde(default = "default_calcom_30min_url")]
    pub calcom_30min_url: String,
    #[serde(default)]
    pub calcom_15min_url: String,
}

fn default_product_name() -> String {
    "trai\\".to_string()
}

fn default_founder_name() -> String {
    "Prasoon Pathak".to_string()
}

fn default_founder_role() -> String {
    "Founder, trai\\".to_string()
}

fn default_founder_linkedin_url() -> String {
    "https://www.linkedin.com/in/prasoonpathak".to_string()
}

fn default_calcom_30min_url() -> String {
    "https://cal.com/lev.call".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            product_name: default_product_name(),
            founder_name: default_founder_name(),
            founder_role: default_founder_role(),
            founder_linkedin_url: default_founder_linkedin_url(),
            calcom_30min_url: default_calcom_30min_url(),
            calcom_15min_url: String::new(),
        }
    }
}

impl SiteConfig {
    /// Load from a YAML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LevError::ConfigNotFound(path.display().to_string()));
        }
        let data = std::fs::read_to_string(path)?;
        let cfg: SiteConfig = serde_yaml::from_str(&data)?;
        Ok(cfg.cleaned())
    }

    /// Load `lev.yaml` from `root` if present, otherwise defaults, then apply
    /// process environment overrides.
    pub fn resolve(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        let base = if path.exists() {
            Self::load(&path)?
        } else {
            Self::default()
        };
        Ok(base.with_env(|key| std::env::var(key).ok()))
    }

    /// Apply overrides from an environment lookup.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup(ENV_CALCOM_30MIN_URL) {
            self.calcom_30min_url = v;
        }
        if let Some(v) = lookup(ENV_CALCOM_15MIN_URL) {
            self.calcom_15min_url = v;
        }
        if let Some(v) = lookup(ENV_FOUNDER_LINKEDIN_URL) {
            self.founder_linkedin_url = v;
        }
        self.cleaned()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, data)?;
        Ok(())
    }

    fn cleaned(mut self) -> Self {
        self.calcom_30min_url = clean_raw_url(&self.calcom_30min_url);
        self.calcom_15min_url = clean_raw_url(&self.calcom_15min_url);
        self
    }

    /// Redirect target for the requested meeting length.
    ///
    /// The 15-minute link is only honored when it is a cal.com URL; anything
    /// else falls back to the 30-minute link.
    pub fn booking_url(&self, duration: BookingDuration) -> String {
        if duration == BookingDuration::FifteenMinutes && is_cal_com_url(&self.calcom_15min_url) {
            return normalize_booking_url(&self.calcom_15min_url);
        }
        normalize_booking_url(&self.calcom_30min_url)
    }

    pub fn public(&self) -> PublicSiteConfig {
        PublicSiteConfig {
            product_name: self.product_name.clone(),
            founder_name: self.founder_name.clone(),
            founder_role: self.founder_role.clone(),
            founder_linkedin_url: self.founder_linkedin_url.clone(),
            booking: vec![
                BookingLink::new(BookingDuration::ThirtyMinutes, &self.calcom_30min_url),
                BookingLink::new(BookingDuration::FifteenMinutes, &self.calcom_15min_url),
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// PublicSiteConfig
// ---------------------------------------------------------------------------

/// Browser-safe view of the site configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicSiteConfig {
    pub product_name: String,
    pub founder_name: String,
    pub founder_role: String,
    pub founder_linkedin_url: String,
    pub booking: Vec<BookingLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingLink {
    pub duration: BookingDuration,
    pub url: String,
    pub cal_com: bool,
}

impl BookingLink {
    fn new(duration: BookingDuration, raw: &str) -> Self {
        Self {
            duration,
            url: normalize_booking_url(raw),
            cal_com: is_cal_com_url(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_thirty_minute_link() {
        let cfg = SiteConfig::default();
        assert_eq!(
            cfg.booking_url(BookingDuration::ThirtyMinutes),
            "https://cal.com/lev.call"
        );
        assert_eq!(cfg.calcom_15min_url, "");
    }

    #[test]
    fn env_overrides_are_cleaned() {
        let cfg = SiteConfig::default().with_env(env(&[
            (ENV_CALCOM_30MIN_URL, " https://cal.com/lev/30min. "),
            (ENV_CALCOM_15MIN_URL, "https://cal.com/lev/15min!"),
        ]));
        assert_eq!(cfg.calcom_30min_url, "https://cal.com/lev/30min");
        assert_eq!(cfg.calcom_15min_url, "https://cal.com/lev/15min");
    }

    #[test]
    fn fifteen_minutes_requires_cal_com_link() {
        let cfg = SiteConfig::default()
            .with_env(env(&[(ENV_CALCOM_15MIN_URL, "https://calendly.com/lev")]));
        assert_eq!(
            cfg.booking_url(BookingDuration::FifteenMinutes),
            "https://cal.com/lev.call"
        );

        let cfg = SiteConfig::default()
            .with_env(env(&[(ENV_CALCOM_15MIN_URL, "https://cal.com/lev/15min")]));
        assert_eq!(
            cfg.booking_url(BookingDuration::FifteenMinutes),
            "https://cal.com/lev/15min"
        );
    }

    #[test]
    fn load_fills_missing_keys_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "product_name: Lev\ncalcom_30min_url: https://cal.com/x;\n").unwrap();

        let cfg = SiteConfig::load(&path).unwrap();
        assert_eq!(cfg.product_name, "Lev");
        assert_eq!(cfg.calcom_30min_url, "https://cal.com/x");
        assert_eq!(cfg.founder_name, "Prasoon Pathak");
    }

    #[test]
    fn load_missing_file_errors() {
        let dir = TempDir::new().unwrap();
        let err = SiteConfig::load(&dir.path().join(CONFIG_FILE)).unwrap_err();
        assert!(matches!(err, LevError::ConfigNotFound(_)));
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let mut cfg = SiteConfig::default();
        cfg.product_name = "Lev".into();
        cfg.save(&path).unwrap();
        assert_eq!(SiteConfig::load(&path).unwrap(), cfg);
    }

    #[test]
    fn public_view_flags_cal_com_links() {
        let public = SiteConfig::default().public();
        assert_eq!(public.booking.len(), 2);
        assert!(public.booking[0].cal_com);
        assert_eq!(public.booking[0].url, "https://cal.com/lev.call");
        assert!(!public.booking[1].cal_com);
        assert_eq!(public.booking[1].url, "");
    }
}
