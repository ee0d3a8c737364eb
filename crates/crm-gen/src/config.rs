//! Configuration types for dataset generation.

use std::path::Path;

use serde::{Deserialize, Serialize};
use time::{Date, Duration, macros::date};

use crate::error::ConfigError;

/// Days before `as_of` that count as the active window.
const ACTIVE_WINDOW_DAYS: i64 = 184;

/// Calendar window the dataset covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// Earliest deal creation date.
    pub start: Date,
    /// Synthetic "today". No record is dated after it.
    pub as_of: Date,
    /// Open deals are created on or after this date; older deals must have closed.
    pub active_since: Date,
}

impl Default for DateWindow {
    fn default() -> Self {
        Self {
            start: date!(2023 - 01 - 01),
            as_of: date!(2026 - 02 - 01),
            active_since: date!(2025 - 08 - 01),
        }
    }
}

impl DateWindow {
    /// Creates a window ending at `as_of`, with the active window covering
    /// its last six months.
    pub fn new(start: Date, as_of: Date) -> Result<Self, ConfigError> {
        if start >= as_of {
            return Err(ConfigError::EmptyWindow { start, as_of });
        }
        let active_since = (as_of - Duration::days(ACTIVE_WINDOW_DAYS)).max(start);
        Ok(Self {
            start,
            as_of,
            active_since,
        })
    }

    /// A window covering `years` of history up to `as_of`.
    pub fn trailing_years(as_of: Date, years: u8) -> Result<Self, ConfigError> {
        if !(1..=10).contains(&years) {
            return Err(ConfigError::HistoryYears(years));
        }
        let year = as_of.year() - i32::from(years);
        // Feb 29 has no counterpart in most years
        let start = as_of
            .replace_year(year)
            .unwrap_or_else(|_| as_of - Duration::days(365 * i64::from(years)));
        Self::new(start, as_of)
    }

    /// Number of days between `start` and `as_of`.
    pub fn span_days(&self) -> i64 {
        (self.as_of - self.start).whole_days()
    }

    /// Midpoint of the window.
    pub fn midpoint(&self) -> Date {
        self.start + Duration::days(self.span_days() / 2)
    }

    pub fn contains(&self, date: Date) -> bool {
        (self.start..=self.as_of).contains(&date)
    }

    /// Checks a window built field by field, e.g. read from a config file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start >= self.as_of {
            return Err(ConfigError::EmptyWindow {
                start: self.start,
                as_of: self.as_of,
            });
        }
        if !self.contains(self.active_since) {
            return Err(ConfigError::ActiveSince {
                active_since: self.active_since,
                start: self.start,
                as_of: self.as_of,
            });
        }
        Ok(())
    }
}

/// Configuration for a generation run.
///
/// Every field has a default, so a config file only needs the fields it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Profile slug or display name.
    pub profile: String,

    /// Number of accounts to generate.
    pub account_count: usize,

    /// Seed for the random source threaded through all stages.
    pub seed: u64,

    /// Calendar window of the dataset.
    pub window: DateWindow,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            profile: "b2b-saas".to_string(),
            account_count: 100,
            seed: 42,
            window: DateWindow::default(),
        }
    }
}

impl GenerationConfig {
    /// Loads a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.window.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window() {
        let window = DateWindow::default();
        assert_eq!(window.start, date!(2023 - 01 - 01));
        assert_eq!(window.as_of, date!(2026 - 02 - 01));
        assert_eq!(
            DateWindow::new(window.start, window.as_of).unwrap(),
            window
        );
    }

    #[test]
    fn test_trailing_years() {
        let window = DateWindow::trailing_years(date!(2026 - 02 - 01), 2).unwrap();
        assert_eq!(window.start, date!(2024 - 02 - 01));
        assert_eq!(window.active_since, date!(2025 - 08 - 01));

        let leap = DateWindow::trailing_years(date!(2024 - 02 - 29), 1).unwrap();
        assert!(leap.start < leap.as_of);

        assert!(DateWindow::trailing_years(date!(2026 - 02 - 01), 0).is_err());
    }

    #[test]
    fn test_short_window_clamps_active_since() {
        let window = DateWindow::new(date!(2025 - 12 - 01), date!(2026 - 02 - 01)).unwrap();
        assert_eq!(window.active_since, window.start);
    }

    #[test]
    fn test_empty_window_rejected() {
        let result = DateWindow::new(date!(2026 - 02 - 01), date!(2026 - 02 - 01));
        assert!(matches!(result, Err(ConfigError::EmptyWindow { .. })));
    }

    #[test]
    fn test_active_since_outside_window_rejected() {
        let mut window = DateWindow::default();
        window.active_since = date!(2027 - 01 - 01);
        assert!(matches!(
            window.validate(),
            Err(ConfigError::ActiveSince { .. })
        ));

        window.active_since = date!(2022 - 12 - 31);
        assert!(window.validate().is_err());

        window.active_since = window.as_of;
        assert!(window.validate().is_ok());
    }

    #[test]
    fn test_config_file_with_late_active_since_fails_to_load() {
        let path = std::env::temp_dir().join(format!("crm-gen-config-{}.json", std::process::id()));
        let raw = r#"{
            "account_count": 5,
            "window": {"start": "2023-01-01", "as_of": "2026-02-01", "active_since": "2027-01-01"}
        }"#;
        std::fs::write(&path, raw).unwrap();
        let result = GenerationConfig::from_json_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::ActiveSince { .. })));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: GenerationConfig =
            serde_json::from_str(r#"{"profile": "manufacturer", "account_count": 10}"#).unwrap();
        assert_eq!(config.profile, "manufacturer");
        assert_eq!(config.account_count, 10);
        assert_eq!(config.seed, 42);
        assert_eq!(config.window, DateWindow::default());
    }
}
