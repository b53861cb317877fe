//! Validation context shared by every entity validator.
//!
//! Validators are pure functions of entity state plus this context, so the same
//! entity validated against the same context always yields the same error list.

use chrono::{DateTime, Utc};
use kassabok_shared::config::{AppConfig, ValidationConfig};

use crate::account::AccountChart;
use crate::clock::Clock;

/// Thresholds used by the validators.
#[derive(Debug, Clone)]
pub struct ValidationRules {
    /// Minimum length of names and internal names.
    pub name_min_length: usize,
    /// Earliest accepted creation timestamp.
    pub earliest_date_created: DateTime<Utc>,
}

impl ValidationRules {
    /// Builds the rules from configuration, falling back to defaults for
    /// timestamps chrono cannot represent.
    #[must_use]
    pub fn from_config(config: &ValidationConfig) -> Self {
        let defaults = Self::default();
        Self {
            name_min_length: config.name_min_length,
            earliest_date_created: DateTime::from_timestamp_millis(config.earliest_timestamp_ms)
                .unwrap_or(defaults.earliest_date_created),
        }
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            name_min_length: 3,
            earliest_date_created: DateTime::<Utc>::UNIX_EPOCH
                + chrono::Duration::milliseconds(946_684_800_000),
        }
    }
}

/// Everything a validator may depend on besides the entity itself.
#[derive(Debug, Clone)]
pub struct ValidationContext {
    /// The instant treated as "now".
    pub now: DateTime<Utc>,
    /// Thresholds.
    pub rules: ValidationRules,
    /// Chart used for account number checks.
    pub accounts: AccountChart,
}

impl ValidationContext {
    /// Context with default rules and the BAS chart at the given instant.
    #[must_use]
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            rules: ValidationRules::default(),
            accounts: AccountChart::default(),
        }
    }

    /// Context with default rules at the wall clock's current time.
    #[must_use]
    pub fn current() -> Self {
        Self::at(Utc::now())
    }

    /// Context built from configuration at the clock's current time.
    #[must_use]
    pub fn from_config(config: &AppConfig, clock: &dyn Clock) -> Self {
        Self {
            now: clock.now(),
            rules: ValidationRules::from_config(&config.validation),
            accounts: AccountChart::from_config(&config.accounts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::TimeZone;

    #[test]
    fn test_default_floor_is_year_2000() {
        let rules = ValidationRules::default();
        assert_eq!(
            rules.earliest_date_created,
            Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_from_config_uses_clock() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let ctx = ValidationContext::from_config(&AppConfig::default(), &FixedClock(now));
        assert_eq!(ctx.now, now);
        assert_eq!(ctx.rules.name_min_length, 3);
        assert!(ctx.accounts.is_valid(1930));
    }
}
