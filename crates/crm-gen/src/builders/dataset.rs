//! Fluent builder running the four generation stages.

use std::time::Instant;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crm_records::{Account, AccountId, Activity, Contact, Deal};

use crate::config::{DateWindow, GenerationConfig};
use crate::error::GenerationError;
use crate::generators::{
    AccountGenerator, ActivityGenerator, ContactGenerator, ContactIndex, DealGenerator,
};
use crate::integrity;
use crate::profiles::{Profile, ProfileRegistry};

/// A complete generated dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Profile the dataset was generated from.
    pub profile: Profile,
    pub seed: u64,
    pub window: DateWindow,
    pub accounts: Vec<Account>,
    pub contacts: Vec<Contact>,
    pub deals: Vec<Deal>,
    pub activities: Vec<Activity>,
    /// Accounts deliberately left without activities.
    pub silent_accounts: Vec<AccountId>,
    /// Metrics from generation (populated if metrics tracking enabled).
    pub metrics: Option<DatasetMetrics>,
}

/// Timing and volume of a generation run.
#[derive(Debug, Clone)]
pub struct DatasetMetrics {
    /// Time spent generating records (milliseconds).
    pub generation_time_ms: u64,
    /// Time spent in the integrity check (milliseconds).
    pub verification_time_ms: u64,
    pub account_count: usize,
    pub contact_count: usize,
    pub deal_count: usize,
    pub activity_count: usize,
}

/// Where the builder gets its profile from.
#[derive(Debug, Clone)]
enum ProfileSource {
    /// Looked up in the built-in registry by slug or name.
    Named(String),
    Custom(Box<Profile>),
}

/// Builder for complete datasets.
///
/// # Example
///
/// ```rust,ignore
/// let dataset = DatasetBuilder::new()
///     .with_profile("manufacturer")
///     .with_accounts(250)
///     .with_seed(7)
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct DatasetBuilder {
    profile: ProfileSource,
    account_count: usize,
    seed: u64,
    window: DateWindow,
    track_metrics: bool,
}

impl Default for DatasetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Self::from_config(&GenerationConfig::default())
    }

    pub fn from_config(config: &GenerationConfig) -> Self {
        Self {
            profile: ProfileSource::Named(config.profile.clone()),
            account_count: config.account_count,
            seed: config.seed,
            window: config.window,
            track_metrics: false,
        }
    }

    /// Selects a built-in profile by slug or display name.
    pub fn with_profile(mut self, key: impl Into<String>) -> Self {
        self.profile = ProfileSource::Named(key.into());
        self
    }

    /// Uses a profile that is not in the built-in registry.
    pub fn with_custom_profile(mut self, profile: Profile) -> Self {
        self.profile = ProfileSource::Custom(Box::new(profile));
        self
    }

    pub fn with_accounts(mut self, count: usize) -> Self {
        self.account_count = count;
        self
    }

    /// Sets the seed used by [`build`](Self::build).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_window(mut self, window: DateWindow) -> Self {
        self.window = window;
        self
    }

    /// Enables metrics tracking for performance analysis.
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.track_metrics = enabled;
        self
    }

    /// Resolves and validates the configured profile.
    pub fn resolve_profile(&self) -> Result<Profile, GenerationError> {
        let profile = match &self.profile {
            ProfileSource::Named(key) => ProfileRegistry::builtin().get(key)?.clone(),
            ProfileSource::Custom(profile) => profile.as_ref().clone(),
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Generates the dataset from a random source seeded with the builder's seed.
    pub fn build(&self) -> Result<Dataset, GenerationError> {
        tracing::info!(seed = self.seed, "Seeding random source");
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.build_data(&mut rng)
    }

    /// Generates the dataset from a caller-supplied random source.
    ///
    /// The builder's seed is not applied to `rng`; [`Dataset::seed`] still
    /// records it, so it only describes the output when `rng` was seeded with it.
    pub fn build_data(&self, rng: &mut impl Rng) -> Result<Dataset, GenerationError> {
        let profile = self.resolve_profile()?;
        self.window.validate()?;
        let start_time = self.track_metrics.then(Instant::now);

        tracing::info!(
            profile = %profile.slug,
            accounts = self.account_count,
            start = %self.window.start,
            as_of = %self.window.as_of,
            "Generating dataset"
        );

        let accounts =
            AccountGenerator::new(&profile, self.window)?.generate_batch(self.account_count, rng);
        tracing::info!(count = accounts.len(), "Accounts generated");

        let contacts = ContactGenerator::new(&profile)?.generate_for_accounts(&accounts, rng);
        tracing::info!(count = contacts.len(), "Contacts generated");

        let index = ContactIndex::build(&contacts);
        let deals = DealGenerator::new(&profile, self.window)?.generate(&accounts, &index, rng);
        tracing::info!(count = deals.len(), "Deals generated");

        let output =
            ActivityGenerator::new(&profile, self.window)?.generate(&accounts, &index, &deals, rng);
        tracing::info!(
            count = output.activities.len(),
            silent_accounts = output.silent_accounts.len(),
            "Activities generated"
        );

        let generation_time_ms = start_time.map(|t| t.elapsed().as_millis() as u64);

        let mut dataset = Dataset {
            profile,
            seed: self.seed,
            window: self.window,
            accounts,
            contacts,
            deals,
            activities: output.activities,
            silent_accounts: output.silent_accounts,
            metrics: None,
        };

        let verify_start = Instant::now();
        integrity::verify(&dataset, &dataset.profile)?;
        tracing::debug!("Integrity check passed");

        if let Some(generation_time_ms) = generation_time_ms {
            dataset.metrics = Some(DatasetMetrics {
                generation_time_ms,
                verification_time_ms: verify_start.elapsed().as_millis() as u64,
                account_count: dataset.accounts.len(),
                contact_count: dataset.contacts.len(),
                deal_count: dataset.deals.len(),
                activity_count: dataset.activities.len(),
            });
        }
        Ok(dataset)
    }

    // ========== Preset Datasets ==========

    /// A small dataset for demos and manual inspection.
    pub fn demo() -> Self {
        Self::new().with_accounts(100)
    }

    /// A large dataset for performance testing.
    pub fn stress() -> Self {
        Self::new().with_accounts(5_000).with_metrics(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, ProfileError};

    #[test]
    fn test_same_seed_same_dataset() {
        let builder = DatasetBuilder::new().with_accounts(25).with_seed(9);
        let first = builder.build().unwrap();
        let second = builder.build().unwrap();
        assert_eq!(first.accounts, second.accounts);
        assert_eq!(first.contacts, second.contacts);
        assert_eq!(first.deals, second.deals);
        assert_eq!(first.activities, second.activities);
    }

    #[test]
    fn test_different_seed_differs() {
        let first = DatasetBuilder::new().with_accounts(25).with_seed(1).build().unwrap();
        let second = DatasetBuilder::new().with_accounts(25).with_seed(2).build().unwrap();
        assert_ne!(first.accounts, second.accounts);
    }

    #[test]
    fn test_metrics_tracking() {
        let without = DatasetBuilder::new().with_accounts(5).build().unwrap();
        assert!(without.metrics.is_none());

        let with = DatasetBuilder::new()
            .with_accounts(5)
            .with_metrics(true)
            .build()
            .unwrap();
        let metrics = with.metrics.unwrap();
        assert_eq!(metrics.account_count, 5);
        assert_eq!(metrics.contact_count, with.contacts.len());
    }

    #[test]
    fn test_unknown_profile() {
        let result = DatasetBuilder::new().with_profile("bakery").build();
        assert!(matches!(
            result,
            Err(GenerationError::Profile(ProfileError::Unknown { .. }))
        ));
    }

    #[test]
    fn test_invalid_custom_profile_fails_before_output() {
        let mut profile = ProfileRegistry::builtin().get("b2b-saas").unwrap().clone();
        profile.accounts.industries.clear();
        let result = DatasetBuilder::new().with_custom_profile(profile).build();
        assert!(matches!(
            result,
            Err(GenerationError::Profile(ProfileError::EmptyTable { .. }))
        ));
    }

    #[test]
    fn test_window_with_late_active_since_rejected() {
        let mut window = DateWindow::default();
        window.active_since = time::macros::date!(2027 - 01 - 01);
        let result = DatasetBuilder::new()
            .with_accounts(10)
            .with_window(window)
            .build();
        assert!(matches!(
            result,
            Err(GenerationError::Config(ConfigError::ActiveSince { .. }))
        ));
    }

    #[test]
    fn test_build_data_uses_supplied_rng() {
        let builder = DatasetBuilder::new().with_accounts(20).with_seed(3);
        let mut rng = StdRng::seed_from_u64(4);
        let supplied = builder.build_data(&mut rng).unwrap();
        let seeded = builder.clone().with_seed(4).build().unwrap();
        assert_eq!(supplied.accounts, seeded.accounts);
        assert_eq!(supplied.seed, 3);
    }

    #[test]
    fn test_every_builtin_profile_builds() {
        for slug in ProfileRegistry::builtin().slugs() {
            let dataset = DatasetBuilder::new()
                .with_profile(slug)
                .with_accounts(30)
                .build()
                .unwrap();
            assert_eq!(dataset.accounts.len(), 30);
            assert_eq!(dataset.profile.slug, slug);
        }
    }

    #[test]
    fn test_presets() {
        assert_eq!(DatasetBuilder::demo().account_count, 100);
        let stress = DatasetBuilder::stress();
        assert_eq!(stress.account_count, 5_000);
        assert!(stress.track_metrics);
    }
}
