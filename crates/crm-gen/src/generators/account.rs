//! Account generation.

use fake::Fake;
use fake::faker::company::en::CompanyName;
use fake::faker::lorem::en::Word;
use rand::Rng;
use rand_distr::{Distribution, LogNormal};
use time::Duration;

use crm_records::{Account, AccountId};

use super::{pick, random_date};
use crate::config::DateWindow;
use crate::error::ProfileError;
use crate::profiles::{Checker, Profile, Weighted};
use crate::sources::random_location;

/// Revenue is reported to the nearest multiple of this.
const REVENUE_ROUNDING: u64 = 10_000;

/// Generates accounts from a profile's account tables.
pub struct AccountGenerator<'a> {
    profile: &'a Profile,
    window: DateWindow,
    tiers: Weighted<usize>,
    noise: Option<LogNormal<f64>>,
    /// Separator between a name prefix and a lorem word, matching the suffix style.
    word_joiner: &'static str,
}

impl<'a> AccountGenerator<'a> {
    /// Creates a generator, rejecting a profile with unusable account tables.
    pub fn new(profile: &'a Profile, window: DateWindow) -> Result<Self, ProfileError> {
        profile.validate_accounts(&Checker {
            profile: &profile.slug,
        })?;
        let accounts = &profile.accounts;

        let tiers = Weighted::new(
            accounts
                .employee_tiers
                .iter()
                .enumerate()
                .map(|(i, tier)| (i, tier.weight))
                .collect(),
        );

        let sigma = accounts.revenue.noise_sigma;
        let noise = if sigma > 0.0 {
            // Mean-one log-normal: E[exp(N(mu, sigma))] = exp(mu + sigma^2 / 2)
            let dist = LogNormal::new(-sigma * sigma / 2.0, sigma).map_err(|e| {
                ProfileError::Invalid {
                    profile: profile.slug.clone(),
                    reason: format!("revenue noise: {e}"),
                }
            })?;
            Some(dist)
        } else {
            None
        };

        let word_joiner = if accounts.name_suffixes.iter().any(|s| s.starts_with(' ')) {
            " "
        } else {
            ""
        };

        Ok(Self {
            profile,
            window,
            tiers,
            noise,
            word_joiner,
        })
    }

    /// Generates `count` accounts with ids `1..=count`.
    pub fn generate_batch(&self, count: usize, rng: &mut impl Rng) -> Vec<Account> {
        let accounts: Vec<Account> = (0..count)
            .map(|i| self.generate(AccountId::from_index(i), rng))
            .collect();
        tracing::debug!(count = accounts.len(), profile = %self.profile.slug, "Generated accounts");
        accounts
    }

    /// Generates a single account.
    pub fn generate(&self, id: AccountId, rng: &mut impl Rng) -> Account {
        let tables = &self.profile.accounts;

        let company_name = self.company_name(rng);
        let industry = pick(rng, &tables.industries).clone();

        let tier_index = *self.tiers.sample(rng);
        let tier = &tables.employee_tiers[tier_index];
        let employee_count = tier.employees.sample(rng);

        let per_employee = tables.revenue.per_employee.sample(rng);
        let mut revenue = (u64::from(employee_count) * per_employee) as f64;
        if let Some(noise) = &self.noise {
            revenue *= noise.sample(rng);
        }
        let rounded = (revenue / REVENUE_ROUNDING as f64).round() as u64 * REVENUE_ROUNDING;
        let annual_revenue = tables.revenue.band_for(tier).clamp(rounded);

        let location = random_location(rng);
        let founded_year = tables.founded_years.sample(rng);
        let website = format!(
            "https://www.{}{}",
            domain_label(&company_name),
            pick(rng, &tables.website_tlds)
        );
        let description = pick(rng, &tables.description_templates)
            .replace("{industry}", &industry.to_lowercase());

        let created_date = random_date(
            rng,
            self.window.start - Duration::days(365),
            self.window.midpoint(),
        );

        Account {
            id,
            company_name,
            industry,
            employee_count,
            employee_tier: (tier_index + 1) as u8,
            annual_revenue,
            street_address: location.street_address,
            city: location.place.city.to_string(),
            state: location.place.state.to_string(),
            zip_code: location.place.zip.to_string(),
            country: "United States".to_string(),
            region: location.region,
            founded_year,
            website,
            description,
            created_date,
        }
    }

    /// Builds a name by one of three strategies: prefix and suffix, prefix and
    /// a capitalized word, or a faker company name without its legal suffix.
    fn company_name(&self, rng: &mut impl Rng) -> String {
        let tables = &self.profile.accounts;
        match rng.gen_range(0..3) {
            0 => format!(
                "{}{}",
                pick(rng, &tables.name_prefixes),
                pick(rng, &tables.name_suffixes)
            ),
            1 => {
                let word: String = Word().fake_with_rng(rng);
                format!(
                    "{}{}{}",
                    pick(rng, &tables.name_prefixes),
                    self.word_joiner,
                    capitalize(&word)
                )
            }
            _ => {
                let raw: String = CompanyName().fake_with_rng(rng);
                strip_legal_suffix(&raw, &tables.legal_suffixes)
            }
        }
    }
}

fn strip_legal_suffix(name: &str, suffixes: &[String]) -> String {
    let trimmed = suffixes
        .iter()
        .find_map(|suffix| name.strip_suffix(suffix.as_str()))
        .unwrap_or(name);
    trimmed.trim_end_matches([',', ' ']).to_string()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase alphanumeric label for a website domain.
fn domain_label(name: &str) -> String {
    let label: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if label.is_empty() {
        "company".to_string()
    } else {
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::ProfileRegistry;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_generate_batch_ids_and_bands() {
        let registry = ProfileRegistry::builtin();
        for profile in registry.iter() {
            let window = DateWindow::default();
            let generator = AccountGenerator::new(profile, window).unwrap();
            let mut rng = StdRng::seed_from_u64(42);
            let accounts = generator.generate_batch(200, &mut rng);

            assert_eq!(accounts.len(), 200);
            for (i, account) in accounts.iter().enumerate() {
                assert_eq!(account.id.get() as usize, i + 1);
                let tier = &profile.accounts.employee_tiers[usize::from(account.employee_tier) - 1];
                assert!(tier.employees.contains(account.employee_count));
                let band = profile.accounts.revenue.band_for(tier);
                assert!(
                    band.contains(account.annual_revenue),
                    "{} revenue {} outside {:?}",
                    profile.slug,
                    account.annual_revenue,
                    band
                );
                assert!(account.created_date < window.midpoint() + Duration::days(1));
                assert!(account.website.starts_with("https://www."));
                assert!(!account.company_name.is_empty());
                assert_eq!(crm_records::UsRegion::for_state(&account.state), Some(account.region));
            }
        }
    }

    #[test]
    fn test_zero_accounts() {
        let registry = ProfileRegistry::builtin();
        let profile = registry.get("b2b-saas").unwrap();
        let generator = AccountGenerator::new(profile, DateWindow::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generator.generate_batch(0, &mut rng).is_empty());
    }

    #[test]
    fn test_missing_industries_is_rejected() {
        let registry = ProfileRegistry::builtin();
        let mut profile = registry.get("manufacturer").unwrap().clone();
        profile.accounts.industries.clear();
        let result = AccountGenerator::new(&profile, DateWindow::default());
        assert!(matches!(result, Err(ProfileError::EmptyTable { .. })));
    }

    #[test]
    fn test_strip_legal_suffix() {
        let suffixes = vec![" Inc".to_string(), " and Sons".to_string()];
        assert_eq!(strip_legal_suffix("Hahn and Sons", &suffixes), "Hahn");
        assert_eq!(strip_legal_suffix("Kuhn, Bode Inc", &suffixes), "Kuhn, Bode");
        assert_eq!(strip_legal_suffix("Rath-Kling", &suffixes), "Rath-Kling");
    }

    #[test]
    fn test_domain_label() {
        assert_eq!(domain_label("Precision Supply Co."), "precisionsupplyco");
        assert_eq!(domain_label("!!"), "company");
    }
}
