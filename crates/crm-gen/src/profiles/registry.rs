//! Lookup of profiles by slug or display name.

use crate::error::ProfileError;

use super::{Profile, b2b_saas, consultancy, manufacturer};

/// Known profiles, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: Vec<Profile>,
}

impl ProfileRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry holding the built-in profiles.
    pub fn builtin() -> Self {
        Self {
            profiles: vec![
                b2b_saas::profile(),
                manufacturer::profile(),
                consultancy::profile(),
            ],
        }
    }

    /// Validates and adds a profile, replacing any profile with the same slug.
    pub fn register(&mut self, profile: Profile) -> Result<(), ProfileError> {
        profile.validate()?;
        let key = normalize(&profile.slug);
        match self.profiles.iter_mut().find(|p| normalize(&p.slug) == key) {
            Some(existing) => *existing = profile,
            None => self.profiles.push(profile),
        }
        Ok(())
    }

    /// Finds a profile by slug or display name.
    ///
    /// Matching ignores case and treats any run of non-alphanumeric characters
    /// as a single `-`, so `B2B SaaS`, `b2b_saas` and `b2b-saas` are the same key.
    pub fn get(&self, key: &str) -> Result<&Profile, ProfileError> {
        let wanted = normalize(key);
        self.profiles
            .iter()
            .find(|p| normalize(&p.slug) == wanted || normalize(&p.name) == wanted)
            .ok_or_else(|| ProfileError::Unknown {
                name: key.to_string(),
                available: self.slugs().join(", "),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.iter()
    }

    pub fn slugs(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.slug.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

fn normalize(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.trim().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_three_profiles() {
        let registry = ProfileRegistry::builtin();
        assert_eq!(registry.slugs(), vec!["b2b-saas", "manufacturer", "consultancy"]);
    }

    #[test]
    fn test_lookup_by_name_and_slug() {
        let registry = ProfileRegistry::builtin();
        assert_eq!(registry.get("B2B SaaS").unwrap().slug, "b2b-saas");
        assert_eq!(registry.get("b2b_saas").unwrap().slug, "b2b-saas");
        assert_eq!(registry.get(" Manufacturer ").unwrap().slug, "manufacturer");
        assert_eq!(registry.get("CONSULTANCY").unwrap().slug, "consultancy");
    }

    #[test]
    fn test_unknown_profile_lists_available() {
        let registry = ProfileRegistry::builtin();
        let err = registry.get("bakery").unwrap_err();
        match err {
            ProfileError::Unknown { name, available } => {
                assert_eq!(name, "bakery");
                assert!(available.contains("consultancy"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_register_replaces_same_slug() {
        let mut registry = ProfileRegistry::builtin();
        let mut custom = registry.get("manufacturer").unwrap().clone();
        custom.name = "Job Shop".to_string();
        registry.register(custom).unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get("job shop").unwrap().slug, "manufacturer");
    }

    #[test]
    fn test_register_rejects_invalid_profile() {
        let mut registry = ProfileRegistry::new();
        let mut broken = ProfileRegistry::builtin().get("consultancy").unwrap().clone();
        broken.sales_reps.clear();
        assert!(registry.register(broken).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("B2B  SaaS!"), "b2b-saas");
        assert_eq!(normalize("--x--"), "x");
    }
}
