//! Contact generation.

use std::collections::BTreeMap;

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use rand::Rng;

use crm_records::{Account, AccountId, Contact, ContactId, Seniority};

use super::pick;
use crate::error::ProfileError;
use crate::profiles::{Checker, Profile};

/// Generates the people at each account.
pub struct ContactGenerator<'a> {
    profile: &'a Profile,
}

impl<'a> ContactGenerator<'a> {
    pub fn new(profile: &'a Profile) -> Result<Self, ProfileError> {
        let check = Checker {
            profile: &profile.slug,
        };
        profile.validate_contacts(&check)?;
        if profile.sales_reps.is_empty() {
            return Err(ProfileError::EmptyTable {
                profile: profile.slug.clone(),
                table: "sales_reps".to_string(),
            });
        }
        Ok(Self { profile })
    }

    /// Generates contacts for every account, in account order.
    ///
    /// Contact ids are sequential across all accounts.
    pub fn generate_for_accounts(&self, accounts: &[Account], rng: &mut impl Rng) -> Vec<Contact> {
        let mut contacts = Vec::new();
        for account in accounts {
            let count = *self.profile.contacts.per_account.sample(rng);
            for _ in 0..count {
                let id = ContactId::from_index(contacts.len());
                contacts.push(self.generate(id, account, rng));
            }
        }
        tracing::debug!(
            count = contacts.len(),
            accounts = accounts.len(),
            "Generated contacts"
        );
        contacts
    }

    /// Generates one contact at `account`.
    pub fn generate(&self, contact_id: ContactId, account: &Account, rng: &mut impl Rng) -> Contact {
        let first_name: String = FirstName().fake_with_rng(rng);
        let last_name: String = LastName().fake_with_rng(rng);
        let email = format!(
            "{}.{}@{}",
            email_part(&first_name),
            email_part(&last_name),
            account.email_domain()
        );
        let phone: String = PhoneNumber().fake_with_rng(rng);

        let department = self.profile.contacts.departments.sample(rng);
        let title = pick(rng, &department.titles).clone();
        let owner = pick(rng, &self.profile.sales_reps).clone();

        Contact {
            contact_id,
            account_id: account.id,
            first_name,
            last_name,
            email,
            phone,
            seniority: Seniority::from_title(&title),
            title,
            department: department.name.clone(),
            owner,
        }
    }
}

fn email_part(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Contacts grouped by account, for drawing deal and activity contacts.
#[derive(Debug, Clone)]
pub struct ContactIndex<'a> {
    contacts: &'a [Contact],
    by_account: BTreeMap<AccountId, Vec<&'a Contact>>,
}

impl<'a> ContactIndex<'a> {
    pub fn build(contacts: &'a [Contact]) -> Self {
        let mut by_account: BTreeMap<AccountId, Vec<&'a Contact>> = BTreeMap::new();
        for contact in contacts {
            by_account.entry(contact.account_id).or_default().push(contact);
        }
        Self {
            contacts,
            by_account,
        }
    }

    /// Contacts at `account`, in id order. Empty if it has none.
    pub fn for_account(&self, account: AccountId) -> &[&'a Contact] {
        self.by_account
            .get(&account)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn get(&self, contact_id: ContactId) -> Option<&'a Contact> {
        let index = (contact_id.get() as usize).checked_sub(1)?;
        self.contacts
            .get(index)
            .filter(|c| c.contact_id == contact_id)
            .or_else(|| self.contacts.iter().find(|c| c.contact_id == contact_id))
    }

    /// Draws a contact at `account`, or `None` if it has none.
    pub fn random_for_account(&self, account: AccountId, rng: &mut impl Rng) -> Option<&'a Contact> {
        let pool = self.for_account(account);
        if pool.is_empty() {
            None
        } else {
            Some(*pick(rng, pool))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DateWindow;
    use crate::generators::AccountGenerator;
    use crate::profiles::{ProfileRegistry, Weighted};
    use rand::{SeedableRng, rngs::StdRng};

    fn accounts(profile: &Profile, count: usize, rng: &mut StdRng) -> Vec<Account> {
        AccountGenerator::new(profile, DateWindow::default())
            .unwrap()
            .generate_batch(count, rng)
    }

    #[test]
    fn test_contacts_per_account_in_range() {
        let registry = ProfileRegistry::builtin();
        let profile = registry.get("b2b-saas").unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let accounts = accounts(profile, 50, &mut rng);
        let contacts = ContactGenerator::new(profile)
            .unwrap()
            .generate_for_accounts(&accounts, &mut rng);

        let index = ContactIndex::build(&contacts);
        for account in &accounts {
            let pool = index.for_account(account.id);
            assert!((2..=5).contains(&pool.len()), "{} contacts", pool.len());
        }
        for (i, contact) in contacts.iter().enumerate() {
            assert_eq!(contact.contact_id.get() as usize, i + 1);
            assert_eq!(index.get(contact.contact_id), Some(contact));
        }
    }

    #[test]
    fn test_contact_fields() {
        let registry = ProfileRegistry::builtin();
        let profile = registry.get("consultancy").unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        let accounts = accounts(profile, 5, &mut rng);
        let contacts = ContactGenerator::new(profile)
            .unwrap()
            .generate_for_accounts(&accounts, &mut rng);

        for contact in &contacts {
            let account = &accounts[contact.account_id.get() as usize - 1];
            assert!(contact.email.ends_with(&format!("@{}", account.email_domain())));
            assert!(profile.sales_reps.contains(&contact.owner));
            assert_eq!(contact.seniority, Seniority::from_title(&contact.title));
            let department = profile
                .contacts
                .departments
                .items()
                .find(|d| d.name == contact.department)
                .unwrap();
            assert!(department.titles.contains(&contact.title));
        }
    }

    #[test]
    fn test_fixed_contact_count() {
        let registry = ProfileRegistry::builtin();
        let mut profile = registry.get("b2b-saas").unwrap().clone();
        profile.contacts.per_account = Weighted::new(vec![(1, 1)]);
        let mut rng = StdRng::seed_from_u64(3);
        let accounts = accounts(&profile, 7, &mut rng);
        let contacts = ContactGenerator::new(&profile)
            .unwrap()
            .generate_for_accounts(&accounts, &mut rng);
        assert_eq!(contacts.len(), 7);
    }

    #[test]
    fn test_unknown_account_has_empty_pool() {
        let index = ContactIndex::build(&[]);
        assert!(index.for_account(AccountId(9)).is_empty());
        assert!(index.get(ContactId(1)).is_none());
        let mut rng = StdRng::seed_from_u64(0);
        assert!(index.random_for_account(AccountId(9), &mut rng).is_none());
    }
}
