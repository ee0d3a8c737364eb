//! Headline statistics of a generated dataset.

use std::collections::{BTreeMap, HashMap, HashSet};

use crm_records::{AccountId, DealStatus, PipelineKind};

use crate::builders::Dataset;

/// Counts describing the shape of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub profile: String,
    pub accounts: usize,
    pub contacts: usize,
    pub deals: usize,
    pub activities: usize,
    /// Deal count per pipeline kind and status.
    pub deals_by_pipeline: BTreeMap<PipelineKind, BTreeMap<DealStatus, usize>>,
    /// Number of accounts having a given number of contacts.
    pub contacts_per_account: BTreeMap<usize, usize>,
    pub silent_accounts: usize,
    /// Accounts with no activity of any kind.
    pub zero_activity_accounts: usize,
    /// Activities tied to an account but no deal.
    pub account_touches: usize,
    /// Sum of won deal amounts.
    pub won_amount: u64,
}

impl DatasetSummary {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut deals_by_pipeline: BTreeMap<PipelineKind, BTreeMap<DealStatus, usize>> =
            BTreeMap::new();
        let mut won_amount = 0;
        for deal in &dataset.deals {
            *deals_by_pipeline
                .entry(deal.pipeline)
                .or_default()
                .entry(deal.status)
                .or_default() += 1;
            if deal.status == DealStatus::Won {
                won_amount += deal.amount;
            }
        }

        let mut per_account: HashMap<AccountId, usize> =
            dataset.accounts.iter().map(|a| (a.id, 0)).collect();
        for contact in &dataset.contacts {
            *per_account.entry(contact.account_id).or_default() += 1;
        }
        let mut contacts_per_account = BTreeMap::new();
        for count in per_account.into_values() {
            *contacts_per_account.entry(count).or_default() += 1;
        }

        let active: HashSet<AccountId> = dataset.activities.iter().map(|a| a.account_id).collect();
        let zero_activity_accounts = dataset
            .accounts
            .iter()
            .filter(|a| !active.contains(&a.id))
            .count();
        let account_touches = dataset
            .activities
            .iter()
            .filter(|a| a.deal_id.is_none())
            .count();

        Self {
            profile: dataset.profile.name.clone(),
            accounts: dataset.accounts.len(),
            contacts: dataset.contacts.len(),
            deals: dataset.deals.len(),
            activities: dataset.activities.len(),
            deals_by_pipeline,
            contacts_per_account,
            silent_accounts: dataset.silent_accounts.len(),
            zero_activity_accounts,
            account_touches,
            won_amount,
        }
    }

    /// Deals in `kind` with `status`.
    pub fn deal_count(&self, kind: PipelineKind, status: DealStatus) -> usize {
        self.deals_by_pipeline
            .get(&kind)
            .and_then(|by_status| by_status.get(&status))
            .copied()
            .unwrap_or(0)
    }

    /// Mean contacts per account, or 0 for an empty dataset.
    pub fn mean_contacts(&self) -> f64 {
        if self.accounts == 0 {
            0.0
        } else {
            self.contacts as f64 / self.accounts as f64
        }
    }

    pub fn log(&self) {
        tracing::info!("Dataset completed: {}", self.profile);
        tracing::info!("  Accounts: {}", self.accounts);
        tracing::info!(
            "  Contacts: {} ({:.1} per account)",
            self.contacts,
            self.mean_contacts()
        );
        tracing::info!("  Deals: {}", self.deals);
        for (kind, by_status) in &self.deals_by_pipeline {
            let breakdown = by_status
                .iter()
                .map(|(status, count)| format!("{}={}", status.as_str(), count))
                .collect::<Vec<_>>()
                .join(", ");
            tracing::info!("    {}: {}", kind.as_str(), breakdown);
        }
        tracing::info!("  Won amount: {}", self.won_amount);
        tracing::info!(
            "  Activities: {} ({} not tied to a deal)",
            self.activities,
            self.account_touches
        );
        tracing::info!("  Silent accounts: {}", self.silent_accounts);
        tracing::info!("  Accounts without activities: {}", self.zero_activity_accounts);
        for (contacts, accounts) in &self.contacts_per_account {
            tracing::debug!(contacts, accounts, "Contacts per account");
        }
    }
}
