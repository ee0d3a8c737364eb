//! Post-generation checks of the relational and temporal invariants.
//!
//! Generators uphold these by construction; [`verify`] exists so a regression
//! surfaces as an error instead of a silently broken export.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crm_records::{
    AccountId, ActivityId, Contact, ContactId, Deal, DealId, DealStatus, PipelineKind,
};

use crate::builders::Dataset;
use crate::profiles::Profile;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("{table} ids are not sequential from 1 (position {position})")]
    NonSequentialIds { table: &'static str, position: usize },

    #[error("{table} {id} refers to missing {column} {target}")]
    DanglingReference {
        table: &'static str,
        id: u32,
        column: &'static str,
        target: u32,
    },

    #[error("{table} {id} uses contact {contact} from another account")]
    ForeignContact {
        table: &'static str,
        id: u32,
        contact: ContactId,
    },

    #[error("account {0} has no contacts")]
    AccountWithoutContacts(AccountId),

    #[error("deal {deal} has status {status} but stage '{stage}'")]
    StatusMismatch {
        deal: DealId,
        status: DealStatus,
        stage: String,
    },

    #[error("deal {0} has a close date that does not match its status or precedes creation")]
    CloseDate(DealId),

    #[error("deal {0} is dated after the as-of date")]
    DealAfterAsOf(DealId),

    #[error("deal {0} was created before its account")]
    DealBeforeAccount(DealId),

    #[error("deal {deal} amount {amount} is outside its contract value band")]
    AmountOutOfBand { deal: DealId, amount: u64 },

    #[error("deal {deal} has an invalid parent {parent}")]
    InvalidParent { deal: DealId, parent: DealId },

    #[error("deal {deal} starts {offset} days after its parent closed")]
    SpawnOffset { deal: DealId, offset: i64 },

    #[error("deal {0} has no owner")]
    MissingOwner(DealId),

    #[error("self-serve deal {0} has an owner or activities")]
    SelfServeTouched(DealId),

    #[error("activity {activity} falls outside the window of deal {deal}")]
    ActivityOutsideWindow { activity: ActivityId, deal: DealId },

    #[error("activity {activity} falls outside the history of account {account}")]
    ActivityOutsideHistory {
        activity: ActivityId,
        account: AccountId,
    },

    #[error("silent account {0} has activities")]
    SilentAccountActive(AccountId),

    #[error("silent account {0} has deals")]
    SilentAccountHasDeals(AccountId),
}

/// Checks every invariant that can be verified on a single dataset.
pub fn verify(dataset: &Dataset, profile: &Profile) -> Result<(), IntegrityError> {
    check_ids(dataset)?;
    let contacts: BTreeMap<ContactId, &Contact> =
        dataset.contacts.iter().map(|c| (c.contact_id, c)).collect();
    check_contacts(dataset)?;
    check_deals(dataset, profile, &contacts)?;
    check_activities(dataset, profile, &contacts)
}

fn check_ids(dataset: &Dataset) -> Result<(), IntegrityError> {
    fn sequential(table: &'static str, ids: impl Iterator<Item = u32>) -> Result<(), IntegrityError> {
        for (position, id) in ids.enumerate() {
            if id as usize != position + 1 {
                return Err(IntegrityError::NonSequentialIds { table, position });
            }
        }
        Ok(())
    }
    sequential("account", dataset.accounts.iter().map(|a| a.id.get()))?;
    sequential("contact", dataset.contacts.iter().map(|c| c.contact_id.get()))?;
    sequential("deal", dataset.deals.iter().map(|d| d.deal_id.get()))?;
    sequential("activity", dataset.activities.iter().map(|a| a.activity_id.get()))
}

fn account_exists(dataset: &Dataset, id: AccountId) -> bool {
    (1..=dataset.accounts.len()).contains(&(id.get() as usize))
}

fn check_contacts(dataset: &Dataset) -> Result<(), IntegrityError> {
    let mut with_contacts = BTreeSet::new();
    for contact in &dataset.contacts {
        if !account_exists(dataset, contact.account_id) {
            return Err(IntegrityError::DanglingReference {
                table: "contact",
                id: contact.contact_id.get(),
                column: "account_id",
                target: contact.account_id.get(),
            });
        }
        with_contacts.insert(contact.account_id);
    }
    match dataset.accounts.iter().find(|a| !with_contacts.contains(&a.id)) {
        Some(account) => Err(IntegrityError::AccountWithoutContacts(account.id)),
        None => Ok(()),
    }
}

fn check_deals(
    dataset: &Dataset,
    profile: &Profile,
    contacts: &BTreeMap<ContactId, &Contact>,
) -> Result<(), IntegrityError> {
    let as_of = dataset.window.as_of;
    for deal in &dataset.deals {
        let id = deal.deal_id;
        if !account_exists(dataset, deal.account_id) {
            return Err(IntegrityError::DanglingReference {
                table: "deal",
                id: id.get(),
                column: "account_id",
                target: deal.account_id.get(),
            });
        }
        check_contact("deal", id.get(), deal.account_id, deal.contact_id, contacts)?;

        let Some(pipeline) = profile.pipeline(deal.pipeline) else {
            return Err(IntegrityError::StatusMismatch {
                deal: id,
                status: deal.status,
                stage: deal.stage.clone(),
            });
        };
        if pipeline.status_of(&deal.stage) != deal.status {
            return Err(IntegrityError::StatusMismatch {
                deal: id,
                status: deal.status,
                stage: deal.stage.clone(),
            });
        }
        match deal.close_date {
            Some(close) if !deal.status.is_terminal() || close < deal.created_date => {
                return Err(IntegrityError::CloseDate(id));
            }
            None if deal.status.is_terminal() => return Err(IntegrityError::CloseDate(id)),
            _ => {}
        }
        if deal.window_end(as_of) > as_of || deal.created_date > as_of {
            return Err(IntegrityError::DealAfterAsOf(id));
        }
        let account = &dataset.accounts[deal.account_id.get() as usize - 1];
        if deal.created_date < account.created_date {
            return Err(IntegrityError::DealBeforeAccount(id));
        }
        if let Some(band) = profile.amount_band(deal.pipeline, deal.segment)
            && !band.contains(deal.amount)
        {
            return Err(IntegrityError::AmountOutOfBand {
                deal: id,
                amount: deal.amount,
            });
        }
        match (deal.pipeline, &deal.owner) {
            (PipelineKind::SelfServe, Some(_)) => return Err(IntegrityError::SelfServeTouched(id)),
            (PipelineKind::SelfServe, None) => {}
            (_, None) => return Err(IntegrityError::MissingOwner(id)),
            _ => {}
        }
        if let Some(parent_id) = deal.parent_deal_id {
            check_parent(dataset, profile, deal, parent_id)?;
        }
    }
    Ok(())
}

fn check_parent(
    dataset: &Dataset,
    profile: &Profile,
    deal: &Deal,
    parent_id: DealId,
) -> Result<(), IntegrityError> {
    let invalid = IntegrityError::InvalidParent {
        deal: deal.deal_id,
        parent: parent_id,
    };
    let Some(parent) = (parent_id.get() as usize)
        .checked_sub(1)
        .and_then(|i| dataset.deals.get(i))
    else {
        return Err(invalid);
    };
    let Some(parent_close) = parent.close_date else {
        return Err(invalid);
    };
    if parent.account_id != deal.account_id || parent.status != DealStatus::Won {
        return Err(invalid);
    }

    let offset = (deal.created_date - parent_close).whole_days();
    match (deal.pipeline, parent.pipeline) {
        (PipelineKind::Renewal | PipelineKind::Expansion, PipelineKind::Primary) => {
            let in_window = profile
                .spawn_rule(deal.pipeline)
                .is_some_and(|rule| offset > 0 && rule.offset_days.contains(offset as u32));
            if in_window {
                Ok(())
            } else {
                Err(IntegrityError::SpawnOffset {
                    deal: deal.deal_id,
                    offset,
                })
            }
        }
        (PipelineKind::Primary, PipelineKind::SelfServe) if offset > 0 => Ok(()),
        (PipelineKind::Primary, PipelineKind::SelfServe) => Err(IntegrityError::SpawnOffset {
            deal: deal.deal_id,
            offset,
        }),
        _ => Err(invalid),
    }
}

fn check_contact(
    table: &'static str,
    id: u32,
    account: AccountId,
    contact_id: ContactId,
    contacts: &BTreeMap<ContactId, &Contact>,
) -> Result<(), IntegrityError> {
    match contacts.get(&contact_id) {
        None => Err(IntegrityError::DanglingReference {
            table,
            id,
            column: "contact_id",
            target: contact_id.get(),
        }),
        Some(contact) if contact.account_id != account => Err(IntegrityError::ForeignContact {
            table,
            id,
            contact: contact_id,
        }),
        Some(_) => Ok(()),
    }
}

fn check_activities(
    dataset: &Dataset,
    profile: &Profile,
    contacts: &BTreeMap<ContactId, &Contact>,
) -> Result<(), IntegrityError> {
    let zero_touch = profile
        .deals
        .self_serve
        .as_ref()
        .is_some_and(|s| s.zero_touch);
    let silent: BTreeSet<AccountId> = dataset.silent_accounts.iter().copied().collect();
    if let Some(deal) = dataset.deals.iter().find(|d| silent.contains(&d.account_id)) {
        return Err(IntegrityError::SilentAccountHasDeals(deal.account_id));
    }

    for activity in &dataset.activities {
        let id = activity.activity_id.get();
        let dangling = |column, target| IntegrityError::DanglingReference {
            table: "activity",
            id,
            column,
            target,
        };
        let date = activity.occurred_at.date();

        match activity.deal_id {
            Some(deal_id) => {
                let Some(deal) = (deal_id.get() as usize)
                    .checked_sub(1)
                    .and_then(|i| dataset.deals.get(i))
                else {
                    return Err(dangling("deal_id", deal_id.get()));
                };
                if deal.account_id != activity.account_id {
                    return Err(dangling("account_id", activity.account_id.get()));
                }
                if date < deal.created_date || date > deal.window_end(dataset.window.as_of) {
                    return Err(IntegrityError::ActivityOutsideWindow {
                        activity: activity.activity_id,
                        deal: deal.deal_id,
                    });
                }
                if zero_touch && deal.pipeline == PipelineKind::SelfServe {
                    return Err(IntegrityError::SelfServeTouched(deal.deal_id));
                }
            }
            None => {
                let Some(account) = (activity.account_id.get() as usize)
                    .checked_sub(1)
                    .and_then(|i| dataset.accounts.get(i))
                else {
                    return Err(dangling("account_id", activity.account_id.get()));
                };
                if !dataset.window.contains(date) || date < account.created_date {
                    return Err(IntegrityError::ActivityOutsideHistory {
                        activity: activity.activity_id,
                        account: account.id,
                    });
                }
            }
        }
        check_contact("activity", id, activity.account_id, activity.contact_id, contacts)?;

        if silent.contains(&activity.account_id) {
            return Err(IntegrityError::SilentAccountActive(activity.account_id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::DatasetBuilder;
    use crate::profiles::ProfileRegistry;
    use time::Duration;

    fn dataset() -> (Dataset, Profile) {
        let builder = DatasetBuilder::new().with_accounts(40).with_seed(42);
        let dataset = builder.build().unwrap();
        let profile = ProfileRegistry::builtin().get("b2b-saas").unwrap().clone();
        (dataset, profile)
    }

    #[test]
    fn test_generated_dataset_passes() {
        let (dataset, profile) = dataset();
        assert_eq!(verify(&dataset, &profile), Ok(()));
    }

    #[test]
    fn test_detects_status_mismatch() {
        let (mut dataset, profile) = dataset();
        let deal = &mut dataset.deals[0];
        deal.status = match deal.status {
            DealStatus::Open => DealStatus::Won,
            _ => DealStatus::Open,
        };
        assert!(matches!(
            verify(&dataset, &profile),
            Err(IntegrityError::StatusMismatch { .. })
        ));
    }

    #[test]
    fn test_detects_foreign_contact() {
        let (mut dataset, profile) = dataset();
        let account = dataset.deals[0].account_id;
        let other = dataset
            .contacts
            .iter()
            .find(|c| c.account_id != account)
            .unwrap()
            .contact_id;
        dataset.deals[0].contact_id = other;
        assert!(matches!(
            verify(&dataset, &profile),
            Err(IntegrityError::ForeignContact { .. })
        ));
    }

    #[test]
    fn test_detects_activity_outside_window() {
        let (mut dataset, profile) = dataset();
        let activity = dataset
            .activities
            .iter_mut()
            .find(|a| a.deal_id.is_some())
            .unwrap();
        activity.occurred_at -= Duration::days(4000);
        assert!(matches!(
            verify(&dataset, &profile),
            Err(IntegrityError::ActivityOutsideWindow { .. })
        ));
    }

    #[test]
    fn test_detects_account_touch_after_as_of() {
        let (mut dataset, profile) = dataset();
        let activity = dataset
            .activities
            .iter_mut()
            .find(|a| a.deal_id.is_none())
            .unwrap();
        activity.occurred_at += Duration::days(4000);
        assert!(matches!(
            verify(&dataset, &profile),
            Err(IntegrityError::ActivityOutsideHistory { .. })
        ));
    }

    #[test]
    fn test_detects_silent_account_with_deals() {
        let (mut dataset, profile) = dataset();
        let with_deal = dataset.deals[0].account_id;
        dataset.silent_accounts.push(with_deal);
        assert_eq!(
            verify(&dataset, &profile),
            Err(IntegrityError::SilentAccountHasDeals(with_deal))
        );
    }

    #[test]
    fn test_detects_silent_account_activity() {
        let (mut dataset, profile) = dataset();
        let with_deals: BTreeSet<AccountId> = dataset.deals.iter().map(|d| d.account_id).collect();
        let active = dataset
            .activities
            .iter()
            .map(|a| a.account_id)
            .find(|id| !with_deals.contains(id))
            .unwrap();
        dataset.silent_accounts.push(active);
        assert_eq!(
            verify(&dataset, &profile),
            Err(IntegrityError::SilentAccountActive(active))
        );
    }
}
