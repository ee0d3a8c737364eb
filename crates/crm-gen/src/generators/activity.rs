//! Activity generation: the sales touches along each deal's timeline, plus
//! account-level relationship and outreach touches.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use time::{Date, Duration, PrimitiveDateTime, Time};

use crm_records::{
    Account, AccountId, Activity, ActivityId, ActivityType, Contact, Deal, DealPhase, DealStatus,
    PipelineKind,
};

use super::{ContactIndex, pick, random_date};
use crate::config::DateWindow;
use crate::error::ProfileError;
use crate::profiles::{Checker, Profile, Weighted};

/// First hour of the business day.
const BUSINESS_START_HOUR: i64 = 8;
/// Business hours per day.
const BUSINESS_HOURS: i64 = 11;
/// Durations are rounded to this many minutes.
const DURATION_STEP: u32 = 5;
/// Open deals get at least this many touches inside the recent window.
const RECENT_TOUCHES: usize = 2;

/// Why an account is touched outside any deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccountTouch {
    /// Check-ins with an account that has deals.
    Relationship,
    /// Prospecting an account that never opened a deal.
    Outreach,
}

/// Result of the activity stage.
#[derive(Debug, Clone, Default)]
pub struct ActivityOutput {
    /// Activities sorted by time, with ids from 1.
    pub activities: Vec<Activity>,
    /// Accounts chosen to have no activities at all, in id order. They are
    /// drawn from accounts without deals.
    pub silent_accounts: Vec<AccountId>,
}

/// Generates activities for a set of deals.
pub struct ActivityGenerator<'a> {
    profile: &'a Profile,
    window: DateWindow,
}

impl<'a> ActivityGenerator<'a> {
    pub fn new(profile: &'a Profile, window: DateWindow) -> Result<Self, ProfileError> {
        profile.validate_activities(&Checker {
            profile: &profile.slug,
        })?;
        Ok(Self { profile, window })
    }

    /// Generates activities for every deal, picks the silent accounts among
    /// those without deals, then adds account-level touches to the rest.
    pub fn generate(
        &self,
        accounts: &[Account],
        contacts: &ContactIndex<'_>,
        deals: &[Deal],
        rng: &mut impl Rng,
    ) -> ActivityOutput {
        let by_id: BTreeMap<AccountId, &Account> = accounts.iter().map(|a| (a.id, a)).collect();
        let zero_touch = self
            .profile
            .deals
            .self_serve
            .as_ref()
            .is_some_and(|s| s.zero_touch);

        let mut activities = Vec::new();
        let mut with_deals = BTreeSet::new();
        for deal in deals {
            with_deals.insert(deal.account_id);
            if zero_touch && deal.pipeline == PipelineKind::SelfServe {
                continue;
            }
            let Some(account) = by_id.get(&deal.account_id) else {
                tracing::warn!(deal = %deal.deal_id, account = %deal.account_id, "Deal refers to an unknown account");
                continue;
            };
            self.for_deal(deal, account, contacts, &mut activities, rng);
        }
        let deal_touches = activities.len();

        let without_deals: Vec<AccountId> = accounts
            .iter()
            .map(|a| a.id)
            .filter(|id| !with_deals.contains(id))
            .collect();
        let fraction = self.profile.activities.zero_activity_fraction;
        let wanted = (accounts.len() as f64 * fraction).round() as usize;
        if wanted > without_deals.len() {
            tracing::warn!(
                wanted,
                available = without_deals.len(),
                "Too few accounts without deals to silence"
            );
        }
        let silent_count = wanted.min(without_deals.len());
        let silent: BTreeSet<AccountId> =
            rand::seq::index::sample(rng, without_deals.len(), silent_count)
                .into_iter()
                .map(|i| without_deals[i])
                .collect();

        for account in accounts {
            if silent.contains(&account.id) {
                continue;
            }
            let kind = if with_deals.contains(&account.id) {
                AccountTouch::Relationship
            } else {
                AccountTouch::Outreach
            };
            self.for_account(account, kind, contacts, &mut activities, rng);
        }

        activities.sort_by_key(|a| (a.occurred_at, a.account_id));
        for (i, activity) in activities.iter_mut().enumerate() {
            activity.activity_id = ActivityId::from_index(i);
        }

        tracing::debug!(
            deal_touches,
            account_touches = activities.len() - deal_touches,
            silent_accounts = silent.len(),
            "Generated activities"
        );
        ActivityOutput {
            activities,
            silent_accounts: silent.into_iter().collect(),
        }
    }

    /// Touches for an open deal: one per week open, capped, scaled by the
    /// segment multiplier, never below the profile minimum.
    pub fn open_touch_count(&self, deal: &Deal) -> u32 {
        let tables = &self.profile.activities;
        let weeks = (self.window.as_of - deal.created_date).whole_weeks().max(0) as u32;
        let touches = f64::from(weeks.min(tables.open_weekly_cap)) * tables.multiplier(deal.segment);
        (touches.round() as u32).max(tables.open_minimum)
    }

    fn draw_count(&self, deal: &Deal, rng: &mut impl Rng) -> u32 {
        let tables = &self.profile.activities;
        let multiplier = tables.multiplier(deal.segment);
        match deal.status {
            DealStatus::Won => tables.count_won.scaled(multiplier).sample(rng),
            DealStatus::Lost => tables.count_lost.scaled(multiplier).sample(rng),
            DealStatus::Open => self.open_touch_count(deal),
        }
    }

    fn for_deal(
        &self,
        deal: &Deal,
        account: &Account,
        contacts: &ContactIndex<'_>,
        out: &mut Vec<Activity>,
        rng: &mut impl Rng,
    ) {
        let pool = contacts.for_account(account.id);
        let Some(primary) = contacts.get(deal.contact_id).or_else(|| pool.first().copied()) else {
            return;
        };

        let start = deal.created_date;
        let end = deal.window_end(self.window.as_of);
        let span = (end - start).whole_days();
        let timestamps = self.timestamps(deal, start, end, rng);

        for occurred_at in timestamps {
            let progress = if span > 0 {
                (occurred_at.date() - start).whole_days() as f64 / span as f64
            } else {
                0.0
            };
            let phase = DealPhase::from_progress(progress);
            let contact = self.touch_contact(primary, pool, rng);
            out.push(self.touch(deal, account, contact, phase, occurred_at, rng));
        }
    }

    /// Touches not tied to a deal, dated anywhere between the account's
    /// creation (or the window start) and `as_of`.
    fn for_account(
        &self,
        account: &Account,
        kind: AccountTouch,
        contacts: &ContactIndex<'_>,
        out: &mut Vec<Activity>,
        rng: &mut impl Rng,
    ) {
        let pool = contacts.for_account(account.id);
        if pool.is_empty() {
            return;
        }
        let touches = &self.profile.activities.account_touches;
        let (count, mix): (_, &Weighted<ActivityType>) = match kind {
            AccountTouch::Relationship => (touches.relationship_count, &touches.relationship_mix),
            AccountTouch::Outreach => (touches.outreach_count, &touches.outreach_mix),
        };
        let start = account
            .created_date
            .max(self.window.start)
            .min(self.window.as_of);

        for _ in 0..count.sample(rng) {
            let occurred_at = business_time(random_date(rng, start, self.window.as_of), rng);
            let contact = *pick(rng, pool);
            let activity_type = *mix.sample(rng);
            let subject = match kind {
                AccountTouch::Outreach => self.subject(DealPhase::Early, activity_type, rng),
                AccountTouch::Relationship => self.general_subject(activity_type, rng),
            };
            let owner = contact.owner.clone();
            out.push(self.record(account, contact, activity_type, subject, owner, occurred_at, rng));
        }
    }

    /// Sorted touch times inside the deal's window.
    fn timestamps(
        &self,
        deal: &Deal,
        start: Date,
        end: Date,
        rng: &mut impl Rng,
    ) -> Vec<PrimitiveDateTime> {
        let count = self.draw_count(deal, rng) as usize;
        let recent = if deal.status == DealStatus::Open {
            count.min(RECENT_TOUCHES)
        } else {
            0
        };
        let recent_days = i64::from(self.profile.activities.recent_activity_days);
        let recent_start = (end - Duration::days(recent_days)).max(start);

        let mut timestamps: Vec<PrimitiveDateTime> = (0..count)
            .map(|i| {
                let date = if i < recent {
                    random_date(rng, recent_start, end)
                } else {
                    random_date(rng, start, end)
                };
                business_time(date, rng)
            })
            .collect();
        timestamps.sort();
        timestamps
    }

    /// The deal's contact, or now and then another stakeholder at the account.
    fn touch_contact<'c>(
        &self,
        primary: &'c Contact,
        pool: &[&'c Contact],
        rng: &mut impl Rng,
    ) -> &'c Contact {
        if pool.len() < 2 || rng.r#gen::<f64>() >= self.profile.activities.stakeholder_rate {
            return primary;
        }
        let others: Vec<&'c Contact> = pool
            .iter()
            .copied()
            .filter(|c| c.contact_id != primary.contact_id)
            .collect();
        if others.is_empty() {
            primary
        } else {
            *pick(rng, &others)
        }
    }

    fn touch(
        &self,
        deal: &Deal,
        account: &Account,
        contact: &Contact,
        phase: DealPhase,
        occurred_at: PrimitiveDateTime,
        rng: &mut impl Rng,
    ) -> Activity {
        let activity_type = *self.profile.activities.phase_mix.get(phase).sample(rng);
        let subject = self.subject(phase, activity_type, rng);
        let owner = deal.owner.clone().unwrap_or_else(|| contact.owner.clone());
        Activity {
            deal_id: Some(deal.deal_id),
            phase: Some(phase),
            ..self.record(account, contact, activity_type, subject, owner, occurred_at, rng)
        }
    }

    /// An activity with its body and duration filled in, tied to no deal.
    #[allow(clippy::too_many_arguments)]
    fn record(
        &self,
        account: &Account,
        contact: &Contact,
        activity_type: ActivityType,
        subject: String,
        owner: String,
        occurred_at: PrimitiveDateTime,
        rng: &mut impl Rng,
    ) -> Activity {
        let tables = &self.profile.activities;
        let body = match tables.body_templates.get(&activity_type) {
            Some(templates) if !templates.is_empty() => pick(rng, templates)
                .replace("{first_name}", &contact.first_name)
                .replace("{company}", &account.company_name)
                .replace("{subject}", &subject)
                .replace("{rep}", &owner),
            _ => subject.clone(),
        };

        let duration_minutes = tables.durations.get(&activity_type).map(|band| {
            let raw = band.sample(rng);
            ((raw + DURATION_STEP / 2) / DURATION_STEP * DURATION_STEP).max(DURATION_STEP)
        });

        Activity {
            activity_id: ActivityId(0),
            deal_id: None,
            account_id: account.id,
            contact_id: contact.contact_id,
            activity_type,
            phase: None,
            occurred_at,
            subject,
            body,
            duration_minutes,
            owner,
        }
    }

    fn subject(&self, phase: DealPhase, kind: ActivityType, rng: &mut impl Rng) -> String {
        let tables = &self.profile.activities;
        let phase_list = tables.phase_subjects_for(phase, kind);
        if !phase_list.is_empty() && rng.r#gen::<f64>() < tables.phase_subject_bias {
            return pick(rng, phase_list).clone();
        }
        self.general_subject(kind, rng)
    }

    fn general_subject(&self, kind: ActivityType, rng: &mut impl Rng) -> String {
        match self.profile.activities.subjects.get(&kind) {
            Some(general) if !general.is_empty() => pick(rng, general).clone(),
            _ => kind.as_str().to_string(),
        }
    }
}

/// `date` at a random minute of the business day.
fn business_time(date: Date, rng: &mut impl Rng) -> PrimitiveDateTime {
    let minutes = BUSINESS_START_HOUR * 60 + rng.gen_range(0..BUSINESS_HOURS * 60);
    PrimitiveDateTime::new(date, Time::MIDNIGHT + Duration::minutes(minutes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{AccountGenerator, ContactGenerator, DealGenerator};
    use crate::profiles::ProfileRegistry;
    use rand::{SeedableRng, rngs::StdRng};

    struct Run {
        accounts: Vec<Account>,
        contacts: Vec<Contact>,
        deals: Vec<Deal>,
        output: ActivityOutput,
    }

    fn run(profile: &Profile, count: usize, seed: u64) -> Run {
        let window = DateWindow::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let accounts = AccountGenerator::new(profile, window)
            .unwrap()
            .generate_batch(count, &mut rng);
        let contacts = ContactGenerator::new(profile)
            .unwrap()
            .generate_for_accounts(&accounts, &mut rng);
        let index = ContactIndex::build(&contacts);
        let deals = DealGenerator::new(profile, window)
            .unwrap()
            .generate(&accounts, &index, &mut rng);
        let output = ActivityGenerator::new(profile, window)
            .unwrap()
            .generate(&accounts, &index, &deals, &mut rng);
        Run {
            accounts,
            contacts,
            deals,
            output,
        }
    }

    #[test]
    fn test_activities_inside_deal_window() {
        let registry = ProfileRegistry::builtin();
        let profile = registry.get("b2b-saas").unwrap();
        let run = run(profile, 60, 42);
        let as_of = DateWindow::default().as_of;
        assert!(!run.output.activities.is_empty());

        for activity in &run.output.activities {
            let date = activity.occurred_at.date();
            match activity.deal_id {
                Some(deal_id) => {
                    let deal = &run.deals[deal_id.get() as usize - 1];
                    assert_eq!(activity.account_id, deal.account_id);
                    assert!(date >= deal.created_date && date <= deal.window_end(as_of));
                    assert!(activity.phase.is_some());
                }
                None => {
                    let account = &run.accounts[activity.account_id.get() as usize - 1];
                    assert!(date >= account.created_date && date <= as_of);
                    assert!(activity.phase.is_none());
                }
            }
            let hour = activity.occurred_at.hour();
            assert!((8..19).contains(&hour), "hour {hour}");
            assert_eq!(
                activity.duration_minutes.is_some(),
                activity.activity_type.is_timed()
            );
            if let Some(minutes) = activity.duration_minutes {
                assert_eq!(minutes % 5, 0);
            }
        }
    }

    #[test]
    fn test_ids_and_order() {
        let registry = ProfileRegistry::builtin();
        let profile = registry.get("consultancy").unwrap();
        let run = run(profile, 40, 3);
        for (i, activity) in run.output.activities.iter().enumerate() {
            assert_eq!(activity.activity_id.get() as usize, i + 1);
        }
        assert!(run.output.activities.windows(2).all(|w| {
            (w[0].occurred_at, w[0].account_id) <= (w[1].occurred_at, w[1].account_id)
        }));
    }

    #[test]
    fn test_contacts_belong_to_account() {
        let registry = ProfileRegistry::builtin();
        let profile = registry.get("manufacturer").unwrap();
        let run = run(profile, 40, 17);
        let index = ContactIndex::build(&run.contacts);
        for activity in &run.output.activities {
            let contact = index.get(activity.contact_id).unwrap();
            assert_eq!(contact.account_id, activity.account_id);
        }
    }

    #[test]
    fn test_silent_accounts_have_no_activities() {
        let registry = ProfileRegistry::builtin();
        let profile = registry.get("b2b-saas").unwrap();
        let run = run(profile, 100, 9);
        let with_deals: BTreeSet<AccountId> = run.deals.iter().map(|d| d.account_id).collect();
        let without_deals = run.accounts.len() - with_deals.len();
        assert_eq!(run.output.silent_accounts.len(), without_deals.min(10));
        for account in &run.output.silent_accounts {
            assert!(!with_deals.contains(account));
        }
        for activity in &run.output.activities {
            assert!(!run.output.silent_accounts.contains(&activity.account_id));
        }
        assert!(
            run.output
                .silent_accounts
                .iter()
                .all(|id| run.accounts.iter().any(|a| a.id == *id))
        );
    }

    #[test]
    fn test_self_serve_deals_are_zero_touch() {
        let registry = ProfileRegistry::builtin();
        let profile = registry.get("b2b-saas").unwrap();
        let run = run(profile, 80, 23);
        for deal_id in run.output.activities.iter().filter_map(|a| a.deal_id) {
            let deal = &run.deals[deal_id.get() as usize - 1];
            assert_ne!(deal.pipeline, PipelineKind::SelfServe);
        }
    }

    #[test]
    fn test_open_deals_have_recent_touches() {
        let registry = ProfileRegistry::builtin();
        let profile = registry.get("b2b-saas").unwrap();
        let run = run(profile, 80, 31);
        let window = DateWindow::default();
        let recent_start = window.as_of - Duration::days(14);

        let silent: BTreeSet<AccountId> = run.output.silent_accounts.iter().copied().collect();
        for deal in run
            .deals
            .iter()
            .filter(|d| d.status == DealStatus::Open && d.pipeline != PipelineKind::SelfServe)
            .filter(|d| !silent.contains(&d.account_id))
        {
            let recent = run
                .output
                .activities
                .iter()
                .filter(|a| a.deal_id == Some(deal.deal_id))
                .filter(|a| a.occurred_at.date() >= recent_start.max(deal.created_date))
                .count();
            assert!(recent >= 2, "deal {} has {recent} recent touches", deal.deal_id);
        }
    }

    #[test]
    fn test_open_touch_count() {
        let registry = ProfileRegistry::builtin();
        let profile = registry.get("b2b-saas").unwrap();
        let window = DateWindow::default();
        let generator = ActivityGenerator::new(profile, window).unwrap();
        let run = run(profile, 30, 1);
        let mut deal = run.deals[0].clone();
        deal.status = DealStatus::Open;
        deal.close_date = None;
        deal.segment = crm_records::Segment::MidMarket;

        deal.created_date = window.as_of - Duration::days(3);
        assert_eq!(generator.open_touch_count(&deal), 2);

        deal.created_date = window.as_of - Duration::days(7 * 40);
        assert_eq!(generator.open_touch_count(&deal), 15);
    }

    #[test]
    fn test_phase_subjects_match_phase() {
        let registry = ProfileRegistry::builtin();
        let profile = registry.get("b2b-saas").unwrap();
        let run = run(profile, 40, 77);
        for activity in &run.output.activities {
            let kind = activity.activity_type;
            // Outreach draws from the early phase list
            let phase = activity.phase.unwrap_or(DealPhase::Early);
            let phase_list = profile.activities.phase_subjects_for(phase, kind);
            let general = &profile.activities.subjects[&kind];
            assert!(phase_list.contains(&activity.subject) || general.contains(&activity.subject));
        }
    }

    #[test]
    fn test_only_silent_accounts_lack_activities() {
        let registry = ProfileRegistry::builtin();
        for slug in registry.slugs() {
            let profile = registry.get(slug).unwrap();
            let run = run(profile, 200, 5);
            let active: BTreeSet<AccountId> =
                run.output.activities.iter().map(|a| a.account_id).collect();
            let idle: Vec<AccountId> = run
                .accounts
                .iter()
                .map(|a| a.id)
                .filter(|id| !active.contains(id))
                .collect();
            assert_eq!(idle, run.output.silent_accounts, "{slug}");
        }
    }

    #[test]
    fn test_account_touches_follow_deal_presence() {
        let registry = ProfileRegistry::builtin();
        let profile = registry.get("b2b-saas").unwrap();
        let run = run(profile, 120, 14);
        let touches = &profile.activities.account_touches;
        let with_deals: BTreeSet<AccountId> = run.deals.iter().map(|d| d.account_id).collect();
        let index = ContactIndex::build(&run.contacts);

        let mut per_account: BTreeMap<AccountId, u32> = BTreeMap::new();
        for activity in run.output.activities.iter().filter(|a| a.deal_id.is_none()) {
            *per_account.entry(activity.account_id).or_default() += 1;
            let contact = index.get(activity.contact_id).unwrap();
            assert_eq!(activity.owner, contact.owner);
        }
        for account in &run.accounts {
            if run.output.silent_accounts.contains(&account.id) {
                assert!(!per_account.contains_key(&account.id));
                continue;
            }
            let count = per_account.get(&account.id).copied().unwrap_or(0);
            let band = if with_deals.contains(&account.id) {
                touches.relationship_count
            } else {
                touches.outreach_count
            };
            assert!(band.contains(count), "account {} has {count} touches", account.id);
        }
    }
}
