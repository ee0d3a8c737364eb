//! Deal generation across the primary, self-serve and spawned pipelines.
//!
//! Deals are produced in three passes:
//!
//! 1. primary deals for each account,
//! 2. self-serve signups, some promoted into the primary pipeline,
//! 3. renewal and expansion deals spawned from every won primary deal.
//!
//! Passes append drafts that refer to their parents by position. The drafts
//! are then sorted by creation date and given their final ids.

use rand::Rng;
use time::{Date, Duration};

use crm_records::{
    Account, Contact, ContactId, Deal, DealId, DealStatus, PipelineKind, Segment,
    SubscriptionType,
};

use super::{ContactIndex, pick, random_date};
use crate::config::DateWindow;
use crate::error::ProfileError;
use crate::profiles::{Checker, PipelineDef, Profile, SelfServeConfig};

/// Primary deal amounts are rounded to this many dollars.
const PRIMARY_ROUNDING: u64 = 500;
/// Spawned deal amounts are rounded to this many dollars.
const SPAWNED_ROUNDING: u64 = 100;

/// Where a deal sits in its pipeline and on the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Placement {
    stage: String,
    created: Date,
    close: Option<Date>,
}

/// A deal before final ids are assigned.
#[derive(Debug)]
struct Draft {
    deal: Deal,
    /// Index of the account in the input slice.
    account: usize,
    /// Index of the parent draft.
    parent: Option<usize>,
}

/// Everything needed to turn a placement into a deal.
struct DealSpec<'p> {
    pipeline: &'p PipelineDef,
    segment: Segment,
    placement: Placement,
    amount: u64,
    contact_id: ContactId,
    owner: Option<String>,
    subscription_type: Option<SubscriptionType>,
}

/// Generates deals for a set of accounts.
pub struct DealGenerator<'a> {
    profile: &'a Profile,
    window: DateWindow,
    primary: &'a PipelineDef,
}

impl<'a> DealGenerator<'a> {
    /// Creates a generator, rejecting a profile whose deal tables are unusable.
    pub fn new(profile: &'a Profile, window: DateWindow) -> Result<Self, ProfileError> {
        profile.validate_deals(&Checker {
            profile: &profile.slug,
        })?;
        if profile.sales_reps.is_empty() {
            return Err(ProfileError::EmptyTable {
                profile: profile.slug.clone(),
                table: "sales_reps".to_string(),
            });
        }
        let primary = profile.require_pipeline(PipelineKind::Primary)?;
        Ok(Self {
            profile,
            window,
            primary,
        })
    }

    /// Generates every deal for `accounts`, sorted by creation date with ids from 1.
    pub fn generate(
        &self,
        accounts: &[Account],
        contacts: &ContactIndex<'_>,
        rng: &mut impl Rng,
    ) -> Vec<Deal> {
        let mut drafts = Vec::new();

        for (index, account) in accounts.iter().enumerate() {
            if contacts.for_account(account.id).is_empty() {
                tracing::warn!(account = %account.id, "Account has no contacts, skipping deals");
                continue;
            }
            self.primary_deals(index, account, contacts, &mut drafts, rng);
        }
        let primary_count = drafts.len();

        if let Some(config) = &self.profile.deals.self_serve {
            for (index, account) in accounts.iter().enumerate() {
                if contacts.for_account(account.id).is_empty() {
                    continue;
                }
                self.self_serve_deals(config, index, account, contacts, &mut drafts, rng);
            }
        }
        let self_serve_count = drafts.len() - primary_count;

        let won_primary: Vec<usize> = drafts
            .iter()
            .enumerate()
            .filter(|(_, d)| d.deal.pipeline == PipelineKind::Primary && d.deal.status == DealStatus::Won)
            .map(|(i, _)| i)
            .collect();
        for parent in won_primary {
            for kind in [PipelineKind::Renewal, PipelineKind::Expansion] {
                self.spawn(parent, kind, accounts, contacts, &mut drafts, rng);
            }
        }

        tracing::debug!(
            primary = primary_count,
            self_serve = self_serve_count,
            spawned = drafts.len() - primary_count - self_serve_count,
            "Generated deals"
        );
        finalize(drafts)
    }

    fn primary_deals(
        &self,
        index: usize,
        account: &Account,
        contacts: &ContactIndex<'_>,
        drafts: &mut Vec<Draft>,
        rng: &mut impl Rng,
    ) {
        let deals = &self.profile.deals;
        if rng.r#gen::<f64>() >= deals.primary_deal_probability {
            return;
        }
        let count = *deals.primary_deals_per_account.sample(rng);
        let segment = deals.segment_rule.classify(account.employee_count);
        let floor = self.window.start.max(account.created_date);

        for _ in 0..count {
            let Some(contact) = contacts.random_for_account(account.id, rng) else {
                return;
            };
            let placement = self.place_from_floor(self.primary, segment, floor, rng);
            let deal = self.sales_led(account, self.primary, segment, placement, contact, rng);
            drafts.push(Draft {
                deal,
                account: index,
                parent: None,
            });
        }
    }

    fn self_serve_deals(
        &self,
        config: &SelfServeConfig,
        index: usize,
        account: &Account,
        contacts: &ContactIndex<'_>,
        drafts: &mut Vec<Draft>,
        rng: &mut impl Rng,
    ) {
        if rng.r#gen::<f64>() >= config.fraction_of_accounts {
            return;
        }
        // Validation guarantees the pipeline exists whenever self-serve is configured
        let Some(pipeline) = self.profile.pipeline(PipelineKind::SelfServe) else {
            return;
        };
        let Some(contact) = contacts.random_for_account(account.id, rng) else {
            return;
        };

        let floor = self.window.start.max(account.created_date);
        let placement = self.place_from_floor(pipeline, Segment::SelfServe, floor, rng);

        let term = *config.subscription_split.sample(rng);
        let raw = match term {
            SubscriptionType::Monthly => config.monthly_amount.sample(rng) * 12,
            SubscriptionType::Annual => config.annual_amount.sample(rng),
        };
        let amount = match self.profile.amount_band(PipelineKind::SelfServe, Segment::SelfServe) {
            Some(band) => band.clamp(raw),
            None => raw,
        };

        let deal = self.build(
            account,
            DealSpec {
                pipeline,
                segment: Segment::SelfServe,
                placement,
                amount,
                contact_id: contact.contact_id,
                owner: None,
                subscription_type: Some(term),
            },
            rng,
        );
        let converted = deal.status == DealStatus::Won;
        let conversion = deal.close_date;
        let parent = drafts.len();
        drafts.push(Draft {
            deal,
            account: index,
            parent: None,
        });

        if !converted || rng.r#gen::<f64>() >= config.plg_to_sales_probability {
            return;
        }
        let Some(conversion) = conversion else {
            return;
        };
        let offset = Duration::days(i64::from(config.promotion_offset_days.sample(rng)));
        let created = conversion + offset;
        if created > self.window.as_of {
            return;
        }

        let segment = self.profile.deals.segment_rule.classify(account.employee_count);
        let placement = self.place_at(self.primary, segment, created, rng);
        let deal = self.sales_led(account, self.primary, segment, placement, contact, rng);
        drafts.push(Draft {
            deal,
            account: index,
            parent: Some(parent),
        });
    }

    fn spawn(
        &self,
        parent: usize,
        kind: PipelineKind,
        accounts: &[Account],
        contacts: &ContactIndex<'_>,
        drafts: &mut Vec<Draft>,
        rng: &mut impl Rng,
    ) {
        let (Some(rule), Some(pipeline)) = (self.profile.spawn_rule(kind), self.profile.pipeline(kind))
        else {
            return;
        };
        if rng.r#gen::<f64>() >= rule.probability {
            return;
        }

        let parent_draft = &drafts[parent];
        let account_index = parent_draft.account;
        let account = &accounts[account_index];
        let segment = parent_draft.deal.segment;
        let parent_amount = parent_draft.deal.amount;
        let Some(parent_close) = parent_draft.deal.close_date else {
            return;
        };

        let created = parent_close + Duration::days(i64::from(rule.offset_days.sample(rng)));
        if created > self.window.as_of {
            return;
        }
        let Some(contact) = contacts.random_for_account(account.id, rng) else {
            return;
        };

        let placement = self.place_at(pipeline, segment, created, rng);
        let factor = rule.amount_factor.sample(rng);
        let raw = round_to(parent_amount as f64 * factor, SPAWNED_ROUNDING);
        let amount = match self.profile.amount_band(kind, segment) {
            Some(band) => band.clamp(raw),
            None => raw,
        };

        let owner = pick(rng, &self.profile.sales_reps).clone();
        let subscription_type = self.subscription_term(rng);
        let deal = self.build(
            account,
            DealSpec {
                pipeline,
                segment,
                placement,
                amount,
                contact_id: contact.contact_id,
                owner: Some(owner),
                subscription_type,
            },
            rng,
        );
        drafts.push(Draft {
            deal,
            account: account_index,
            parent: Some(parent),
        });
    }

    /// A rep-owned deal with an amount from the segment's contract value band.
    fn sales_led(
        &self,
        account: &Account,
        pipeline: &PipelineDef,
        segment: Segment,
        placement: Placement,
        contact: &Contact,
        rng: &mut impl Rng,
    ) -> Deal {
        let amount = match self.profile.amount_band(pipeline.kind, segment) {
            Some(band) => band.clamp(round_to(band.sample(rng) as f64, PRIMARY_ROUNDING)),
            None => 0,
        };
        let owner = pick(rng, &self.profile.sales_reps).clone();
        let subscription_type = self.subscription_term(rng);
        self.build(
            account,
            DealSpec {
                pipeline,
                segment,
                placement,
                amount,
                contact_id: contact.contact_id,
                owner: Some(owner),
                subscription_type,
            },
            rng,
        )
    }

    fn subscription_term(&self, rng: &mut impl Rng) -> Option<SubscriptionType> {
        self.profile
            .deals
            .subscription_terms
            .as_ref()
            .map(|terms| *terms.sample(rng))
    }

    fn build(&self, account: &Account, spec: DealSpec<'_>, rng: &mut impl Rng) -> Deal {
        let DealSpec {
            pipeline,
            segment,
            placement,
            amount,
            contact_id,
            owner,
            subscription_type,
        } = spec;

        let status = pipeline.status_of(&placement.stage);
        let loss_reason = (status == DealStatus::Lost && pipeline.kind != PipelineKind::SelfServe)
            .then(|| self.loss_reason(segment, rng));

        Deal {
            deal_id: DealId(0),
            deal_name: self.deal_name(account, pipeline, placement.created, rng),
            account_id: account.id,
            contact_id,
            pipeline: pipeline.kind,
            pipeline_name: pipeline.name.clone(),
            segment,
            probability: pipeline.probability_of(&placement.stage),
            stage: placement.stage,
            status,
            amount,
            created_date: placement.created,
            close_date: placement.close,
            owner,
            loss_reason,
            parent_deal_id: None,
            subscription_type,
        }
    }

    fn loss_reason(&self, segment: Segment, rng: &mut impl Rng) -> String {
        let deals = &self.profile.deals;
        let table = match (&deals.enterprise_loss_reasons, segment) {
            (Some(enterprise), Segment::Enterprise) => enterprise,
            _ => &deals.loss_reasons,
        };
        table.sample(rng).clone()
    }

    fn deal_name(
        &self,
        account: &Account,
        pipeline: &PipelineDef,
        created: Date,
        rng: &mut impl Rng,
    ) -> String {
        let template = &self.profile.deals.name_template;
        let yymm = format!("{:02}{:02}", created.year() % 100, u8::from(created.month()));
        let mut name = template
            .replace("{company}", &account.company_name)
            .replace("{yymm}", &yymm)
            .replace("{pipeline}", &pipeline.name);
        if name.contains("{engagement}") && !self.profile.deals.engagement_types.is_empty() {
            let engagement = pick(rng, &self.profile.deals.engagement_types);
            name = name.replace("{engagement}", engagement);
        }
        if pipeline.kind != PipelineKind::Primary && !template.contains("{pipeline}") {
            name = format!("{name} ({})", pipeline.name);
        }
        name
    }

    /// Places a deal created no earlier than `floor`.
    ///
    /// A closed outcome whose cycle cannot fit between `floor` and `as_of`
    /// becomes an open deal in the active window.
    fn place_from_floor(
        &self,
        pipeline: &PipelineDef,
        segment: Segment,
        floor: Date,
        rng: &mut impl Rng,
    ) -> Placement {
        let outcome = pipeline.outcomes.sample(rng);
        if let Some(stage) = pipeline.terminal_stage(outcome)
            && let Some(cycle) = pipeline.cycle_days.for_segment(segment)
        {
            let cycle = Duration::days(i64::from(cycle.sample(rng)));
            let latest = self.window.as_of - cycle;
            if latest >= floor {
                let created = random_date(rng, floor, latest);
                return Placement {
                    stage: stage.to_string(),
                    created,
                    close: Some(created + cycle),
                };
            }
        }
        let created = random_date(rng, floor.max(self.window.active_since), self.window.as_of);
        Placement {
            stage: pipeline.open_stages.sample(rng).clone(),
            created,
            close: None,
        }
    }

    /// Places a deal on a fixed creation date.
    ///
    /// A stale open draw is re-rolled between won and lost; a close that would
    /// land after `as_of` leaves the deal open.
    fn place_at(
        &self,
        pipeline: &PipelineDef,
        segment: Segment,
        created: Date,
        rng: &mut impl Rng,
    ) -> Placement {
        let mut outcome = pipeline.outcomes.sample(rng);
        if outcome == DealStatus::Open && created < self.window.active_since {
            outcome = pipeline.outcomes.sample_closed(rng);
        }
        if let Some(stage) = pipeline.terminal_stage(outcome)
            && let Some(cycle) = pipeline.cycle_days.for_segment(segment)
        {
            let close = created + Duration::days(i64::from(cycle.sample(rng)));
            if close <= self.window.as_of {
                return Placement {
                    stage: stage.to_string(),
                    created,
                    close: Some(close),
                };
            }
        }
        Placement {
            stage: pipeline.open_stages.sample(rng).clone(),
            created,
            close: None,
        }
    }
}

fn round_to(value: f64, step: u64) -> u64 {
    ((value / step as f64).round() as u64) * step
}

/// Sorts drafts by `(created_date, account_id)`, assigns ids from 1 and
/// rewrites parent positions as ids.
fn finalize(drafts: Vec<Draft>) -> Vec<Deal> {
    let mut order: Vec<usize> = (0..drafts.len()).collect();
    order.sort_by_key(|&i| (drafts[i].deal.created_date, drafts[i].deal.account_id));

    let mut ids = vec![DealId(0); drafts.len()];
    for (position, &draft) in order.iter().enumerate() {
        ids[draft] = DealId::from_index(position);
    }

    let mut deals: Vec<Deal> = drafts
        .into_iter()
        .zip(&ids)
        .map(|(draft, &id)| {
            let mut deal = draft.deal;
            deal.deal_id = id;
            deal.parent_deal_id = draft.parent.map(|p| ids[p]);
            deal
        })
        .collect();
    deals.sort_by_key(|d| d.deal_id);
    deals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{AccountGenerator, ContactGenerator};
    use crate::profiles::{ProfileRegistry, Weighted};
    use crm_records::Contact;
    use rand::{SeedableRng, rngs::StdRng};

    struct Fixture {
        accounts: Vec<Account>,
        contacts: Vec<Contact>,
    }

    fn fixture(profile: &Profile, count: usize, rng: &mut StdRng) -> Fixture {
        let window = DateWindow::default();
        let accounts = AccountGenerator::new(profile, window)
            .unwrap()
            .generate_batch(count, rng);
        let contacts = ContactGenerator::new(profile)
            .unwrap()
            .generate_for_accounts(&accounts, rng);
        Fixture { accounts, contacts }
    }

    fn deals_for(profile: &Profile, count: usize, seed: u64) -> (Fixture, Vec<Deal>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let fixture = fixture(profile, count, &mut rng);
        let index = ContactIndex::build(&fixture.contacts);
        let deals = DealGenerator::new(profile, DateWindow::default())
            .unwrap()
            .generate(&fixture.accounts, &index, &mut rng);
        (fixture, deals)
    }

    #[test]
    fn test_status_follows_stage() {
        let registry = ProfileRegistry::builtin();
        for profile in registry.iter() {
            let (_, deals) = deals_for(profile, 80, 42);
            assert!(!deals.is_empty());
            for deal in &deals {
                let pipeline = profile.pipeline(deal.pipeline).unwrap();
                assert_eq!(deal.status, pipeline.status_of(&deal.stage));
                assert_eq!(deal.close_date.is_some(), deal.status.is_terminal());
                if let Some(close) = deal.close_date {
                    assert!(close >= deal.created_date);
                    assert!(close <= DateWindow::default().as_of);
                }
                assert!(deal.created_date <= DateWindow::default().as_of);
            }
        }
    }

    #[test]
    fn test_ids_sorted_and_parents_resolve() {
        let registry = ProfileRegistry::builtin();
        let profile = registry.get("b2b-saas").unwrap();
        let (_, deals) = deals_for(profile, 100, 7);

        for (i, deal) in deals.iter().enumerate() {
            assert_eq!(deal.deal_id.get() as usize, i + 1);
        }
        assert!(deals.windows(2).all(|w| {
            (w[0].created_date, w[0].account_id) <= (w[1].created_date, w[1].account_id)
        }));

        let mut spawned = 0;
        for deal in deals.iter().filter(|d| d.parent_deal_id.is_some()) {
            let parent = &deals[deal.parent_deal_id.unwrap().get() as usize - 1];
            assert_eq!(parent.account_id, deal.account_id);
            match deal.pipeline {
                PipelineKind::Renewal | PipelineKind::Expansion => {
                    spawned += 1;
                    assert_eq!(parent.pipeline, PipelineKind::Primary);
                    assert_eq!(parent.status, DealStatus::Won);
                    let rule = profile.spawn_rule(deal.pipeline).unwrap();
                    let offset = (deal.created_date - parent.close_date.unwrap()).whole_days();
                    assert!(offset > 0);
                    assert!(rule.offset_days.contains(offset as u32));
                }
                PipelineKind::Primary => {
                    assert_eq!(parent.pipeline, PipelineKind::SelfServe);
                    assert_eq!(parent.status, DealStatus::Won);
                }
                PipelineKind::SelfServe => panic!("self-serve deals have no parent"),
            }
        }
        assert!(spawned > 0);
    }

    #[test]
    fn test_amounts_within_bands() {
        let registry = ProfileRegistry::builtin();
        for profile in registry.iter() {
            let (_, deals) = deals_for(profile, 80, 99);
            for deal in &deals {
                let band = profile.amount_band(deal.pipeline, deal.segment).unwrap();
                assert!(
                    band.contains(deal.amount),
                    "{} {} amount {} outside {:?}",
                    profile.slug,
                    deal.pipeline,
                    deal.amount,
                    band
                );
            }
        }
    }

    #[test]
    fn test_self_serve_deals_have_no_owner() {
        let registry = ProfileRegistry::builtin();
        let profile = registry.get("b2b-saas").unwrap();
        let (fixture, deals) = deals_for(profile, 120, 5);
        let index = ContactIndex::build(&fixture.contacts);

        let self_serve: Vec<&Deal> = deals
            .iter()
            .filter(|d| d.pipeline == PipelineKind::SelfServe)
            .collect();
        assert!(!self_serve.is_empty());
        for deal in self_serve {
            assert_eq!(deal.segment, Segment::SelfServe);
            assert!(deal.owner.is_none());
            assert!(deal.loss_reason.is_none());
            assert!(deal.subscription_type.is_some());
        }
        for deal in &deals {
            let contact = index.get(deal.contact_id).unwrap();
            assert_eq!(contact.account_id, deal.account_id);
            if deal.pipeline != PipelineKind::SelfServe {
                assert!(deal.owner.is_some());
            }
        }
    }

    #[test]
    fn test_loss_reason_only_when_lost() {
        let registry = ProfileRegistry::builtin();
        let profile = registry.get("manufacturer").unwrap();
        let (_, deals) = deals_for(profile, 80, 13);
        for deal in &deals {
            assert_eq!(deal.loss_reason.is_some(), deal.status == DealStatus::Lost);
            assert!(deal.subscription_type.is_none());
            assert!(deal.deal_name.starts_with("PO-"));
        }
    }

    #[test]
    fn test_open_primary_deals_are_recent() {
        let registry = ProfileRegistry::builtin();
        let profile = registry.get("consultancy").unwrap();
        let window = DateWindow::default();
        let (_, deals) = deals_for(profile, 100, 21);
        for deal in deals
            .iter()
            .filter(|d| d.pipeline == PipelineKind::Primary && d.parent_deal_id.is_none())
            .filter(|d| d.status == DealStatus::Open)
        {
            assert!(deal.created_date >= window.active_since);
        }
    }

    #[test]
    fn test_single_primary_deal_per_account() {
        let registry = ProfileRegistry::builtin();
        let mut profile = registry.get("manufacturer").unwrap().clone();
        profile.deals.primary_deal_probability = 1.0;
        profile.deals.primary_deals_per_account = Weighted::new(vec![(1, 100)]);
        profile.deals.renewal = None;
        profile.deals.expansion = None;
        let (fixture, deals) = deals_for(&profile, 30, 2);
        assert_eq!(deals.len(), fixture.accounts.len());
    }

    #[test]
    fn test_no_accounts_no_deals() {
        let registry = ProfileRegistry::builtin();
        let profile = registry.get("b2b-saas").unwrap();
        let (_, deals) = deals_for(profile, 0, 1);
        assert!(deals.is_empty());
    }

    #[test]
    fn test_finalize_remaps_parents() {
        let registry = ProfileRegistry::builtin();
        let profile = registry.get("b2b-saas").unwrap();
        let (_, mut deals) = deals_for(profile, 20, 4);
        deals.truncate(2);
        let mut later = deals[0].clone();
        later.created_date = deals[0].created_date + Duration::days(400);
        let mut earlier = deals[1].clone();
        earlier.created_date = deals[0].created_date;

        let drafts = vec![
            Draft {
                deal: later,
                account: 0,
                parent: Some(1),
            },
            Draft {
                deal: earlier,
                account: 0,
                parent: None,
            },
        ];
        let finalized = finalize(drafts);
        assert_eq!(finalized[0].parent_deal_id, None);
        assert_eq!(finalized[1].parent_deal_id, Some(DealId(1)));
    }
}
