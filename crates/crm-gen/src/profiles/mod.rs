//! Business profiles.
//!
//! A [`Profile`] is a bundle of tables describing one kind of business: who
//! its customers are, how its pipelines behave, and what its sales touches look
//! like. Generators read these tables and never branch on which profile they
//! were given, so a new business type is a new data bundle, not new code.

mod b2b_saas;
mod consultancy;
mod manufacturer;
mod registry;
mod tables;

pub use registry::ProfileRegistry;
pub use tables::{Band, PhaseTable, Weighted};

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crm_records::{ActivityType, DealPhase, DealStatus, PipelineKind, Segment, SubscriptionType};

use crate::error::ProfileError;

/// Complete description of a business type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Registry key, e.g. `b2b-saas`.
    pub slug: String,
    /// Display name, e.g. `B2B SaaS`.
    pub name: String,
    pub description: String,
    /// Sales rep roster shared by contacts, deals, and activities.
    pub sales_reps: Vec<String>,
    pub accounts: AccountTables,
    pub contacts: ContactTables,
    pub deals: DealTables,
    pub activities: ActivityTables,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountTables {
    pub name_prefixes: Vec<String>,
    pub name_suffixes: Vec<String>,
    /// Suffixes stripped from faker company names ("Inc", "LLC", ...).
    pub legal_suffixes: Vec<String>,
    pub industries: Vec<String>,
    pub employee_tiers: Vec<EmployeeTier>,
    pub revenue: RevenueModel,
    pub website_tlds: Vec<String>,
    /// Templates with an `{industry}` placeholder.
    pub description_templates: Vec<String>,
    pub founded_years: Band<i32>,
}

/// A band of company sizes and how common it is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmployeeTier {
    pub employees: Band<u32>,
    pub weight: u32,
}

/// Revenue as a noisy function of headcount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RevenueModel {
    /// Revenue per employee in USD.
    pub per_employee: Band<u64>,
    /// Sigma of the mean-one log-normal noise factor. Zero disables noise.
    pub noise_sigma: f64,
    pub floor: u64,
    pub ceiling: u64,
}

impl RevenueModel {
    /// Revenue band for a tier: the tier's headcount times the per-employee
    /// range, intersected with the global floor and ceiling.
    pub fn band_for(&self, tier: &EmployeeTier) -> Band<u64> {
        let low = (u64::from(tier.employees.min) * self.per_employee.min).max(self.floor);
        let high = (u64::from(tier.employees.max) * self.per_employee.max).min(self.ceiling);
        Band::new(low.min(high), high)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactTables {
    /// How many contacts an account gets.
    pub per_account: Weighted<u32>,
    pub departments: Weighted<Department>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub name: String,
    pub titles: Vec<String>,
}

/// Headcount thresholds splitting accounts into sales segments.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SegmentRule {
    /// Accounts below this headcount are SMB.
    pub smb_below: u32,
    /// Accounts above this headcount are Enterprise.
    pub enterprise_above: u32,
}

impl SegmentRule {
    pub fn classify(&self, employee_count: u32) -> Segment {
        if employee_count < self.smb_below {
            Segment::Smb
        } else if employee_count <= self.enterprise_above {
            Segment::MidMarket
        } else {
            Segment::Enterprise
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealTables {
    pub segment_rule: SegmentRule,
    /// Annual contract value bands by segment.
    pub acv: BTreeMap<Segment, Band<u64>>,
    pub pipelines: Vec<PipelineDef>,
    /// Chance that an account gets any primary deal.
    pub primary_deal_probability: f64,
    /// How many primary deals such an account gets.
    pub primary_deals_per_account: Weighted<u32>,
    pub renewal: Option<SpawnRule>,
    pub expansion: Option<SpawnRule>,
    pub loss_reasons: Weighted<String>,
    /// Used instead of `loss_reasons` for Enterprise deals when present.
    pub enterprise_loss_reasons: Option<Weighted<String>>,
    /// Deal name with `{company}`, `{yymm}`, `{pipeline}` and `{engagement}` placeholders.
    pub name_template: String,
    pub engagement_types: Vec<String>,
    /// Contract terms for sales-led deals, if the business sells subscriptions.
    pub subscription_terms: Option<Weighted<SubscriptionType>>,
    pub self_serve: Option<SelfServeConfig>,
}

/// One pipeline: its stages, outcome mix, and cycle lengths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineDef {
    pub kind: PipelineKind,
    pub name: String,
    /// Non-terminal stages in pipeline order, weighted by how often open deals sit there.
    pub open_stages: Weighted<String>,
    /// Win probability in percent for each open stage.
    pub open_probabilities: BTreeMap<String, u8>,
    pub won_stage: String,
    pub lost_stage: String,
    pub outcomes: OutcomeWeights,
    pub cycle_days: CycleDays,
}

impl PipelineDef {
    /// Status implied by a stage. The only way a deal's status is decided.
    pub fn status_of(&self, stage: &str) -> DealStatus {
        if stage == self.won_stage {
            DealStatus::Won
        } else if stage == self.lost_stage {
            DealStatus::Lost
        } else {
            DealStatus::Open
        }
    }

    /// Terminal stage for a closed outcome. `None` for `Open`.
    pub fn terminal_stage(&self, status: DealStatus) -> Option<&str> {
        match status {
            DealStatus::Won => Some(&self.won_stage),
            DealStatus::Lost => Some(&self.lost_stage),
            DealStatus::Open => None,
        }
    }

    /// Win probability in percent: 100 when won, 0 when lost, otherwise the
    /// stage's entry in `open_probabilities` (0 for an unknown stage).
    pub fn probability_of(&self, stage: &str) -> u8 {
        match self.status_of(stage) {
            DealStatus::Won => 100,
            DealStatus::Lost => 0,
            DealStatus::Open => self.open_probabilities.get(stage).copied().unwrap_or(0),
        }
    }
}

/// Relative weights of the three deal outcomes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OutcomeWeights {
    pub won: u32,
    pub lost: u32,
    pub open: u32,
}

impl OutcomeWeights {
    pub fn sample(&self, rng: &mut impl rand::Rng) -> DealStatus {
        let (won, lost, open) = (u64::from(self.won), u64::from(self.lost), u64::from(self.open));
        let roll = rng.gen_range(0..won + lost + open);
        if roll < won {
            DealStatus::Won
        } else if roll < won + lost {
            DealStatus::Lost
        } else {
            DealStatus::Open
        }
    }

    /// Draws Won or Lost in their relative proportion, ignoring `open`.
    pub fn sample_closed(&self, rng: &mut impl rand::Rng) -> DealStatus {
        let won = u64::from(self.won);
        if rng.gen_range(0..won + u64::from(self.lost)) < won {
            DealStatus::Won
        } else {
            DealStatus::Lost
        }
    }
}

/// Sales cycle length in days from creation to close.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleDays {
    Uniform(Band<u32>),
    BySegment(BTreeMap<Segment, Band<u32>>),
}

impl CycleDays {
    pub fn for_segment(&self, segment: Segment) -> Option<Band<u32>> {
        match self {
            CycleDays::Uniform(band) => Some(*band),
            CycleDays::BySegment(bands) => bands.get(&segment).copied(),
        }
    }
}

/// How a spawned pipeline follows a won primary deal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnRule {
    pub probability: f64,
    /// Days after the parent's close date that the spawned deal is created.
    pub offset_days: Band<u32>,
    /// Multiplier applied to the parent's amount.
    pub amount_factor: Band<f64>,
}

/// Product-led signups that never involve a sales rep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfServeConfig {
    pub fraction_of_accounts: f64,
    /// Chance a converted signup is promoted into the primary pipeline.
    pub plg_to_sales_probability: f64,
    /// Days after conversion that the promoted deal is created.
    pub promotion_offset_days: Band<u32>,
    pub subscription_split: Weighted<SubscriptionType>,
    pub monthly_amount: Band<u64>,
    pub annual_amount: Band<u64>,
    /// Self-serve deals get no activities.
    pub zero_touch: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityTables {
    /// Channel mix per phase.
    pub phase_mix: PhaseTable<Weighted<ActivityType>>,
    pub count_won: Band<u32>,
    pub count_lost: Band<u32>,
    /// Scales activity counts; segments without an entry use 1.0.
    pub segment_multiplier: BTreeMap<Segment, f64>,
    /// Open deals get one touch per week open, up to this many.
    pub open_weekly_cap: u32,
    pub open_minimum: u32,
    /// Open deals get their first touches within this many days of `as_of`.
    pub recent_activity_days: u32,
    pub subjects: BTreeMap<ActivityType, Vec<String>>,
    pub phase_subjects: PhaseTable<BTreeMap<ActivityType, Vec<String>>>,
    /// Chance of using a phase-specific subject over the general list.
    pub phase_subject_bias: f64,
    /// Body templates with `{first_name}`, `{company}`, `{subject}` and `{rep}` placeholders.
    pub body_templates: BTreeMap<ActivityType, Vec<String>>,
    pub durations: BTreeMap<ActivityType, Band<u32>>,
    /// Chance a touch involves another contact at the account.
    pub stakeholder_rate: f64,
    /// Fraction of all accounts left with no activities at all.
    pub zero_activity_fraction: f64,
    pub account_touches: AccountTouches,
}

/// Touches logged against an account rather than a deal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountTouches {
    /// Check-ins per account that has deals.
    pub relationship_count: Band<u32>,
    pub relationship_mix: Weighted<ActivityType>,
    /// Cold touches per account without deals that is not silent.
    pub outreach_count: Band<u32>,
    pub outreach_mix: Weighted<ActivityType>,
}

impl ActivityTables {
    pub fn multiplier(&self, segment: Segment) -> f64 {
        self.segment_multiplier.get(&segment).copied().unwrap_or(1.0)
    }

    /// Subjects for a channel, preferring the phase list when it has any.
    pub fn phase_subjects_for(&self, phase: DealPhase, kind: ActivityType) -> &[String] {
        self.phase_subjects
            .get(phase)
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl Profile {
    /// Parses and validates a profile from JSON.
    pub fn from_json(raw: &str) -> Result<Self, ProfileError> {
        let profile: Profile = serde_json::from_str(raw)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Reads, parses, and validates a profile file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ProfileError::Invalid {
            profile: path.display().to_string(),
            reason: format!("cannot read file: {e}"),
        })?;
        Self::from_json(&raw)
    }

    pub fn to_json(&self) -> Result<String, ProfileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn pipeline(&self, kind: PipelineKind) -> Option<&PipelineDef> {
        self.deals.pipelines.iter().find(|p| p.kind == kind)
    }

    /// Pipeline of the given kind, or an error naming the missing one.
    pub fn require_pipeline(&self, kind: PipelineKind) -> Result<&PipelineDef, ProfileError> {
        self.pipeline(kind).ok_or_else(|| ProfileError::MissingPipeline {
            profile: self.slug.clone(),
            kind,
        })
    }

    /// Amount band a deal of `kind` in `segment` must fall in.
    ///
    /// Spawned pipelines scale the segment's band by their amount factor.
    pub fn amount_band(&self, kind: PipelineKind, segment: Segment) -> Option<Band<u64>> {
        let base = *self.deals.acv.get(&segment)?;
        let rule = match kind {
            PipelineKind::Primary | PipelineKind::SelfServe => return Some(base),
            PipelineKind::Renewal => self.deals.renewal?,
            PipelineKind::Expansion => self.deals.expansion?,
        };
        Some(Band::new(
            (base.min as f64 * rule.amount_factor.min).floor() as u64,
            (base.max as f64 * rule.amount_factor.max).ceil() as u64,
        ))
    }

    /// Spawn rule for a spawned pipeline kind.
    pub fn spawn_rule(&self, kind: PipelineKind) -> Option<&SpawnRule> {
        match kind {
            PipelineKind::Renewal => self.deals.renewal.as_ref(),
            PipelineKind::Expansion => self.deals.expansion.as_ref(),
            PipelineKind::Primary | PipelineKind::SelfServe => None,
        }
    }

    /// Checks every table the generators rely on.
    pub fn validate(&self) -> Result<(), ProfileError> {
        let check = Checker { profile: &self.slug };
        check.non_empty("sales_reps", &self.sales_reps)?;
        self.validate_accounts(&check)?;
        self.validate_contacts(&check)?;
        self.validate_deals(&check)?;
        self.validate_activities(&check)
    }

    pub(crate) fn validate_accounts(&self, check: &Checker<'_>) -> Result<(), ProfileError> {
        let accounts = &self.accounts;
        check.non_empty("name_prefixes", &accounts.name_prefixes)?;
        check.non_empty("name_suffixes", &accounts.name_suffixes)?;
        check.non_empty("industries", &accounts.industries)?;
        check.non_empty("employee_tiers", &accounts.employee_tiers)?;
        check.non_empty("website_tlds", &accounts.website_tlds)?;
        check.non_empty("description_templates", &accounts.description_templates)?;
        for (i, tier) in accounts.employee_tiers.iter().enumerate() {
            check.band(&format!("employee_tiers[{i}]"), &tier.employees)?;
            if tier.employees.min == 0 {
                return Err(check.invalid(format!("employee_tiers[{i}] allows zero employees")));
            }
        }
        if accounts.employee_tiers.iter().all(|t| t.weight == 0) {
            return Err(check.empty("employee_tiers weights"));
        }
        if accounts.employee_tiers.len() > usize::from(u8::MAX) {
            return Err(check.invalid("more than 255 employee tiers"));
        }
        check.band("revenue.per_employee", &accounts.revenue.per_employee)?;
        check.band(
            "revenue floor/ceiling",
            &Band::new(accounts.revenue.floor, accounts.revenue.ceiling),
        )?;
        if !accounts.revenue.noise_sigma.is_finite() || accounts.revenue.noise_sigma < 0.0 {
            return Err(check.invalid("revenue.noise_sigma must be a non-negative number"));
        }
        check.band("founded_years", &accounts.founded_years)
    }

    pub(crate) fn validate_contacts(&self, check: &Checker<'_>) -> Result<(), ProfileError> {
        check.weighted("contacts.per_account", &self.contacts.per_account)?;
        if self.contacts.per_account.items().any(|&n| n == 0) {
            return Err(check.invalid("contacts.per_account must not allow zero contacts"));
        }
        check.weighted("departments", &self.contacts.departments)?;
        for department in self.contacts.departments.items() {
            check.non_empty(&format!("{} titles", department.name), &department.titles)?;
        }
        Ok(())
    }

    pub(crate) fn validate_deals(&self, check: &Checker<'_>) -> Result<(), ProfileError> {
        let deals = &self.deals;
        check.probability("primary_deal_probability", deals.primary_deal_probability)?;
        check.weighted("primary_deals_per_account", &deals.primary_deals_per_account)?;
        check.weighted("loss_reasons", &deals.loss_reasons)?;
        if let Some(reasons) = &deals.enterprise_loss_reasons {
            check.weighted("enterprise_loss_reasons", reasons)?;
        }
        if deals.name_template.trim().is_empty() {
            return Err(check.empty("name_template"));
        }
        if deals.name_template.contains("{engagement}") {
            check.non_empty("engagement_types", &deals.engagement_types)?;
        }
        if let Some(terms) = &deals.subscription_terms {
            check.weighted("subscription_terms", terms)?;
        }
        if deals.segment_rule.smb_below > deals.segment_rule.enterprise_above + 1 {
            return Err(check.invalid("segment_rule thresholds overlap"));
        }

        for segment in Segment::SALES_LED {
            let band = deals.acv.get(&segment).ok_or_else(|| check.segment("acv", segment))?;
            check.band(&format!("acv {segment}"), band)?;
        }

        for pipeline in &deals.pipelines {
            self.validate_pipeline(check, pipeline)?;
        }
        for (i, pipeline) in deals.pipelines.iter().enumerate() {
            if deals.pipelines[..i].iter().any(|p| p.kind == pipeline.kind) {
                return Err(check.invalid(format!("two {} pipelines", pipeline.kind)));
            }
        }
        self.require_pipeline(PipelineKind::Primary)?;

        for (kind, rule) in [
            (PipelineKind::Renewal, &deals.renewal),
            (PipelineKind::Expansion, &deals.expansion),
        ] {
            let Some(rule) = rule else { continue };
            self.require_pipeline(kind)?;
            check.probability(&format!("{kind} probability"), rule.probability)?;
            check.band(&format!("{kind} offset_days"), &rule.offset_days)?;
            if rule.offset_days.min == 0 {
                return Err(check.invalid(format!("{kind} must start after the parent closes")));
            }
            check.band(&format!("{kind} amount_factor"), &rule.amount_factor)?;
            if rule.amount_factor.min <= 0.0 {
                return Err(check.invalid(format!("{kind} amount_factor must be positive")));
            }
        }

        if let Some(self_serve) = &deals.self_serve {
            self.require_pipeline(PipelineKind::SelfServe)?;
            let band = deals
                .acv
                .get(&Segment::SelfServe)
                .ok_or_else(|| check.segment("acv", Segment::SelfServe))?;
            check.band("acv Self-Serve", band)?;
            check.probability("self_serve.fraction_of_accounts", self_serve.fraction_of_accounts)?;
            check.probability(
                "self_serve.plg_to_sales_probability",
                self_serve.plg_to_sales_probability,
            )?;
            check.band("self_serve.promotion_offset_days", &self_serve.promotion_offset_days)?;
            check.weighted("self_serve.subscription_split", &self_serve.subscription_split)?;
            check.band("self_serve.monthly_amount", &self_serve.monthly_amount)?;
            check.band("self_serve.annual_amount", &self_serve.annual_amount)?;
        }
        Ok(())
    }

    fn validate_pipeline(
        &self,
        check: &Checker<'_>,
        pipeline: &PipelineDef,
    ) -> Result<(), ProfileError> {
        let label = &pipeline.name;
        check.weighted(&format!("{label} open_stages"), &pipeline.open_stages)?;
        if pipeline.won_stage == pipeline.lost_stage {
            return Err(check.invalid(format!("{label} uses one stage for both won and lost")));
        }
        if pipeline
            .open_stages
            .items()
            .any(|s| *s == pipeline.won_stage || *s == pipeline.lost_stage)
        {
            return Err(check.invalid(format!("{label} lists a terminal stage as open")));
        }
        for stage in pipeline.open_stages.items() {
            match pipeline.open_probabilities.get(stage) {
                None => {
                    return Err(check.invalid(format!("{label} has no probability for '{stage}'")));
                }
                Some(&p) if p > 100 => {
                    return Err(check.invalid(format!("{label} probability for '{stage}' exceeds 100")));
                }
                Some(_) => {}
            }
        }
        let outcomes = pipeline.outcomes;
        if u64::from(outcomes.won) + u64::from(outcomes.lost) == 0 {
            return Err(check.empty(&format!("{label} outcomes")));
        }
        let segments: &[Segment] = if pipeline.kind == PipelineKind::SelfServe {
            &[Segment::SelfServe]
        } else {
            &Segment::SALES_LED
        };
        for &segment in segments {
            let band = pipeline
                .cycle_days
                .for_segment(segment)
                .ok_or_else(|| check.segment(&format!("{label} cycle_days"), segment))?;
            check.band(&format!("{label} cycle_days"), &band)?;
        }
        Ok(())
    }

    pub(crate) fn validate_activities(&self, check: &Checker<'_>) -> Result<(), ProfileError> {
        let activities = &self.activities;
        for phase in [DealPhase::Early, DealPhase::Mid, DealPhase::Late] {
            check.weighted(
                &format!("{} phase_mix", phase.as_str()),
                activities.phase_mix.get(phase),
            )?;
        }
        check.band("count_won", &activities.count_won)?;
        check.band("count_lost", &activities.count_lost)?;
        for (segment, multiplier) in &activities.segment_multiplier {
            if !multiplier.is_finite() || *multiplier <= 0.0 {
                return Err(check.invalid(format!("segment_multiplier for {segment} must be positive")));
            }
        }
        for kind in ActivityType::ALL {
            let subjects = activities.subjects.get(&kind).map(Vec::as_slice).unwrap_or(&[]);
            check.non_empty(&format!("{kind} subjects"), subjects)?;
            let bodies = activities.body_templates.get(&kind).map(Vec::as_slice).unwrap_or(&[]);
            check.non_empty(&format!("{kind} body_templates"), bodies)?;
            if kind.is_timed() {
                let band = activities
                    .durations
                    .get(&kind)
                    .ok_or_else(|| check.empty(&format!("{kind} durations")))?;
                check.band(&format!("{kind} durations"), band)?;
            }
        }
        check.probability("phase_subject_bias", activities.phase_subject_bias)?;
        check.probability("stakeholder_rate", activities.stakeholder_rate)?;
        check.probability("zero_activity_fraction", activities.zero_activity_fraction)?;

        let touches = &activities.account_touches;
        check.band("relationship_count", &touches.relationship_count)?;
        check.weighted("relationship_mix", &touches.relationship_mix)?;
        check.band("outreach_count", &touches.outreach_count)?;
        check.weighted("outreach_mix", &touches.outreach_mix)
    }
}

/// Validation helpers carrying the profile name into every error.
pub(crate) struct Checker<'a> {
    pub(crate) profile: &'a str,
}

impl Checker<'_> {
    fn empty(&self, table: &str) -> ProfileError {
        ProfileError::EmptyTable {
            profile: self.profile.to_string(),
            table: table.to_string(),
        }
    }

    fn invalid(&self, reason: impl Into<String>) -> ProfileError {
        ProfileError::Invalid {
            profile: self.profile.to_string(),
            reason: reason.into(),
        }
    }

    fn segment(&self, table: &str, segment: Segment) -> ProfileError {
        ProfileError::MissingSegment {
            profile: self.profile.to_string(),
            table: table.to_string(),
            segment,
        }
    }

    fn non_empty<T>(&self, table: &str, items: &[T]) -> Result<(), ProfileError> {
        if items.is_empty() {
            Err(self.empty(table))
        } else {
            Ok(())
        }
    }

    fn weighted<T>(&self, table: &str, items: &Weighted<T>) -> Result<(), ProfileError> {
        if items.total() == 0 {
            Err(self.empty(table))
        } else {
            Ok(())
        }
    }

    fn band<T: PartialOrd>(&self, field: &str, band: &Band<T>) -> Result<(), ProfileError> {
        if band.min > band.max {
            Err(ProfileError::InvertedRange {
                profile: self.profile.to_string(),
                field: field.to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn probability(&self, field: &str, value: f64) -> Result<(), ProfileError> {
        if (0.0..=1.0).contains(&value) {
            Ok(())
        } else {
            Err(ProfileError::InvalidProbability {
                profile: self.profile.to_string(),
                field: field.to_string(),
                value,
            })
        }
    }
}

/// Body templates shared by the built-in profiles.
pub(crate) fn standard_body_templates() -> BTreeMap<ActivityType, Vec<String>> {
    let entries: [(ActivityType, &[&str]); 5] = [
        (
            ActivityType::Email,
            &[
                "Hi {first_name}, following up on {subject}. Let me know if anything is unclear. - {rep}",
                "Hi {first_name}, sharing notes on {subject} for the {company} team.",
                "{first_name}, as promised, details on {subject} are below. Happy to walk through them.",
            ],
        ),
        (
            ActivityType::Call,
            &[
                "Spoke with {first_name} at {company} about {subject}.",
                "Call with {first_name} re: {subject}. Next steps agreed.",
                "Left voicemail for {first_name}, then connected on {subject}.",
            ],
        ),
        (
            ActivityType::Meeting,
            &[
                "{subject} with {first_name} and the {company} team.",
                "Met {first_name} for {subject}. Attendees aligned on next steps.",
            ],
        ),
        (
            ActivityType::LinkedIn,
            &[
                "{subject} with {first_name} ({company}).",
                "LinkedIn: {subject}, {first_name} responded.",
            ],
        ),
        (
            ActivityType::Note,
            &[
                "{subject}. Account: {company}. Owner: {rep}.",
                "Note on {company}: {subject}.",
            ],
        ),
    ];
    entries
        .into_iter()
        .map(|(kind, templates)| (kind, templates.iter().map(|t| t.to_string()).collect()))
        .collect()
}

pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn weighted_strings(items: &[(&str, u32)]) -> Weighted<String> {
    Weighted::new(items.iter().map(|(s, w)| (s.to_string(), *w)).collect())
}

/// Open-stage win probabilities, in percent.
pub(crate) fn stage_odds(items: &[(&str, u8)]) -> BTreeMap<String, u8> {
    items.iter().map(|(s, p)| (s.to_string(), *p)).collect()
}

pub(crate) fn tier(min: u32, max: u32, weight: u32) -> EmployeeTier {
    EmployeeTier {
        employees: Band::new(min, max),
        weight,
    }
}

pub(crate) fn department(name: &str, titles: &[&str], weight: u32) -> (Department, u32) {
    let department = Department {
        name: name.to_string(),
        titles: strings(titles),
    };
    (department, weight)
}

/// Cycle bands for SMB, Mid-Market, and Enterprise.
pub(crate) fn cycle_by_segment(smb: (u32, u32), mid: (u32, u32), ent: (u32, u32)) -> CycleDays {
    CycleDays::BySegment(BTreeMap::from([
        (Segment::Smb, Band::new(smb.0, smb.1)),
        (Segment::MidMarket, Band::new(mid.0, mid.1)),
        (Segment::Enterprise, Band::new(ent.0, ent.1)),
    ]))
}

/// Account-level touches shared by the built-in profiles.
pub(crate) fn standard_account_touches() -> AccountTouches {
    AccountTouches {
        relationship_count: Band::new(1, 3),
        relationship_mix: channel_mix(35, 20, 20, 15, 10),
        outreach_count: Band::new(1, 3),
        outreach_mix: channel_mix(30, 15, 5, 40, 10),
    }
}

/// Channel weights in Email, Call, Meeting, LinkedIn, Note order.
pub(crate) fn channel_mix(
    email: u32,
    call: u32,
    meeting: u32,
    linkedin: u32,
    note: u32,
) -> Weighted<ActivityType> {
    Weighted::new(vec![
        (ActivityType::Email, email),
        (ActivityType::Call, call),
        (ActivityType::Meeting, meeting),
        (ActivityType::LinkedIn, linkedin),
        (ActivityType::Note, note),
    ])
}

/// Subject lists in Email, Call, Meeting, LinkedIn, Note order.
pub(crate) fn channel_subjects(
    email: &[&str],
    call: &[&str],
    meeting: &[&str],
    linkedin: &[&str],
    note: &[&str],
) -> BTreeMap<ActivityType, Vec<String>> {
    BTreeMap::from([
        (ActivityType::Email, strings(email)),
        (ActivityType::Call, strings(call)),
        (ActivityType::Meeting, strings(meeting)),
        (ActivityType::LinkedIn, strings(linkedin)),
        (ActivityType::Note, strings(note)),
    ])
}
