use std::fmt;

use serde::{Deserialize, Serialize};
use time::{Date, PrimitiveDateTime};

use crate::ids::{AccountId, ActivityId, ContactId, DealId};

/// Size classification of an account or deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Segment {
    #[serde(rename = "SMB")]
    Smb,
    #[serde(rename = "Mid-Market")]
    MidMarket,
    Enterprise,
    #[serde(rename = "Self-Serve")]
    SelfServe,
}

impl Segment {
    /// Segments reachable by sales-led deals.
    pub const SALES_LED: [Segment; 3] = [Segment::Smb, Segment::MidMarket, Segment::Enterprise];

    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Smb => "SMB",
            Segment::MidMarket => "Mid-Market",
            Segment::Enterprise => "Enterprise",
            Segment::SelfServe => "Self-Serve",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role a pipeline plays in the deal lifecycle.
///
/// Profiles give each pipeline its own display name ("New Business",
/// "Reorders", ...); the kind is what generators reason about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineKind {
    /// First sale to an account.
    Primary,
    /// Spawned roughly a year after a won primary deal.
    Renewal,
    /// Spawned a few months after a won primary deal.
    Expansion,
    /// Product-led signups with no sales rep.
    SelfServe,
}

impl PipelineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineKind::Primary => "primary",
            PipelineKind::Renewal => "renewal",
            PipelineKind::Expansion => "expansion",
            PipelineKind::SelfServe => "self_serve",
        }
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome state of a deal. Always derived from the deal's stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DealStatus {
    Won,
    Lost,
    Open,
}

impl DealStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, DealStatus::Open)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DealStatus::Won => "Won",
            DealStatus::Lost => "Lost",
            DealStatus::Open => "Open",
        }
    }
}

impl fmt::Display for DealStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SubscriptionType {
    Monthly,
    Annual,
}

impl SubscriptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionType::Monthly => "Monthly",
            SubscriptionType::Annual => "Annual",
        }
    }
}

/// Channel of a sales touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActivityType {
    Email,
    Call,
    Meeting,
    #[serde(rename = "LinkedIn")]
    LinkedIn,
    Note,
}

impl ActivityType {
    pub const ALL: [ActivityType; 5] = [
        ActivityType::Email,
        ActivityType::Call,
        ActivityType::Meeting,
        ActivityType::LinkedIn,
        ActivityType::Note,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Email => "Email",
            ActivityType::Call => "Call",
            ActivityType::Meeting => "Meeting",
            ActivityType::LinkedIn => "LinkedIn",
            ActivityType::Note => "Note",
        }
    }

    /// Whether activities of this type carry a duration.
    pub fn is_timed(&self) -> bool {
        matches!(self, ActivityType::Call | ActivityType::Meeting)
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of an activity within its deal's lifetime, by elapsed thirds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealPhase {
    Early,
    Mid,
    Late,
}

impl DealPhase {
    /// Classifies an elapsed fraction (0.0 at creation, 1.0 at close).
    pub fn from_progress(progress: f64) -> Self {
        if progress < 1.0 / 3.0 {
            DealPhase::Early
        } else if progress < 2.0 / 3.0 {
            DealPhase::Mid
        } else {
            DealPhase::Late
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DealPhase::Early => "early",
            DealPhase::Mid => "mid",
            DealPhase::Late => "late",
        }
    }
}

/// Seniority level inferred from a job title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Seniority {
    #[serde(rename = "C-Level")]
    CLevel,
    #[serde(rename = "VP")]
    VicePresident,
    Director,
    Manager,
    #[serde(rename = "Individual Contributor")]
    IndividualContributor,
}

impl Seniority {
    /// Infers seniority from common title conventions.
    pub fn from_title(title: &str) -> Self {
        let lower = title.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        let has = |w: &str| words.contains(&w);

        let c_suite = ["ceo", "cfo", "cto", "coo", "cmo", "cro"]
            .iter()
            .any(|&w| has(w));
        let top = ["president", "founder", "owner"].iter().any(|&w| has(w))
            && !lower.starts_with("vice");
        let named_partner = has("partner") && !lower.starts_with("client");

        if lower.starts_with("chief ") || c_suite || top || named_partner {
            Seniority::CLevel
        } else if has("vp") || lower.starts_with("vice president") {
            Seniority::VicePresident
        } else if has("director") || has("head") || lower.starts_with("managing") {
            Seniority::Director
        } else if has("manager") || lower.starts_with("general") || has("lead") {
            Seniority::Manager
        } else {
            Seniority::IndividualContributor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Seniority::CLevel => "C-Level",
            Seniority::VicePresident => "VP",
            Seniority::Director => "Director",
            Seniority::Manager => "Manager",
            Seniority::IndividualContributor => "Individual Contributor",
        }
    }
}

/// US census-style region, derived from a state code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UsRegion {
    Northeast,
    Southeast,
    Midwest,
    Southwest,
    West,
}

impl UsRegion {
    /// Maps a two-letter state code to its region.
    pub fn for_state(state: &str) -> Option<Self> {
        let region = match state {
            "CT" | "DE" | "MA" | "MD" | "ME" | "NH" | "NJ" | "NY" | "PA" | "RI" | "VT" | "DC" => {
                UsRegion::Northeast
            }
            "AL" | "AR" | "FL" | "GA" | "KY" | "LA" | "MS" | "NC" | "SC" | "TN" | "VA" | "WV" => {
                UsRegion::Southeast
            }
            "IA" | "IL" | "IN" | "KS" | "MI" | "MN" | "MO" | "ND" | "NE" | "OH" | "SD" | "WI" => {
                UsRegion::Midwest
            }
            "AZ" | "NM" | "OK" | "TX" => UsRegion::Southwest,
            "AK" | "CA" | "CO" | "HI" | "ID" | "MT" | "NV" | "OR" | "UT" | "WA" | "WY" => {
                UsRegion::West
            }
            _ => return None,
        };
        Some(region)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UsRegion::Northeast => "Northeast",
            UsRegion::Southeast => "Southeast",
            UsRegion::Midwest => "Midwest",
            UsRegion::Southwest => "Southwest",
            UsRegion::West => "West",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub company_name: String,
    pub industry: String,
    pub employee_count: u32,
    /// 1-based index into the profile's employee tier table.
    pub employee_tier: u8,
    /// Annual revenue in USD.
    pub annual_revenue: u64,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub region: UsRegion,
    pub founded_year: i32,
    pub website: String,
    pub description: String,
    /// When the account entered the CRM. Precedes all of its deals.
    pub created_date: Date,
}

impl Account {
    /// Email domain derived from the website (`https://www.acme.io` -> `acme.io`).
    pub fn email_domain(&self) -> &str {
        let mut domain = self.website.as_str();
        for prefix in ["https://", "http://"] {
            if let Some(rest) = domain.strip_prefix(prefix) {
                domain = rest;
                break;
            }
        }
        domain.strip_prefix("www.").unwrap_or(domain)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub contact_id: ContactId,
    pub account_id: AccountId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub title: String,
    pub seniority: Seniority,
    pub department: String,
    /// Sales rep who owns the relationship.
    pub owner: String,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub deal_id: DealId,
    pub deal_name: String,
    pub account_id: AccountId,
    pub contact_id: ContactId,
    pub pipeline: PipelineKind,
    /// Profile-specific pipeline label.
    pub pipeline_name: String,
    pub segment: Segment,
    pub stage: String,
    pub status: DealStatus,
    /// Annual contract value in USD.
    pub amount: u64,
    /// Win probability in percent, from the stage's position in the pipeline.
    pub probability: u8,
    pub created_date: Date,
    /// Set only for Won and Lost deals.
    pub close_date: Option<Date>,
    /// Sales rep; self-serve deals have none.
    pub owner: Option<String>,
    pub loss_reason: Option<String>,
    /// Deal this one was spawned or promoted from.
    pub parent_deal_id: Option<DealId>,
    pub subscription_type: Option<SubscriptionType>,
}

impl Deal {
    /// End of the deal's activity window: the close date, or `as_of` while open.
    pub fn window_end(&self, as_of: Date) -> Date {
        self.close_date.unwrap_or(as_of)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub activity_id: ActivityId,
    /// Deal the touch belongs to; account-level touches have none.
    pub deal_id: Option<DealId>,
    pub account_id: AccountId,
    pub contact_id: ContactId,
    pub activity_type: ActivityType,
    /// Phase of the deal at the time of the touch.
    pub phase: Option<DealPhase>,
    pub occurred_at: PrimitiveDateTime,
    pub subject: String,
    pub body: String,
    pub duration_minutes: Option<u32>,
    pub owner: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_thirds() {
        assert_eq!(DealPhase::from_progress(0.0), DealPhase::Early);
        assert_eq!(DealPhase::from_progress(0.33), DealPhase::Early);
        assert_eq!(DealPhase::from_progress(0.34), DealPhase::Mid);
        assert_eq!(DealPhase::from_progress(0.66), DealPhase::Mid);
        assert_eq!(DealPhase::from_progress(0.67), DealPhase::Late);
        assert_eq!(DealPhase::from_progress(1.0), DealPhase::Late);
    }

    #[test]
    fn test_seniority_from_title() {
        assert_eq!(Seniority::from_title("CEO"), Seniority::CLevel);
        assert_eq!(Seniority::from_title("Chief Revenue Officer"), Seniority::CLevel);
        assert_eq!(Seniority::from_title("Co-Founder"), Seniority::CLevel);
        assert_eq!(Seniority::from_title("Managing Partner"), Seniority::CLevel);
        assert_eq!(Seniority::from_title("VP of Sales"), Seniority::VicePresident);
        assert_eq!(Seniority::from_title("Director of Product"), Seniority::Director);
        assert_eq!(Seniority::from_title("Head of Customer Success"), Seniority::Director);
        assert_eq!(Seniority::from_title("Sales Manager"), Seniority::Manager);
        assert_ne!(Seniority::from_title("Client Partner"), Seniority::CLevel);
        assert_eq!(Seniority::from_title("Buyer"), Seniority::IndividualContributor);
        assert_eq!(
            Seniority::from_title("Senior Software Engineer"),
            Seniority::IndividualContributor
        );
    }

    #[test]
    fn test_region_lookup() {
        assert_eq!(UsRegion::for_state("CA"), Some(UsRegion::West));
        assert_eq!(UsRegion::for_state("TX"), Some(UsRegion::Southwest));
        assert_eq!(UsRegion::for_state("NY"), Some(UsRegion::Northeast));
        assert_eq!(UsRegion::for_state("IL"), Some(UsRegion::Midwest));
        assert_eq!(UsRegion::for_state("GA"), Some(UsRegion::Southeast));
        assert_eq!(UsRegion::for_state("ZZ"), None);
    }

    #[test]
    fn test_email_domain() {
        let account = Account {
            id: AccountId(1),
            company_name: "CloudStack".into(),
            industry: "Developer Tools".into(),
            employee_count: 80,
            employee_tier: 1,
            annual_revenue: 8_000_000,
            street_address: "1 Main St".into(),
            city: "Austin".into(),
            state: "TX".into(),
            zip_code: "78701".into(),
            country: "United States".into(),
            region: UsRegion::Southwest,
            founded_year: 2015,
            website: "https://www.cloudstack.io".into(),
            description: String::new(),
            created_date: time::macros::date!(2023 - 01 - 01),
        };
        assert_eq!(account.email_domain(), "cloudstack.io");
    }
}
