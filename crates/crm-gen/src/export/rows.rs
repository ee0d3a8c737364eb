//! Flat CSV row shapes. Field order is column order.

use serde::Serialize;
use time::PrimitiveDateTime;

use crm_records::{Account, Activity, Contact, Deal};

/// A serializable row with a fixed header.
///
/// `HEADER` lists the field names in declaration order.
pub trait CsvRow: Serialize {
    const HEADER: &'static [&'static str];
}

#[derive(Debug, Serialize)]
pub struct AccountRow<'a> {
    pub id: u32,
    pub company_name: &'a str,
    pub industry: &'a str,
    pub employee_count: u32,
    pub employee_tier: u8,
    pub annual_revenue: u64,
    pub street_address: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub zip_code: &'a str,
    pub country: &'a str,
    pub region: &'static str,
    pub founded_year: i32,
    pub website: &'a str,
    pub description: &'a str,
    pub created_date: String,
}

impl CsvRow for AccountRow<'_> {
    const HEADER: &'static [&'static str] = &[
        "id",
        "company_name",
        "industry",
        "employee_count",
        "employee_tier",
        "annual_revenue",
        "street_address",
        "city",
        "state",
        "zip_code",
        "country",
        "region",
        "founded_year",
        "website",
        "description",
        "created_date",
    ];
}

impl<'a> From<&'a Account> for AccountRow<'a> {
    fn from(account: &'a Account) -> Self {
        Self {
            id: account.id.get(),
            company_name: &account.company_name,
            industry: &account.industry,
            employee_count: account.employee_count,
            employee_tier: account.employee_tier,
            annual_revenue: account.annual_revenue,
            street_address: &account.street_address,
            city: &account.city,
            state: &account.state,
            zip_code: &account.zip_code,
            country: &account.country,
            region: account.region.as_str(),
            founded_year: account.founded_year,
            website: &account.website,
            description: &account.description,
            created_date: account.created_date.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContactRow<'a> {
    pub contact_id: u32,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub title: &'a str,
    pub seniority: &'static str,
    pub department: &'a str,
    pub account_id: u32,
    pub contact_owner: &'a str,
}

impl CsvRow for ContactRow<'_> {
    const HEADER: &'static [&'static str] = &[
        "contact_id",
        "first_name",
        "last_name",
        "email",
        "phone",
        "title",
        "seniority",
        "department",
        "account_id",
        "contact_owner",
    ];
}

impl<'a> From<&'a Contact> for ContactRow<'a> {
    fn from(contact: &'a Contact) -> Self {
        Self {
            contact_id: contact.contact_id.get(),
            first_name: &contact.first_name,
            last_name: &contact.last_name,
            email: &contact.email,
            phone: &contact.phone,
            title: &contact.title,
            seniority: contact.seniority.as_str(),
            department: &contact.department,
            account_id: contact.account_id.get(),
            contact_owner: &contact.owner,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DealRow<'a> {
    pub deal_id: u32,
    pub deal_name: &'a str,
    pub account_id: u32,
    pub contact_id: u32,
    pub pipeline: &'a str,
    pub pipeline_type: &'static str,
    pub segment: &'static str,
    pub stage: &'a str,
    pub deal_status: &'static str,
    pub amount: u64,
    pub probability: u8,
    pub created_date: String,
    pub close_date: Option<String>,
    pub deal_owner: Option<&'a str>,
    pub loss_reason: Option<&'a str>,
    pub parent_deal_id: Option<u32>,
    pub subscription_type: Option<&'static str>,
}

impl CsvRow for DealRow<'_> {
    const HEADER: &'static [&'static str] = &[
        "deal_id",
        "deal_name",
        "account_id",
        "contact_id",
        "pipeline",
        "pipeline_type",
        "segment",
        "stage",
        "deal_status",
        "amount",
        "probability",
        "created_date",
        "close_date",
        "deal_owner",
        "loss_reason",
        "parent_deal_id",
        "subscription_type",
    ];
}

impl<'a> From<&'a Deal> for DealRow<'a> {
    fn from(deal: &'a Deal) -> Self {
        Self {
            deal_id: deal.deal_id.get(),
            deal_name: &deal.deal_name,
            account_id: deal.account_id.get(),
            contact_id: deal.contact_id.get(),
            pipeline: &deal.pipeline_name,
            pipeline_type: deal.pipeline.as_str(),
            segment: deal.segment.as_str(),
            stage: &deal.stage,
            deal_status: deal.status.as_str(),
            amount: deal.amount,
            probability: deal.probability,
            created_date: deal.created_date.to_string(),
            close_date: deal.close_date.map(|d| d.to_string()),
            deal_owner: deal.owner.as_deref(),
            loss_reason: deal.loss_reason.as_deref(),
            parent_deal_id: deal.parent_deal_id.map(|id| id.get()),
            subscription_type: deal.subscription_type.map(|s| s.as_str()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ActivityRow<'a> {
    pub activity_id: u32,
    pub activity_type: &'static str,
    pub subject: &'a str,
    pub body: &'a str,
    pub activity_date: String,
    /// Empty for account-level touches.
    pub phase: Option<&'static str>,
    pub account_id: u32,
    pub contact_id: u32,
    pub deal_id: Option<u32>,
    pub duration_minutes: Option<u32>,
    pub activity_owner: &'a str,
}

impl CsvRow for ActivityRow<'_> {
    const HEADER: &'static [&'static str] = &[
        "activity_id",
        "activity_type",
        "subject",
        "body",
        "activity_date",
        "phase",
        "account_id",
        "contact_id",
        "deal_id",
        "duration_minutes",
        "activity_owner",
    ];
}

impl<'a> From<&'a Activity> for ActivityRow<'a> {
    fn from(activity: &'a Activity) -> Self {
        Self {
            activity_id: activity.activity_id.get(),
            activity_type: activity.activity_type.as_str(),
            subject: &activity.subject,
            body: &activity.body,
            activity_date: timestamp(activity.occurred_at),
            phase: activity.phase.map(|p| p.as_str()),
            account_id: activity.account_id.get(),
            contact_id: activity.contact_id.get(),
            deal_id: activity.deal_id.map(|id| id.get()),
            duration_minutes: activity.duration_minutes,
            activity_owner: &activity.owner,
        }
    }
}

/// `YYYY-MM-DD HH:MM:SS`.
pub fn timestamp(at: PrimitiveDateTime) -> String {
    format!(
        "{} {:02}:{:02}:{:02}",
        at.date(),
        at.hour(),
        at.minute(),
        at.second()
    )
}
