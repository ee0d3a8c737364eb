//! Record types for synthetic CRM datasets.
//!
//! The four record collections form a strict hierarchy:
//! accounts own contacts, deals reference an account and one of its contacts,
//! and activities reference a deal together with its account and a contact.
//! Records are plain data; every cross-record link is a typed id.

pub mod ids;
pub mod models;

pub use ids::{AccountId, ActivityId, ContactId, DealId};
pub use models::{
    Account, Activity, ActivityType, Contact, Deal, DealPhase, DealStatus, PipelineKind, Segment,
    Seniority, SubscriptionType, UsRegion,
};
