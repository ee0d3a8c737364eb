//! Synthetic CRM dataset generation.
//!
//! This crate generates linked accounts, contacts, deals, and activity timelines
//! for a chosen business profile. Every stage draws from one seeded random
//! source, so the same profile, seed, account count, and window always produce
//! the same dataset.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use crm_gen::prelude::*;
//!
//! let dataset = DatasetBuilder::new()
//!     .with_profile("b2b-saas")
//!     .with_accounts(500)
//!     .with_seed(42)
//!     .build()?;
//!
//! DatasetSummary::from_dataset(&dataset).log();
//! CsvExporter::new(&dataset).write_to_dir("out")?;
//! ```

pub mod builders;
pub mod config;
pub mod error;
pub mod export;
pub mod generators;
pub mod integrity;
pub mod profiles;
pub mod sources;
pub mod summary;

// Re-export record types from crm-records
pub use crm_records::{
    Account, AccountId, Activity, ActivityId, ActivityType, Contact, ContactId, Deal, DealId,
    DealPhase, DealStatus, PipelineKind, Segment, Seniority, SubscriptionType, UsRegion,
};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{Dataset, DatasetBuilder, DatasetMetrics};
    pub use crate::config::{DateWindow, GenerationConfig};
    pub use crate::error::{ConfigError, ExportError, GenerationError, ProfileError};
    pub use crate::export::CsvExporter;
    pub use crate::generators::{
        AccountGenerator, ActivityGenerator, ContactGenerator, ContactIndex, DealGenerator,
    };
    pub use crate::profiles::{Profile, ProfileRegistry};
    pub use crate::summary::DatasetSummary;
    pub use crate::{Account, Activity, Contact, Deal, DealStatus, PipelineKind, Segment};
}
