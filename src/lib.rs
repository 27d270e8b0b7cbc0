//! # PrestoConfig
//!
//! A multi-step configuration-request wizard and the API it submits to.
//!
//! ## Features
//!
//! - **Nine-Step Wizard**: Step-gated draft editing with a review screen
//! - **One Rule Table**: The wizard's step gate and the server's check share
//!   every field rule, so they never disagree
//! - **Typed Configurations**: A complete draft parses into enums and
//!   validated values before it is stored
//! - **Structured Rejections**: Field errors travel end to end and send the
//!   user back to the first step that needs fixing
//! - **Branch Notification**: Every stored request is announced to its
//!   branch; delivery failures never fail the submission
//! - **Paginated Listing**: Insertion-ordered pages of stored requests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use prestoconfig::prelude::*;
//!
//! // Serve the API
//! ServerBuilder::new()
//!     .with_store(InMemoryConfigurationStore::new())
//!     .serve("127.0.0.1:5000".parse()?)
//!     .await?;
//!
//! // Drive a wizard against it
//! let client = HttpSubmissionClient::new("http://127.0.0.1:5000", Duration::from_secs(10))?;
//! let mut wizard = Wizard::new();
//! wizard.update_field("product", "carport")?;
//! wizard.advance();
//! // ...
//! wizard.submit(&client).await;
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod notify;
pub mod server;
pub mod storage;
pub mod wizard;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Model & Validation ===
    pub use crate::core::{
        ApiError, Branch, Choice, Color, Configuration, ConfigurationDraft, ConfigurationListing,
        ConfigurationStore, Dimensions, DraftField, FieldErrors, FieldValue, InstallationType,
        Led, Measure, PAGE_SIZE, Pagination, Product, Step, StoredConfiguration,
        parse_configuration, validate_document, validate_step,
    };

    // === Wizard & Client ===
    pub use crate::client::{
        GENERIC_RETRY_MESSAGE, HttpSubmissionClient, SubmissionOutcome, Submitter,
    };
    pub use crate::wizard::{Banner, SubmitStatus, Wizard, WizardError};

    // === Notification ===
    pub use crate::notify::{BranchEmail, LogMailer, Mailer, NotifyError, RecordingMailer};

    // === Storage ===
    pub use crate::storage::InMemoryConfigurationStore;

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{RestExposure, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use std::time::Duration;
}
