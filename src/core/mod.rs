//! Core module containing the configuration model, the wizard steps and the
//! shared validation rules

pub mod draft;
pub mod error;
pub mod field;
pub mod query;
pub mod response;
pub mod service;
pub mod step;
pub mod validation;

pub use draft::{
    Branch, Choice, Color, Configuration, ConfigurationDraft, ConfiguredDimensions, Dimensions,
    InstallationType, Led, Measure, Product, StoredConfiguration,
};
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use field::{DraftField, FieldValue};
pub use query::{ConfigurationListing, PAGE_SIZE, PageLinks, PageQuery, Pagination};
pub use response::{SAVED_MESSAGE, SubmissionAccepted, SubmissionRejected};
pub use service::ConfigurationStore;
pub use step::{Step, step_for_error_keys};
pub use validation::{
    FieldErrors, check_field, parse_configuration, validate_document, validate_step,
    validate_steps,
};
