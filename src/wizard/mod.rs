//! The configuration wizard
//!
//! [`Wizard`] owns one draft and walks it through nine steps. Leaving a step
//! forward requires that step's fields to be valid; going back never does.
//! Step 9 is the review screen, from which the draft is submitted.
//!
//! Submission is split in two so a UI can run the network call elsewhere:
//! [`Wizard::begin_submit`] runs the local gate and marks the wizard busy,
//! [`Wizard::finish_submit`] applies the outcome and clears the flag.
//! [`Wizard::submit`] runs both around a [`Submitter`].
//!
//! # Example
//!
//! ```rust,ignore
//! let mut wizard = Wizard::new();
//! wizard.update_field("product", "carport")?;
//! assert!(wizard.advance());
//! // ... steps 2-8 ...
//! let status = wizard.submit(&client).await;
//! ```

mod review;

pub use review::{Review, ReviewLine};

use crate::client::{SubmissionOutcome, Submitter};
use crate::core::{
    ConfigurationDraft, DraftField, FieldErrors, FieldValue, Measure, Step, step_for_error_keys,
    validate_step, validate_steps,
};

/// Misuse of [`Wizard::update_field`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("field `{field}` takes a {expected} value, got {found}")]
    WrongKind {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

/// Message shown after a submit attempt until dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Failure(String),
}

impl Banner {
    pub fn message(&self) -> &str {
        match self {
            Banner::Success(message) | Banner::Failure(message) => message,
        }
    }
}

/// Result of [`Wizard::begin_submit`]
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStart {
    /// Gate passed; send this draft and report back through `finish_submit`
    Ready(ConfigurationDraft),

    /// Local validation failed; errors are set and the step moved
    Blocked,

    /// A submission is already running; nothing changed
    InFlight,
}

/// What a call to [`Wizard::submit`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Accepted,
    Rejected,
    Failed,
    Blocked,
    InFlight,
}

/// Wizard state: current step, draft, field errors and the in-flight flag
#[derive(Debug, Clone, Default)]
pub struct Wizard {
    step: Step,
    draft: ConfigurationDraft,
    field_errors: FieldErrors,
    submission_in_flight: bool,
    banner: Option<Banner>,
}

impl Wizard {
    /// An empty draft on step 1
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &ConfigurationDraft {
        &self.draft
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn submission_in_flight(&self) -> bool {
        self.submission_in_flight
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Summary of the draft for the review step
    pub fn review(&self) -> Review {
        Review::of(&self.draft)
    }

    /// Set one field of the draft
    ///
    /// `name` is a field path such as `email` or `dimensions.width`. Any
    /// error recorded under exactly that name is cleared. The value is not
    /// validated.
    pub fn update_field(
        &mut self,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), WizardError> {
        let field =
            DraftField::from_path(name).ok_or_else(|| WizardError::UnknownField(name.to_string()))?;
        let value = value.into();

        match (field, value) {
            (DraftField::Service, FieldValue::Flag(flag)) => self.draft.service = Some(flag),
            (field, FieldValue::Text(text)) if !field.is_flag() => self.set_text(field, text),
            (field, value) => {
                return Err(WizardError::WrongKind {
                    field: field.path(),
                    expected: if field.is_flag() { "boolean" } else { "text" },
                    found: value.kind(),
                });
            }
        }

        self.field_errors.remove(name);
        Ok(())
    }

    fn set_text(&mut self, field: DraftField, text: String) {
        let draft = &mut self.draft;
        match field {
            DraftField::Product => draft.product = Some(text),
            DraftField::InstallationType => draft.installation_type = Some(text),
            DraftField::Width => {
                draft.dimensions.get_or_insert_default().width = Some(Measure::Text(text))
            }
            DraftField::Depth => {
                draft.dimensions.get_or_insert_default().depth = Some(Measure::Text(text))
            }
            DraftField::Color => draft.color = Some(text),
            DraftField::Led => draft.led = Some(text),
            DraftField::Branch => draft.branch = Some(text),
            DraftField::Name => draft.name = Some(text),
            DraftField::Email => draft.email = Some(text),
            DraftField::Phone => draft.phone = Some(text),
            DraftField::Service => {}
        }
    }

    /// Move forward if the current step is valid
    ///
    /// On failure the step's errors replace `field_errors` and the step is
    /// unchanged. On success the step's own errors are cleared and the
    /// pointer moves on, stopping at the review step. Returns whether the
    /// step passed its gate; always `false` while a submission is running.
    pub fn advance(&mut self) -> bool {
        if self.submission_in_flight {
            return false;
        }

        let errors = validate_step(self.step, &self.draft);
        if !errors.is_empty() {
            tracing::debug!(step = self.step.number(), errors = %errors, "step gate failed");
            self.field_errors = errors;
            return false;
        }

        for field in self.step.fields() {
            self.field_errors.remove(field.step_key());
            self.field_errors.remove(field.document_key());
        }
        self.step = self.step.next();
        true
    }

    /// Move back one step, stopping at step 1
    ///
    /// Never validates and leaves errors in place. Ignored while a
    /// submission is running.
    pub fn retreat(&mut self) {
        if self.submission_in_flight {
            return;
        }
        self.step = self.step.previous();
    }

    /// Run the final local gate and mark the wizard busy
    pub fn begin_submit(&mut self) -> SubmitStart {
        if self.submission_in_flight {
            return SubmitStart::InFlight;
        }

        let errors = validate_steps(&self.draft);
        if !errors.is_empty() {
            self.relocate_to(&errors);
            self.field_errors = errors;
            return SubmitStart::Blocked;
        }

        self.banner = None;
        self.submission_in_flight = true;
        SubmitStart::Ready(self.draft.clone())
    }

    /// Apply the outcome of a submission started with `begin_submit`
    ///
    /// Returns `None` and leaves the wizard untouched when no submission is
    /// in flight.
    pub fn finish_submit(&mut self, outcome: SubmissionOutcome) -> Option<SubmitStatus> {
        if !self.submission_in_flight {
            tracing::debug!("ignoring submission outcome with nothing in flight");
            return None;
        }
        Some(self.apply_outcome(outcome))
    }

    fn apply_outcome(&mut self, outcome: SubmissionOutcome) -> SubmitStatus {
        self.submission_in_flight = false;

        match outcome {
            SubmissionOutcome::Accepted { message, record } => {
                tracing::info!(id = %record.id, "configuration submitted");
                self.draft = ConfigurationDraft::default();
                self.step = Step::FIRST;
                self.field_errors.clear();
                self.banner = Some(Banner::Success(message));
                SubmitStatus::Accepted
            }
            SubmissionOutcome::Rejected { field_errors } => {
                self.relocate_to(&field_errors);
                self.field_errors = field_errors;
                SubmitStatus::Rejected
            }
            SubmissionOutcome::Failed { message } => {
                self.banner = Some(Banner::Failure(message));
                SubmitStatus::Failed
            }
        }
    }

    /// Submit the draft through `submitter`
    ///
    /// The submitter is not contacted when the local gate fails or when a
    /// submission is already running.
    pub async fn submit<S>(&mut self, submitter: &S) -> SubmitStatus
    where
        S: Submitter + ?Sized,
    {
        match self.begin_submit() {
            SubmitStart::Ready(draft) => {
                let outcome = submitter.submit_draft(&draft).await;
                self.apply_outcome(outcome)
            }
            SubmitStart::Blocked => SubmitStatus::Blocked,
            SubmitStart::InFlight => SubmitStatus::InFlight,
        }
    }

    /// Jump to the earliest step owning one of the error keys
    fn relocate_to(&mut self, errors: &FieldErrors) {
        if let Some(step) = step_for_error_keys(errors.keys()) {
            self.step = step;
        }
    }
}
