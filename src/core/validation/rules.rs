//! The configuration rule table
//!
//! One rule per draft field, evaluated in two scopes:
//!
//! - **step scope**: what the wizard checks before leaving a step. Width and
//!   depth are reported separately under `width` and `depth`.
//! - **document scope**: what the server checks before persisting. Width and
//!   depth collapse into one `dimensions` entry.
//!
//! Both scopes call [`check_field`], so the wizard and the server can never
//! disagree about which values are acceptable. No rule short-circuits: every
//! field is evaluated and all violations are returned together.

use super::field_errors::FieldErrors;
use super::validators::{answered, email_address, one_of, positive_measure, required};
use crate::core::draft::{
    Branch, Color, Configuration, ConfigurationDraft, ConfiguredDimensions, InstallationType, Led,
    Measure, Product,
};
use crate::core::field::DraftField;
use crate::core::step::Step;

const DIMENSIONS_REQUIRED: &str = "Dimensions (width and depth) are required";
const DIMENSIONS_NOT_POSITIVE: &str = "Dimensions (width and depth) must be positive numbers";

/// Check a single field of the draft
pub fn check_field(field: DraftField, draft: &ConfigurationDraft) -> Result<(), String> {
    let label = field.label();
    match field {
        DraftField::Product => one_of::<Product>(label, draft.product.as_deref()).map(drop),
        DraftField::InstallationType => {
            one_of::<InstallationType>(label, draft.installation_type.as_deref()).map(drop)
        }
        DraftField::Width => positive_measure(label, draft.width()).map(drop),
        DraftField::Depth => positive_measure(label, draft.depth()).map(drop),
        DraftField::Color => one_of::<Color>(label, draft.color.as_deref()).map(drop),
        DraftField::Led => one_of::<Led>(label, draft.led.as_deref()).map(drop),
        DraftField::Service => answered(label, draft.service).map(drop),
        DraftField::Branch => one_of::<Branch>(label, draft.branch.as_deref()).map(drop),
        DraftField::Name => required(label, draft.name.as_deref()).map(drop),
        DraftField::Email => email_address(label, draft.email.as_deref()).map(drop),
        DraftField::Phone => required(label, draft.phone.as_deref()).map(drop),
    }
}

/// Errors for exactly the fields owned by `step`
///
/// Pure: the draft is only read. The review step owns no fields and always
/// passes.
pub fn validate_step(step: Step, draft: &ConfigurationDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    collect_step(step, draft, &mut errors);
    errors
}

/// Union of every step's rules, in step order
///
/// This is the wizard's final gate before submitting.
pub fn validate_steps(draft: &ConfigurationDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for step in Step::all() {
        collect_step(step, draft, &mut errors);
    }
    errors
}

/// Whole-document errors, as the server reports them
pub fn validate_document(draft: &ConfigurationDraft) -> FieldErrors {
    parse_configuration(draft).err().unwrap_or_default()
}

/// Validate a draft and, if it is complete, produce the typed configuration
pub fn parse_configuration(draft: &ConfigurationDraft) -> Result<Configuration, FieldErrors> {
    let mut errors = FieldErrors::new();

    let product = keep(&mut errors, DraftField::Product, |label| {
        one_of::<Product>(label, draft.product.as_deref())
    });
    let installation_type = keep(&mut errors, DraftField::InstallationType, |label| {
        one_of::<InstallationType>(label, draft.installation_type.as_deref())
    });
    let dimensions = parse_dimensions(draft, &mut errors);
    let color = keep(&mut errors, DraftField::Color, |label| {
        one_of::<Color>(label, draft.color.as_deref())
    });
    let led = keep(&mut errors, DraftField::Led, |label| {
        one_of::<Led>(label, draft.led.as_deref())
    });
    let service = keep(&mut errors, DraftField::Service, |label| {
        answered(label, draft.service)
    });
    let branch = keep(&mut errors, DraftField::Branch, |label| {
        one_of::<Branch>(label, draft.branch.as_deref())
    });
    let name = keep(&mut errors, DraftField::Name, |label| {
        required(label, draft.name.as_deref())
    });
    let email = keep(&mut errors, DraftField::Email, |label| {
        email_address(label, draft.email.as_deref())
    });
    let phone = keep(&mut errors, DraftField::Phone, |label| {
        required(label, draft.phone.as_deref())
    });

    let (
        Some(product),
        Some(installation_type),
        Some(dimensions),
        Some(color),
        Some(led),
        Some(service),
        Some(branch),
        Some(name),
        Some(email),
        Some(phone),
    ) = (
        product,
        installation_type,
        dimensions,
        color,
        led,
        service,
        branch,
        name,
        email,
        phone,
    )
    else {
        return Err(errors);
    };

    Ok(Configuration {
        product,
        installation_type,
        dimensions,
        color,
        led,
        service,
        branch,
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
    })
}

fn collect_step(step: Step, draft: &ConfigurationDraft, errors: &mut FieldErrors) {
    for field in step.fields() {
        if let Err(message) = check_field(*field, draft) {
            errors.insert(field.step_key(), message);
        }
    }
}

/// Run one field's validator, recording its message under the document key
fn keep<T>(
    errors: &mut FieldErrors,
    field: DraftField,
    validate: impl FnOnce(&'static str) -> Result<T, String>,
) -> Option<T> {
    match validate(field.label()) {
        Ok(value) => Some(value),
        Err(message) => {
            errors.insert(field.document_key(), message);
            None
        }
    }
}

fn parse_dimensions(
    draft: &ConfigurationDraft,
    errors: &mut FieldErrors,
) -> Option<ConfiguredDimensions> {
    let width = positive_measure(DraftField::Width.label(), draft.width());
    let depth = positive_measure(DraftField::Depth.label(), draft.depth());

    match (width, depth) {
        (Ok(width), Ok(depth)) => Some(ConfiguredDimensions {
            width: width.clone(),
            depth: depth.clone(),
        }),
        _ => {
            let missing = [draft.width(), draft.depth()]
                .into_iter()
                .any(|measure| measure.is_none_or(Measure::is_blank));
            let message = if missing {
                DIMENSIONS_REQUIRED
            } else {
                DIMENSIONS_NOT_POSITIVE
            };
            errors.insert(DraftField::Width.document_key(), message);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::draft::Dimensions;

    fn complete_draft() -> ConfigurationDraft {
        ConfigurationDraft {
            product: Some("carport".to_string()),
            installation_type: Some("attached".to_string()),
            dimensions: Some(Dimensions {
                width: Some("300".into()),
                depth: Some("400".into()),
            }),
            color: Some("black".to_string()),
            led: Some("no".to_string()),
            service: Some(false),
            branch: Some("dhaka".to_string()),
            name: Some("A".to_string()),
            email: Some("a@example.com".to_string()),
            phone: Some("123".to_string()),
        }
    }

    fn keys(errors: &FieldErrors) -> Vec<&str> {
        errors.keys().collect()
    }

    /// Remove one field from a complete draft
    fn without(field: DraftField) -> ConfigurationDraft {
        let mut draft = complete_draft();
        match field {
            DraftField::Product => draft.product = None,
            DraftField::InstallationType => draft.installation_type = None,
            DraftField::Width => {
                if let Some(d) = draft.dimensions.as_mut() {
                    d.width = None;
                }
            }
            DraftField::Depth => {
                if let Some(d) = draft.dimensions.as_mut() {
                    d.depth = Some(Measure::from(""));
                }
            }
            DraftField::Color => draft.color = Some(String::new()),
            DraftField::Led => draft.led = None,
            DraftField::Service => draft.service = None,
            DraftField::Branch => draft.branch = None,
            DraftField::Name => draft.name = Some(String::new()),
            DraftField::Email => draft.email = None,
            DraftField::Phone => draft.phone = None,
        }
        draft
    }

    #[test]
    fn test_complete_draft_is_valid_in_every_scope() {
        let draft = complete_draft();
        assert!(validate_document(&draft).is_empty());
        assert!(validate_steps(&draft).is_empty());
        for step in Step::all() {
            assert!(validate_step(step, &draft).is_empty());
        }
    }

    #[test]
    fn test_missing_one_field_reports_only_that_field() {
        for field in DraftField::ALL {
            let draft = without(field);

            let document = validate_document(&draft);
            assert_eq!(keys(&document), vec![field.document_key()], "{:?}", field);

            let step = validate_step(field.step(), &draft);
            assert_eq!(keys(&step), vec![field.step_key()], "{:?}", field);

            let gate = validate_steps(&draft);
            assert_eq!(keys(&gate), vec![field.step_key()], "{:?}", field);
        }
    }

    #[test]
    fn test_service_false_is_valid() {
        let draft = complete_draft();
        assert_eq!(draft.service, Some(false));
        assert!(!validate_document(&draft).contains("service"));
        assert!(validate_step(DraftField::Service.step(), &draft).is_empty());
    }

    #[test]
    fn test_service_unset_is_invalid() {
        let draft = without(DraftField::Service);
        assert_eq!(
            validate_document(&draft).get("service"),
            Some("Service option is required")
        );
    }

    #[test]
    fn test_missing_dimensions_object() {
        let mut draft = complete_draft();
        draft.dimensions = None;

        let document = validate_document(&draft);
        assert_eq!(keys(&document), vec!["dimensions"]);
        assert_eq!(document.get("dimensions"), Some(DIMENSIONS_REQUIRED));

        let step = validate_step(DraftField::Width.step(), &draft);
        assert_eq!(keys(&step), vec!["width", "depth"]);
    }

    #[test]
    fn test_non_positive_dimension() {
        let mut draft = complete_draft();
        draft.dimensions = Some(Dimensions {
            width: Some("-1".into()),
            depth: Some("400".into()),
        });

        assert_eq!(
            validate_document(&draft).get("dimensions"),
            Some(DIMENSIONS_NOT_POSITIVE)
        );
        let step = validate_step(DraftField::Width.step(), &draft);
        assert_eq!(step.get("width"), Some("Width must be a positive number"));
        assert!(!step.contains("depth"));
    }

    #[test]
    fn test_unknown_choice_is_rejected() {
        let mut draft = complete_draft();
        draft.branch = Some("sylhet".to_string());

        let errors = validate_document(&draft);
        assert_eq!(
            errors.get("branch"),
            Some("Branch must be one of: dhaka, chittagong, rajshahi")
        );
    }

    #[test]
    fn test_malformed_email_is_rejected_everywhere() {
        let mut draft = complete_draft();
        draft.email = Some("a@localhost".to_string());

        assert_eq!(
            validate_document(&draft).get("email"),
            Some("Invalid email format")
        );
        assert_eq!(
            validate_step(DraftField::Email.step(), &draft).get("email"),
            Some("Invalid email format")
        );
    }

    #[test]
    fn test_empty_draft_reports_every_field() {
        let draft = ConfigurationDraft::default();

        let document = validate_document(&draft);
        assert_eq!(
            keys(&document),
            vec![
                "product",
                "installationType",
                "dimensions",
                "color",
                "led",
                "service",
                "branch",
                "name",
                "email",
                "phone"
            ]
        );

        let gate = validate_steps(&draft);
        assert_eq!(gate.len(), 11);
        assert_eq!(
            document.get("installationType"),
            Some("Installation Type is required")
        );
    }

    #[test]
    fn test_validate_step_is_idempotent() {
        let draft = without(DraftField::Phone);
        let before = draft.clone();

        let first = validate_step(Step::new(8).unwrap(), &draft);
        let second = validate_step(Step::new(8).unwrap(), &draft);

        assert_eq!(first, second);
        assert_eq!(draft, before);
    }

    #[test]
    fn test_review_step_always_passes() {
        assert!(validate_step(Step::REVIEW, &ConfigurationDraft::default()).is_empty());
    }

    #[test]
    fn test_parse_configuration_types_values() {
        let configuration = parse_configuration(&complete_draft()).unwrap();
        assert_eq!(configuration.product, Product::Carport);
        assert_eq!(configuration.branch, Branch::Dhaka);
        assert!(!configuration.service);
        assert_eq!(configuration.dimensions.width, Measure::from("300"));
        assert_eq!(configuration.to_draft(), complete_draft());
    }
}
