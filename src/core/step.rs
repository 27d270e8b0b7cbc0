//! Wizard steps and the fields each one owns

use crate::core::field::DraftField;
use std::fmt;

/// One screen of the wizard, numbered 1 to 9
///
/// Steps 1-8 each collect a fixed set of fields; step 9 is the review screen
/// from which the draft is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Step(u8);

impl Step {
    pub const FIRST: Step = Step(1);
    pub const REVIEW: Step = Step(9);

    /// Build a step from its number, `None` outside 1..=9
    pub fn new(number: u8) -> Option<Self> {
        (Self::FIRST.0..=Self::REVIEW.0)
            .contains(&number)
            .then_some(Step(number))
    }

    /// Build a step from a number known to be in range, clamping otherwise
    pub(crate) fn from_number(number: u8) -> Self {
        Step(number.clamp(Self::FIRST.0, Self::REVIEW.0))
    }

    /// All steps in order
    pub fn all() -> impl Iterator<Item = Step> {
        (Self::FIRST.0..=Self::REVIEW.0).map(Step)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// The following step; the review step is the ceiling
    pub fn next(self) -> Self {
        Step((self.0 + 1).min(Self::REVIEW.0))
    }

    /// The preceding step; the first step is the floor
    pub fn previous(self) -> Self {
        Step(self.0.saturating_sub(1).max(Self::FIRST.0))
    }

    pub fn is_review(self) -> bool {
        self == Self::REVIEW
    }

    /// Fields collected on this step
    pub fn fields(self) -> &'static [DraftField] {
        match self.0 {
            1 => &[DraftField::Product],
            2 => &[DraftField::InstallationType],
            3 => &[DraftField::Width, DraftField::Depth],
            4 => &[DraftField::Color],
            5 => &[DraftField::Led],
            6 => &[DraftField::Service],
            7 => &[DraftField::Branch],
            8 => &[DraftField::Name, DraftField::Email, DraftField::Phone],
            _ => &[],
        }
    }

    /// Screen heading
    pub fn title(self) -> &'static str {
        match self.0 {
            1 => "Choose Product",
            2 => "Installation Type",
            3 => "Adjust Dimensions",
            4 => "Choose Color",
            5 => "Choose LED Option",
            6 => "Choose Installation Service",
            7 => "Select Branch",
            8 => "Your Details",
            _ => "Review & Submit",
        }
    }
}

impl Default for Step {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {}: {}", self.0, self.title())
    }
}

/// The earliest step owning any of the given error keys
///
/// Keys may be field paths (`dimensions.width`), step keys (`width`) or
/// document keys (`dimensions`). Unknown keys are ignored; `None` means no
/// key belongs to a step.
pub fn step_for_error_keys<'a, I>(keys: I) -> Option<Step>
where
    I: IntoIterator<Item = &'a str>,
{
    keys.into_iter()
        .flat_map(DraftField::from_error_key)
        .map(|field| field.step())
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_out_of_range() {
        assert_eq!(Step::new(0), None);
        assert_eq!(Step::new(10), None);
        assert_eq!(Step::new(3).map(Step::number), Some(3));
    }

    #[test]
    fn test_next_stops_at_review() {
        assert_eq!(Step::FIRST.next().number(), 2);
        assert_eq!(Step::REVIEW.next(), Step::REVIEW);
    }

    #[test]
    fn test_previous_stops_at_first() {
        assert_eq!(Step::REVIEW.previous().number(), 8);
        assert_eq!(Step::FIRST.previous(), Step::FIRST);
    }

    #[test]
    fn test_every_field_owned_by_exactly_one_step() {
        for field in DraftField::ALL {
            let owners: Vec<Step> = Step::all()
                .filter(|step| step.fields().contains(&field))
                .collect();
            assert_eq!(owners, vec![field.step()]);
        }
        assert!(Step::REVIEW.fields().is_empty());
    }

    #[test]
    fn test_step_for_error_keys_picks_lowest() {
        let step = step_for_error_keys(["phone", "color", "dimensions"]);
        assert_eq!(step.map(Step::number), Some(3));

        let step = step_for_error_keys(["email", "service"]);
        assert_eq!(step.map(Step::number), Some(6));
    }

    #[test]
    fn test_step_for_error_keys_ignores_unknown() {
        assert_eq!(step_for_error_keys(["address"]), None);
        assert_eq!(step_for_error_keys(std::iter::empty()), None);
        assert_eq!(
            step_for_error_keys(["address", "depth"]).map(Step::number),
            Some(3)
        );
    }

    #[test]
    fn test_display_includes_title() {
        assert_eq!(Step::REVIEW.to_string(), "Step 9: Review & Submit");
    }
}
