//! The three-step sign-up wizard, modeled as an explicit state machine so
//! invalid transitions are representable and testable. Form fields are raw
//! strings, as they come out of input boxes; `submit` coerces them into the
//! typed request.

use std::collections::BTreeMap;

use thiserror::Error;

use super::dto::SignupRequest;
use super::password::validate_strength;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    AccountInfo,
    PersonalInfo,
    MedicalInfo,
}

impl WizardStep {
    pub fn index(&self) -> usize {
        match self {
            WizardStep::AccountInfo => 0,
            WizardStep::PersonalInfo => 1,
            WizardStep::MedicalInfo => 2,
        }
    }
}

/// Field name → message, in stable order for rendering.
pub type StepErrors = BTreeMap<&'static str, String>;

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("current step has validation errors")]
    Invalid(StepErrors),
    #[error("already at the final step")]
    AtFinalStep,
    #[error("already at the first step")]
    AtFirstStep,
    #[error("submit is only allowed from the final step")]
    NotAtFinalStep,
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub age: String,
    pub gender: String,
    pub height: String,
    pub weight: String,
    pub sugar_level: String,
    pub activity_level: String,
    pub diabetes: bool,
    pub hypertension: bool,
    pub cholesterol: bool,
}

#[derive(Debug, Default)]
pub struct SignupWizard {
    step_index: usize,
    pub form: SignupForm,
}

const STEPS: [WizardStep; 3] = [
    WizardStep::AccountInfo,
    WizardStep::PersonalInfo,
    WizardStep::MedicalInfo,
];

impl SignupWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        STEPS[self.step_index]
    }

    /// Advance to the next step. Gated by the current step's validation.
    pub fn next(&mut self) -> Result<WizardStep, WizardError> {
        if self.step_index + 1 >= STEPS.len() {
            return Err(WizardError::AtFinalStep);
        }
        let errs = validate_step(self.step(), &self.form);
        if !errs.is_empty() {
            return Err(WizardError::Invalid(errs));
        }
        self.step_index += 1;
        Ok(self.step())
    }

    /// Go back one step. Never gated; entered data is kept.
    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        if self.step_index == 0 {
            return Err(WizardError::AtFirstStep);
        }
        self.step_index -= 1;
        Ok(self.step())
    }

    /// Final submission: only allowed from the last step, and re-validates
    /// every step so a field edited after going back cannot slip through.
    pub fn submit(&self) -> Result<SignupRequest, WizardError> {
        if self.step() != WizardStep::MedicalInfo {
            return Err(WizardError::NotAtFinalStep);
        }
        let mut errs = StepErrors::new();
        for step in STEPS {
            errs.extend(validate_step(step, &self.form));
        }
        if !errs.is_empty() {
            return Err(WizardError::Invalid(errs));
        }

        let form = &self.form;
        Ok(SignupRequest {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_lowercase(),
            password: form.password.clone(),
            confirm_password: form.confirm_password.clone(),
            age: form.age.trim().parse().ok(),
            gender: Some(form.gender.clone()),
            height: form.height.trim().parse().ok(),
            weight: form.weight.trim().parse().ok(),
            sugar_level: form.sugar_level.trim().parse().ok(),
            diabetes: form.diabetes,
            hypertension: form.hypertension,
            cholesterol: form.cholesterol,
            activity_level: Some(form.activity_level.clone()),
        })
    }
}

fn validate_step(step: WizardStep, form: &SignupForm) -> StepErrors {
    let mut errs = StepErrors::new();
    match step {
        WizardStep::AccountInfo => {
            if form.name.trim().is_empty() {
                errs.insert("name", "Name is required".into());
            }
            if form.email.trim().is_empty() {
                errs.insert("email", "Email is required".into());
            }
            if let Err(msg) = validate_strength(&form.password) {
                errs.insert("password", msg.into());
            }
            if form.password != form.confirm_password {
                errs.insert("confirmPassword", "Passwords do not match".into());
            }
        }
        WizardStep::PersonalInfo => {
            require_number(&mut errs, "age", &form.age, "Age is required");
            if form.gender.trim().is_empty() {
                errs.insert("gender", "Gender is required".into());
            }
            require_number(&mut errs, "height", &form.height, "Height is required");
            require_number(&mut errs, "weight", &form.weight, "Weight is required");
        }
        WizardStep::MedicalInfo => {
            require_number(&mut errs, "sugarLevel", &form.sugar_level, "Sugar level is required");
            if form.activity_level.trim().is_empty() {
                errs.insert("activityLevel", "Activity level is required".into());
            }
        }
    }
    errs
}

fn require_number(
    errs: &mut StepErrors,
    field: &'static str,
    value: &str,
    missing_msg: &'static str,
) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errs.insert(field, missing_msg.into());
    } else if trimmed.parse::<f64>().map(|n| n <= 0.0).unwrap_or(true) {
        errs.insert(field, "Must be a positive number".into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SignupForm {
        SignupForm {
            name: "Jordan".into(),
            email: "jordan@example.com".into(),
            password: "hunter42!".into(),
            confirm_password: "hunter42!".into(),
            age: "30".into(),
            gender: "female".into(),
            height: "170".into(),
            weight: "70".into(),
            sugar_level: "90".into(),
            activity_level: "moderate".into(),
            diabetes: false,
            hypertension: true,
            cholesterol: false,
        }
    }

    #[test]
    fn starts_at_account_info() {
        assert_eq!(SignupWizard::new().step(), WizardStep::AccountInfo);
    }

    #[test]
    fn next_is_gated_by_step_validation() {
        let mut wizard = SignupWizard::new();
        match wizard.next() {
            Err(WizardError::Invalid(errs)) => {
                assert!(errs.contains_key("name"));
                assert!(errs.contains_key("email"));
                assert!(errs.contains_key("password"));
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert_eq!(wizard.step(), WizardStep::AccountInfo);
    }

    #[test]
    fn walks_forward_through_all_steps() {
        let mut wizard = SignupWizard::new();
        wizard.form = valid_form();
        assert_eq!(wizard.next().unwrap(), WizardStep::PersonalInfo);
        assert_eq!(wizard.next().unwrap(), WizardStep::MedicalInfo);
        assert!(matches!(wizard.next(), Err(WizardError::AtFinalStep)));
    }

    #[test]
    fn back_is_never_gated_but_stops_at_first_step() {
        let mut wizard = SignupWizard::new();
        wizard.form = valid_form();
        wizard.next().unwrap();
        wizard.form.age = "".into(); // invalidate the current step
        assert_eq!(wizard.back().unwrap(), WizardStep::AccountInfo);
        assert!(matches!(wizard.back(), Err(WizardError::AtFirstStep)));
    }

    #[test]
    fn password_policy_is_enforced_on_step_one() {
        let mut wizard = SignupWizard::new();
        wizard.form = valid_form();
        wizard.form.password = "short1!".into();
        wizard.form.confirm_password = "short1!".into();
        match wizard.next() {
            Err(WizardError::Invalid(errs)) => {
                assert_eq!(errs.len(), 1);
                assert!(errs["password"].contains("at least 8"));
            }
            other => panic!("expected password error, got {other:?}"),
        }
    }

    #[test]
    fn mismatched_passwords_flag_the_confirm_field() {
        let mut wizard = SignupWizard::new();
        wizard.form = valid_form();
        wizard.form.confirm_password = "different1!".into();
        match wizard.next() {
            Err(WizardError::Invalid(errs)) => {
                assert!(errs.contains_key("confirmPassword"));
            }
            other => panic!("expected confirm error, got {other:?}"),
        }
    }

    #[test]
    fn submit_only_from_final_step() {
        let mut wizard = SignupWizard::new();
        wizard.form = valid_form();
        assert!(matches!(wizard.submit(), Err(WizardError::NotAtFinalStep)));
        wizard.next().unwrap();
        wizard.next().unwrap();
        let req = wizard.submit().unwrap();
        assert_eq!(req.email, "jordan@example.com");
        assert_eq!(req.age, Some(30.0));
        assert_eq!(req.height, Some(170.0));
        assert_eq!(req.weight, Some(70.0));
        assert_eq!(req.sugar_level, Some(90.0));
        assert!(req.hypertension);
        assert!(!req.diabetes);
    }

    #[test]
    fn submit_revalidates_fields_edited_after_going_back() {
        let mut wizard = SignupWizard::new();
        wizard.form = valid_form();
        wizard.next().unwrap();
        wizard.next().unwrap();
        wizard.form.email = "".into(); // edited behind the final step
        assert!(matches!(wizard.submit(), Err(WizardError::Invalid(_))));
    }
}
