use club_types::{ManagerForm, ValidationError};

/// The five wizard screens, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Details,
    ClubSelection,
    Appearance,
    Experience,
    Confirmation,
}

impl WizardStep {
    pub fn index(&self) -> u8 {
        match self {
            WizardStep::Details => 1,
            WizardStep::ClubSelection => 2,
            WizardStep::Appearance => 3,
            WizardStep::Experience => 4,
            WizardStep::Confirmation => 5,
        }
    }

    fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Details => Some(WizardStep::ClubSelection),
            WizardStep::ClubSelection => Some(WizardStep::Appearance),
            WizardStep::Appearance => Some(WizardStep::Experience),
            WizardStep::Experience => Some(WizardStep::Confirmation),
            WizardStep::Confirmation => None,
        }
    }

    fn previous(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Details => None,
            WizardStep::ClubSelection => Some(WizardStep::Details),
            WizardStep::Appearance => Some(WizardStep::ClubSelection),
            WizardStep::Experience => Some(WizardStep::Appearance),
            WizardStep::Confirmation => Some(WizardStep::Experience),
        }
    }
}

/// Strictly linear manager creation flow. Navigation and submission are
/// locked while the creation call is in flight so repeated clicks cannot
/// produce duplicate saves.
#[derive(Debug)]
pub struct ManagerCreationWizard {
    step: WizardStep,
    pub form: ManagerForm,
    submitting: bool,
    error: Option<String>,
}

impl Default for ManagerCreationWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl ManagerCreationWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Details,
            form: ManagerForm::default(),
            submitting: false,
            error: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn validate_current_step(&self) -> Result<(), ValidationError> {
        match self.step {
            WizardStep::Details => {
                if self.form.first_name.trim().is_empty() {
                    return Err(ValidationError::FirstNameRequired);
                }
                if self.form.last_name.trim().is_empty() {
                    return Err(ValidationError::LastNameRequired);
                }
                Ok(())
            }
            WizardStep::ClubSelection => {
                if self.form.selected_club.is_none() && !self.form.unemployed {
                    return Err(ValidationError::ClubOrUnemployedRequired);
                }
                Ok(())
            }
            // Appearance and experience fields are optional or defaulted.
            _ => Ok(()),
        }
    }

    /// Advances to the next step if the current one validates. The step
    /// index is left unchanged on rejection.
    pub fn advance(&mut self) -> Result<WizardStep, ValidationError> {
        if self.submitting {
            return Ok(self.step);
        }
        self.validate_current_step()?;
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    /// Steps backwards. Allowed everywhere except the first step and
    /// while a submission is in flight.
    pub fn back(&mut self) -> WizardStep {
        if !self.submitting {
            if let Some(previous) = self.step.previous() {
                self.step = previous;
            }
        }
        self.step
    }

    /// Picking a club clears the unemployed flag.
    pub fn select_club(&mut self, club: &str) {
        self.form.selected_club = Some(club.to_string());
        self.form.unemployed = false;
    }

    /// Starting unemployed clears any club pick.
    pub fn set_unemployed(&mut self) {
        self.form.unemployed = true;
        self.form.selected_club = None;
    }

    /// Claims the single submission slot. Returns the form to persist, or
    /// None when not on the final step or a submission is already running.
    pub fn begin_submit(&mut self) -> Option<ManagerForm> {
        if self.step != WizardStep::Confirmation || self.submitting {
            return None;
        }
        self.submitting = true;
        self.error = None;
        Some(self.form.clone())
    }

    /// Records a failed creation. The wizard stays on the final step with
    /// the form intact so the user can retry.
    pub fn submit_failed(&mut self, message: String) {
        self.submitting = false;
        self.error = Some(message);
    }

    pub fn submit_succeeded(&mut self) {
        self.submitting = false;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wizard_on_step_two() -> ManagerCreationWizard {
        let mut wizard = ManagerCreationWizard::new();
        wizard.form.first_name = "Alex".to_string();
        wizard.form.last_name = "Ferguson".to_string();
        wizard.advance().unwrap();
        wizard
    }

    fn wizard_on_confirmation() -> ManagerCreationWizard {
        let mut wizard = wizard_on_step_two();
        wizard.select_club("Aston Villa");
        wizard.advance().unwrap();
        wizard.advance().unwrap();
        wizard.advance().unwrap();
        assert_eq!(wizard.step(), WizardStep::Confirmation);
        wizard
    }

    #[test]
    fn test_details_step_requires_names() {
        let mut wizard = ManagerCreationWizard::new();
        assert_eq!(wizard.advance(), Err(ValidationError::FirstNameRequired));
        assert_eq!(wizard.step(), WizardStep::Details);

        wizard.form.first_name = "Alex".to_string();
        assert_eq!(wizard.advance(), Err(ValidationError::LastNameRequired));
        assert_eq!(wizard.step(), WizardStep::Details);

        wizard.form.last_name = "Ferguson".to_string();
        assert_eq!(wizard.advance(), Ok(WizardStep::ClubSelection));
    }

    #[test]
    fn test_whitespace_names_rejected() {
        let mut wizard = ManagerCreationWizard::new();
        wizard.form.first_name = "   ".to_string();
        wizard.form.last_name = "Ferguson".to_string();
        assert_eq!(wizard.advance(), Err(ValidationError::FirstNameRequired));
    }

    #[test]
    fn test_club_step_requires_club_or_unemployed() {
        let mut wizard = wizard_on_step_two();
        assert_eq!(
            wizard.advance(),
            Err(ValidationError::ClubOrUnemployedRequired)
        );
        assert_eq!(wizard.step(), WizardStep::ClubSelection);

        wizard.set_unemployed();
        assert_eq!(wizard.advance(), Ok(WizardStep::Appearance));
    }

    #[test]
    fn test_club_and_unemployed_mutually_exclusive() {
        let mut wizard = wizard_on_step_two();

        wizard.select_club("Aston Villa");
        assert!(!wizard.form.unemployed);
        assert_eq!(wizard.form.selected_club.as_deref(), Some("Aston Villa"));

        wizard.set_unemployed();
        assert!(wizard.form.unemployed);
        assert_eq!(wizard.form.selected_club, None);

        wizard.select_club("Leeds United");
        assert!(!wizard.form.unemployed);
        assert_eq!(wizard.form.selected_club.as_deref(), Some("Leeds United"));
    }

    #[test]
    fn test_back_allowed_except_on_first_step() {
        let mut wizard = ManagerCreationWizard::new();
        assert_eq!(wizard.back(), WizardStep::Details);

        let mut wizard = wizard_on_step_two();
        assert_eq!(wizard.back(), WizardStep::Details);
    }

    #[test]
    fn test_later_steps_have_no_blocking_validation() {
        let mut wizard = wizard_on_step_two();
        wizard.select_club("Aston Villa");
        assert_eq!(wizard.advance(), Ok(WizardStep::Appearance));
        assert_eq!(wizard.advance(), Ok(WizardStep::Experience));
        assert_eq!(wizard.advance(), Ok(WizardStep::Confirmation));
        // Advancing past the final step is a no-op.
        assert_eq!(wizard.advance(), Ok(WizardStep::Confirmation));
    }

    #[test]
    fn test_single_flight_submission() {
        let mut wizard = wizard_on_confirmation();

        let form = wizard.begin_submit();
        assert!(form.is_some());
        // A second click while in flight claims nothing.
        assert!(wizard.begin_submit().is_none());
        // Navigation is frozen during the in-flight call.
        assert_eq!(wizard.back(), WizardStep::Confirmation);
        assert_eq!(wizard.advance(), Ok(WizardStep::Confirmation));
    }

    #[test]
    fn test_submit_only_from_final_step() {
        let mut wizard = wizard_on_step_two();
        assert!(wizard.begin_submit().is_none());
    }

    #[test]
    fn test_failed_submit_keeps_form_and_allows_retry() {
        let mut wizard = wizard_on_confirmation();
        wizard.begin_submit().unwrap();
        wizard.submit_failed("database error".to_string());

        assert_eq!(wizard.step(), WizardStep::Confirmation);
        assert_eq!(wizard.error(), Some("database error"));
        assert_eq!(wizard.form.first_name, "Alex");

        // Retry claims the slot again and clears the old error.
        let retry = wizard.begin_submit();
        assert!(retry.is_some());
        assert_eq!(wizard.error(), None);
    }

    #[test]
    fn test_successful_submit_releases_flight_lock() {
        let mut wizard = wizard_on_confirmation();
        wizard.begin_submit().unwrap();
        wizard.submit_succeeded();
        assert!(!wizard.is_submitting());
        assert_eq!(wizard.error(), None);
    }
}
