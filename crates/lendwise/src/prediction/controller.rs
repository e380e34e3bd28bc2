use std::collections::BTreeMap;

use tracing::debug;

use super::form::{ApplicantForm, FormError, FormField};
use crate::scoring::{ApplicantRequest, ScoringOutcome, ScoringService};

/// Which of the mutually exclusive views the prediction page shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Submitting,
    Resolved(ScoringOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    #[error("a scoring request is already in flight")]
    AlreadySubmitting,
    #[error("no scoring request is in flight")]
    NotSubmitting,
    #[error("{count} field(s) hold rejected input")]
    InvalidFields { count: usize },
}

/// Owns the form values and the submission/result cycle of one prediction
/// page. Lives as long as the page it backs.
#[derive(Debug, Clone)]
pub struct PredictionController {
    form: ApplicantForm,
    state: ViewState,
    field_errors: BTreeMap<FormField, FormError>,
}

impl Default for PredictionController {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionController {
    pub fn new() -> Self {
        Self::with_form(ApplicantForm::default())
    }

    pub fn with_form(form: ApplicantForm) -> Self {
        Self {
            form,
            state: ViewState::Idle,
            field_errors: BTreeMap::new(),
        }
    }

    pub fn form(&self) -> &ApplicantForm {
        &self.form
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, ViewState::Submitting)
    }

    pub fn field_errors(&self) -> impl Iterator<Item = (FormField, &FormError)> + '_ {
        self.field_errors.iter().map(|(field, err)| (*field, err))
    }

    /// Applies one edit. Editing never changes the view state, so a result
    /// on screen stays there until cleared or replaced.
    pub fn edit(&mut self, name: &str, raw: &str) -> Result<(), FormError> {
        let Some(field) = FormField::from_name(name) else {
            return Err(FormError::UnknownField(name.to_string()));
        };

        match self.form.set(field, raw) {
            Ok(()) => {
                self.field_errors.remove(&field);
                Ok(())
            }
            Err(err) => {
                self.field_errors.insert(field, err.clone());
                Err(err)
            }
        }
    }

    /// Moves to `Submitting` and hands back the payload to send.
    pub fn begin_submit(&mut self) -> Result<ApplicantRequest, ControllerError> {
        if self.is_submitting() {
            return Err(ControllerError::AlreadySubmitting);
        }
        if !self.field_errors.is_empty() {
            return Err(ControllerError::InvalidFields {
                count: self.field_errors.len(),
            });
        }

        self.state = ViewState::Submitting;
        Ok(self.form.values().clone())
    }

    pub fn resolve(&mut self, outcome: ScoringOutcome) -> Result<(), ControllerError> {
        if !self.is_submitting() {
            return Err(ControllerError::NotSubmitting);
        }

        self.state = ViewState::Resolved(outcome);
        Ok(())
    }

    /// Drops a displayed result; form values are untouched. Does nothing
    /// while a request is in flight.
    pub fn clear_result(&mut self) {
        if matches!(self.state, ViewState::Resolved(_)) {
            self.state = ViewState::Idle;
        }
    }

    /// Runs one full submission against `service`: exactly one call, no retry.
    pub async fn submit<S>(&mut self, service: &S) -> Result<&ScoringOutcome, ControllerError>
    where
        S: ScoringService + ?Sized,
    {
        let request = self.begin_submit()?;
        let outcome = service.score(&request).await;
        debug!(success = outcome.is_success(), "prediction resolved");
        self.resolve(outcome)?;

        match &self.state {
            ViewState::Resolved(outcome) => Ok(outcome),
            _ => Err(ControllerError::NotSubmitting),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{
        Decision, Explanation, ScoringResult, DEFAULT_THRESHOLD, REQUEST_FAILED_MESSAGE,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingService {
        outcome: ScoringOutcome,
        calls: Mutex<Vec<ApplicantRequest>>,
    }

    impl RecordingService {
        fn new(outcome: ScoringOutcome) -> Self {
            Self {
                outcome,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<ApplicantRequest> {
            self.calls.lock().expect("calls mutex").clone()
        }
    }

    #[async_trait]
    impl ScoringService for RecordingService {
        async fn score(&self, applicant: &ApplicantRequest) -> ScoringOutcome {
            self.calls
                .lock()
                .expect("calls mutex")
                .push(applicant.clone());
            self.outcome.clone()
        }
    }

    fn accepted() -> ScoringOutcome {
        ScoringOutcome::Success(ScoringResult {
            default_probability: 0.1234,
            interest_rate_percent: 9.5,
            decision: Decision::Accept,
            explain: Explanation {
                threshold_used: DEFAULT_THRESHOLD,
                note: None,
            },
        })
    }

    #[test]
    fn starts_idle_with_default_applicant() {
        let controller = PredictionController::new();
        assert_eq!(controller.state(), &ViewState::Idle);
        assert_eq!(controller.form().values(), &ApplicantRequest::default());
        assert_eq!(controller.field_errors().count(), 0);
    }

    #[tokio::test]
    async fn submit_issues_one_call_and_resolves() {
        let service = RecordingService::new(accepted());
        let mut controller = PredictionController::new();
        controller.edit("person_age", "52").expect("edit accepted");

        let outcome = controller.submit(&service).await.expect("submits");
        assert!(outcome.is_success());

        let calls = service.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].person_age, 52);
        assert_eq!(controller.state(), &ViewState::Resolved(accepted()));
    }

    #[tokio::test]
    async fn failures_land_in_resolved_too() {
        let service = RecordingService::new(ScoringOutcome::request_failed());
        let mut controller = PredictionController::new();

        controller.submit(&service).await.expect("submits");
        assert_eq!(
            controller.state(),
            &ViewState::Resolved(ScoringOutcome::Failure(REQUEST_FAILED_MESSAGE.to_string()))
        );
    }

    #[test]
    fn second_submit_while_in_flight_is_rejected() {
        let mut controller = PredictionController::new();
        controller.begin_submit().expect("first submit");
        assert!(controller.is_submitting());
        assert_eq!(
            controller.begin_submit(),
            Err(ControllerError::AlreadySubmitting)
        );
    }

    #[test]
    fn resolve_without_submit_is_rejected() {
        let mut controller = PredictionController::new();
        assert_eq!(
            controller.resolve(accepted()),
            Err(ControllerError::NotSubmitting)
        );
    }

    #[test]
    fn clear_result_returns_to_idle_and_keeps_values() {
        let mut controller = PredictionController::new();
        controller.edit("loan_amnt", "42000").expect("edit accepted");
        controller.begin_submit().expect("submits");
        controller.resolve(accepted()).expect("resolves");

        controller.clear_result();
        assert_eq!(controller.state(), &ViewState::Idle);
        assert_eq!(controller.form().values().loan_amnt, 42_000.0);
    }

    #[test]
    fn clear_result_is_ignored_while_submitting() {
        let mut controller = PredictionController::new();
        controller.begin_submit().expect("submits");
        controller.clear_result();
        assert!(controller.is_submitting());
    }

    #[test]
    fn editing_keeps_a_displayed_result() {
        let mut controller = PredictionController::new();
        controller.begin_submit().expect("submits");
        controller.resolve(accepted()).expect("resolves");

        controller.edit("person_income", "90000").expect("edit accepted");
        assert_eq!(controller.state(), &ViewState::Resolved(accepted()));
    }

    #[tokio::test]
    async fn rejected_edits_block_submission_until_fixed() {
        let service = RecordingService::new(accepted());
        let mut controller = PredictionController::new();

        assert!(controller.edit("person_age", "twelve").is_err());
        assert_eq!(
            controller.submit(&service).await.err(),
            Some(ControllerError::InvalidFields { count: 1 })
        );
        assert!(service.calls().is_empty());
        assert_eq!(controller.state(), &ViewState::Idle);

        controller.edit("person_age", "33").expect("edit accepted");
        controller.submit(&service).await.expect("submits");
        assert_eq!(service.calls().len(), 1);
    }
}
