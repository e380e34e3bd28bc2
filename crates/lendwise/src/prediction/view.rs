use super::controller::{PredictionController, ViewState};
use super::form::{ApplicantForm, FormField};
use crate::scoring::{ApplicantRequest, Choice, ScoringOutcome, ScoringResult};

pub const SUBMIT_LABEL: &str = "Predict";
pub const SUBMITTING_LABEL: &str = "Scoring…";

/// Rounds exact halves away from zero before formatting, so 62.5 shows as
/// 63 rather than the round-half-even 62.
fn percent(fraction: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (fraction * 100.0 * scale).round() / scale;
    format!("{rounded:.decimals$}%")
}

pub fn format_probability(probability: f64) -> String {
    percent(probability, 2)
}

pub fn format_rate(rate_percent: f64) -> String {
    format!("{rate_percent}%")
}

pub fn format_threshold(threshold: f64) -> String {
    percent(threshold, 0)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiTile {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerTone {
    Accept,
    Reject,
}

impl BannerTone {
    pub fn css_class(self) -> &'static str {
        match self {
            BannerTone::Accept => "result-ok",
            BannerTone::Reject => "result-bad",
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            BannerTone::Accept => "✅ Applicant Accepted",
            BannerTone::Reject => "⚠️ Applicant Rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionBanner {
    pub tone: BannerTone,
    pub threshold: String,
    pub note: Option<String>,
}

/// What the result area shows once a submission has settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    Error { message: String },
    Scored {
        tiles: Vec<KpiTile>,
        banner: DecisionBanner,
    },
}

impl ResultView {
    pub fn from_outcome(outcome: &ScoringOutcome) -> Self {
        match outcome {
            ScoringOutcome::Failure(message) => ResultView::Error {
                message: message.clone(),
            },
            ScoringOutcome::Success(result) => Self::scored(result),
        }
    }

    fn scored(result: &ScoringResult) -> Self {
        let tiles = vec![
            KpiTile {
                label: "Default Probability",
                value: format_probability(result.default_probability),
            },
            KpiTile {
                label: "Interest Rate",
                value: format_rate(result.interest_rate_percent),
            },
            KpiTile {
                label: "Decision",
                value: result.decision.as_str().to_string(),
            },
        ];

        let tone = if result.decision.is_accept() {
            BannerTone::Accept
        } else {
            BannerTone::Reject
        };

        ResultView::Scored {
            tiles,
            banner: DecisionBanner {
                tone,
                threshold: format_threshold(result.threshold_used()),
                note: result.explain.note.clone(),
            },
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResultView::Error { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// One input of the form as it should be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
    pub is_select: bool,
    pub options: Vec<SelectOption>,
    pub min: &'static str,
    pub max: &'static str,
    pub step: &'static str,
    pub error: Option<String>,
}

/// Everything the prediction page needs, flattened for the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionView {
    pub fields: Vec<FieldView>,
    pub submitting: bool,
    pub submit_label: &'static str,
    pub result: Option<ResultView>,
}

impl PredictionView {
    pub fn from_controller(controller: &PredictionController) -> Self {
        let form = controller.form();
        let fields = FormField::ALL
            .into_iter()
            .map(|field| {
                let error = controller
                    .field_errors()
                    .find(|(errored, _)| *errored == field)
                    .map(|(_, err)| err.to_string());
                field_view(form, field, error)
            })
            .collect();

        let submitting = controller.is_submitting();
        let result = match controller.state() {
            ViewState::Resolved(outcome) => Some(ResultView::from_outcome(outcome)),
            ViewState::Idle | ViewState::Submitting => None,
        };

        Self {
            fields,
            submitting,
            submit_label: if submitting {
                SUBMITTING_LABEL
            } else {
                SUBMIT_LABEL
            },
            result,
        }
    }
}

fn field_view(form: &ApplicantForm, field: FormField, error: Option<String>) -> FieldView {
    let values = form.values();
    let (min, max, step) = match field {
        FormField::Age => ("18", "100", ""),
        FormField::EmploymentLength => ("0", "", "0.1"),
        FormField::Income | FormField::LoanAmount | FormField::CreditHistoryLength => {
            ("0", "", "")
        }
        FormField::PriorDefault | FormField::HomeOwnership | FormField::LoanIntent => {
            ("", "", "")
        }
    };

    let options = match field {
        FormField::PriorDefault => select_options(values.cb_person_default_on_file),
        FormField::HomeOwnership => select_options(values.person_home_ownership),
        FormField::LoanIntent => select_options(values.loan_intent),
        _ => Vec::new(),
    };

    FieldView {
        name: field.name(),
        label: field.label(),
        value: form.display_value(field),
        is_select: !field.is_numeric(),
        options,
        min,
        max,
        step,
        error,
    }
}

fn select_options<C: Choice>(current: C) -> Vec<SelectOption> {
    C::ALL
        .iter()
        .map(|choice| SelectOption {
            value: choice.code(),
            label: choice.label(),
            selected: *choice == current,
        })
        .collect()
}

/// Plain-text rendering of a result for the command line.
pub fn result_lines(applicant: &ApplicantRequest, outcome: &ScoringOutcome) -> Vec<String> {
    match ResultView::from_outcome(outcome) {
        ResultView::Error { message } => vec![message],
        ResultView::Scored { tiles, banner } => {
            let mut lines = vec![format!(
                "Applicant: age {}, income {}, loan {} ({})",
                applicant.person_age,
                applicant.person_income,
                applicant.loan_amnt,
                applicant.loan_intent.code()
            )];
            lines.extend(
                tiles
                    .iter()
                    .map(|tile| format!("{}: {}", tile.label, tile.value)),
            );
            lines.push(format!(
                "{} (threshold used: {})",
                banner.tone.headline(),
                banner.threshold
            ));
            if let Some(note) = banner.note {
                lines.push(note);
            }
            lines
        }
    }
}
