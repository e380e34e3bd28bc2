use serde::{Deserialize, Serialize};

/// Closed set of categorical answers offered by the applicant form.
pub trait Choice: Copy + PartialEq + 'static {
    const ALL: &'static [Self];

    /// Wire code sent to the scoring service.
    fn code(self) -> &'static str;

    /// Text shown to the applicant.
    fn label(self) -> &'static str {
        self.code()
    }

    fn from_code(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.iter().copied().find(|choice| choice.code() == raw)
    }
}

/// Whether the credit bureau holds a prior default for the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PriorDefault {
    #[serde(rename = "Y")]
    Yes,
    #[default]
    #[serde(rename = "N")]
    No,
}

impl Choice for PriorDefault {
    const ALL: &'static [Self] = &[Self::No, Self::Yes];

    fn code(self) -> &'static str {
        match self {
            Self::Yes => "Y",
            Self::No => "N",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HomeOwnership {
    #[default]
    Rent,
    Mortgage,
    Own,
    Other,
}

impl Choice for HomeOwnership {
    const ALL: &'static [Self] = &[Self::Rent, Self::Mortgage, Self::Own, Self::Other];

    fn code(self) -> &'static str {
        match self {
            Self::Rent => "RENT",
            Self::Mortgage => "MORTGAGE",
            Self::Own => "OWN",
            Self::Other => "OTHER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoanIntent {
    #[default]
    Personal,
    Education,
    DebtConsolidation,
    HomeImprovement,
    Medical,
    Venture,
}

impl Choice for LoanIntent {
    const ALL: &'static [Self] = &[
        Self::Personal,
        Self::Education,
        Self::DebtConsolidation,
        Self::HomeImprovement,
        Self::Medical,
        Self::Venture,
    ];

    fn code(self) -> &'static str {
        match self {
            Self::Personal => "PERSONAL",
            Self::Education => "EDUCATION",
            Self::DebtConsolidation => "DEBTCONSOLIDATION",
            Self::HomeImprovement => "HOMEIMPROVEMENT",
            Self::Medical => "MEDICAL",
            Self::Venture => "VENTURE",
        }
    }
}

/// Applicant snapshot posted to the scoring service.
///
/// Field names are the wire names. `loan_percent_income` is left out on
/// purpose: the service derives it from income and loan amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantRequest {
    pub person_age: u32,
    pub person_income: f64,
    pub person_emp_length: f64,
    pub loan_amnt: f64,
    pub cb_person_default_on_file: PriorDefault,
    pub cb_person_cred_hist_length: u32,
    pub person_home_ownership: HomeOwnership,
    pub loan_intent: LoanIntent,
}

impl ApplicantRequest {
    pub const MIN_AGE: u32 = 18;
    pub const MAX_AGE: u32 = 100;
}

impl Default for ApplicantRequest {
    fn default() -> Self {
        Self {
            person_age: 30,
            person_income: 60_000.0,
            person_emp_length: 2.0,
            loan_amnt: 15_000.0,
            cb_person_default_on_file: PriorDefault::No,
            cb_person_cred_hist_length: 6,
            person_home_ownership: HomeOwnership::Rent,
            loan_intent: LoanIntent::Personal,
        }
    }
}
