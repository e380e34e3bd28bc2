use crate::scoring::{ApplicantRequest, Choice, HomeOwnership, LoanIntent, PriorDefault};

/// Inputs rendered by the prediction form, keyed by their wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Age,
    Income,
    EmploymentLength,
    LoanAmount,
    CreditHistoryLength,
    PriorDefault,
    HomeOwnership,
    LoanIntent,
}

impl FormField {
    /// Display order on the form.
    pub const ALL: [FormField; 8] = [
        FormField::Age,
        FormField::Income,
        FormField::EmploymentLength,
        FormField::LoanAmount,
        FormField::CreditHistoryLength,
        FormField::PriorDefault,
        FormField::HomeOwnership,
        FormField::LoanIntent,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FormField::Age => "person_age",
            FormField::Income => "person_income",
            FormField::EmploymentLength => "person_emp_length",
            FormField::LoanAmount => "loan_amnt",
            FormField::CreditHistoryLength => "cb_person_cred_hist_length",
            FormField::PriorDefault => "cb_person_default_on_file",
            FormField::HomeOwnership => "person_home_ownership",
            FormField::LoanIntent => "loan_intent",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Age => "Age",
            FormField::Income => "Annual Income (INR)",
            FormField::EmploymentLength => "Employment Length (years)",
            FormField::LoanAmount => "Loan Amount (INR)",
            FormField::CreditHistoryLength => "Credit History Length (years)",
            FormField::PriorDefault => "Previous Default on File",
            FormField::HomeOwnership => "Home Ownership",
            FormField::LoanIntent => "Loan Intent",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    /// Fields coerced from raw text to numbers on every edit.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            FormField::Age
                | FormField::Income
                | FormField::EmploymentLength
                | FormField::LoanAmount
                | FormField::CreditHistoryLength
        )
    }
}

/// Rejected edit. The field keeps its previous value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("unknown form field `{0}`")]
    UnknownField(String),
    #[error("{field} must be a number")]
    NotNumeric { field: &'static str },
    #[error("{field} cannot be negative")]
    Negative { field: &'static str },
    #[error("{field} must be a whole number")]
    NotWhole { field: &'static str },
    #[error("Age must be between {min} and {max}")]
    AgeOutOfRange { min: u32, max: u32 },
    #[error("'{value}' is not a valid option for {field}")]
    UnknownOption { field: &'static str, value: String },
}

/// Current values of the prediction form, always held in their typed form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicantForm {
    values: ApplicantRequest,
}

impl ApplicantForm {
    pub fn new(values: ApplicantRequest) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &ApplicantRequest {
        &self.values
    }

    /// Applies one raw edit, coercing numeric fields to numbers.
    pub fn edit(&mut self, name: &str, raw: &str) -> Result<FormField, FormError> {
        let field =
            FormField::from_name(name).ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        self.set(field, raw)?;
        Ok(field)
    }

    pub fn set(&mut self, field: FormField, raw: &str) -> Result<(), FormError> {
        let values = &mut self.values;
        match field {
            FormField::Age => {
                let age = coerce_whole(field, raw)?;
                check_age(age)?;
                values.person_age = age;
            }
            FormField::Income => values.person_income = coerce_number(field, raw)?,
            FormField::EmploymentLength => values.person_emp_length = coerce_number(field, raw)?,
            FormField::LoanAmount => values.loan_amnt = coerce_number(field, raw)?,
            FormField::CreditHistoryLength => {
                values.cb_person_cred_hist_length = coerce_whole(field, raw)?
            }
            FormField::PriorDefault => {
                values.cb_person_default_on_file = coerce_choice::<PriorDefault>(field, raw)?
            }
            FormField::HomeOwnership => {
                values.person_home_ownership = coerce_choice::<HomeOwnership>(field, raw)?
            }
            FormField::LoanIntent => values.loan_intent = coerce_choice::<LoanIntent>(field, raw)?,
        }
        Ok(())
    }

    /// Text to place back into the input for `field`.
    pub fn display_value(&self, field: FormField) -> String {
        let values = &self.values;
        match field {
            FormField::Age => values.person_age.to_string(),
            FormField::Income => values.person_income.to_string(),
            FormField::EmploymentLength => values.person_emp_length.to_string(),
            FormField::LoanAmount => values.loan_amnt.to_string(),
            FormField::CreditHistoryLength => values.cb_person_cred_hist_length.to_string(),
            FormField::PriorDefault => values.cb_person_default_on_file.code().to_string(),
            FormField::HomeOwnership => values.person_home_ownership.code().to_string(),
            FormField::LoanIntent => values.loan_intent.code().to_string(),
        }
    }
}

// An empty input counts as zero, like a cleared number box.
fn coerce_number(field: FormField, raw: &str) -> Result<f64, FormError> {
    let raw = raw.trim();
    let value = if raw.is_empty() {
        0.0
    } else {
        raw.parse::<f64>().map_err(|_| FormError::NotNumeric {
            field: field.label(),
        })?
    };

    check_amount(field, value)?;
    Ok(value)
}

fn check_amount(field: FormField, value: f64) -> Result<(), FormError> {
    if !value.is_finite() {
        return Err(FormError::NotNumeric {
            field: field.label(),
        });
    }
    if value < 0.0 {
        return Err(FormError::Negative {
            field: field.label(),
        });
    }
    Ok(())
}

fn check_age(age: u32) -> Result<(), FormError> {
    if !(ApplicantRequest::MIN_AGE..=ApplicantRequest::MAX_AGE).contains(&age) {
        return Err(FormError::AgeOutOfRange {
            min: ApplicantRequest::MIN_AGE,
            max: ApplicantRequest::MAX_AGE,
        });
    }
    Ok(())
}

impl ApplicantRequest {
    /// Applies the form's edit rules to an applicant that arrived already
    /// typed, from JSON or CSV.
    pub fn validate(&self) -> Result<(), FormError> {
        check_age(self.person_age)?;
        for (field, value) in [
            (FormField::Income, self.person_income),
            (FormField::EmploymentLength, self.person_emp_length),
            (FormField::LoanAmount, self.loan_amnt),
        ] {
            check_amount(field, value)?;
        }
        Ok(())
    }
}

fn coerce_whole(field: FormField, raw: &str) -> Result<u32, FormError> {
    let value = coerce_number(field, raw)?;
    if value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(FormError::NotWhole {
            field: field.label(),
        });
    }
    Ok(value as u32)
}

fn coerce_choice<C: Choice>(field: FormField, raw: &str) -> Result<C, FormError> {
    C::from_code(raw).ok_or_else(|| FormError::UnknownOption {
        field: field.label(),
        value: raw.to_string(),
    })
}
