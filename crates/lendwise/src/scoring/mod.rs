//! Contract with the external scoring service: the applicant payload, the
//! parsed result, and the HTTP client that moves one to the other.

pub mod batch;
pub mod client;
pub mod domain;
pub mod outcome;

pub use batch::{read_applicants, read_applicants_from_path, BatchImportError};
pub use client::{HttpScoringClient, ScoringError, ScoringService, PREDICT_PATH};
pub use domain::{ApplicantRequest, Choice, HomeOwnership, LoanIntent, PriorDefault};
pub use outcome::{
    parse_scoring_body, Decision, Explanation, ScoringOutcome, ScoringResult, DEFAULT_THRESHOLD,
    REQUEST_FAILED_MESSAGE,
};
