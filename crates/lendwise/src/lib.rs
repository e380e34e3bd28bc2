//! LendWise: a credit-risk scoring front end.
//!
//! The crate holds everything except the HTTP wiring: configuration, error
//! and telemetry plumbing, the contract with the external scoring service,
//! and the prediction page's form controller and view model.

pub mod config;
pub mod error;
pub mod prediction;
pub mod scoring;
pub mod site;
pub mod telemetry;
