//! The prediction page: form values, the submit/result state machine, and
//! the view model the page template renders.

pub mod controller;
pub mod form;
pub mod view;

pub use controller::{ControllerError, PredictionController, ViewState};
pub use form::{ApplicantForm, FormError, FormField};
pub use view::{
    result_lines, BannerTone, DecisionBanner, FieldView, KpiTile, PredictionView, ResultView,
    SelectOption, SUBMITTING_LABEL, SUBMIT_LABEL,
};
