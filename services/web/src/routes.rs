use crate::assets;
use crate::infra::AppState;
use crate::pages::{render, AboutPage, HomePage, NotFoundPage, PredictionPage};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use chrono::Datelike;
use lendwise::error::AppError;
use lendwise::prediction::{PredictionController, PredictionView};
use lendwise::scoring::{ApplicantRequest, ScoringOutcome, ScoringService};
use lendwise::site::Page;
use serde_json::json;
use std::sync::atomic::Ordering;
use tracing::debug;

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route(Page::Home.path(), get(home_page))
        .route(
            Page::Prediction.path(),
            get(prediction_page).post(prediction_submit),
        )
        .route(Page::About.path(), get(about_page))
        .route("/assets/{file}", get(asset_endpoint))
        .route("/api/v1/score", post(score_endpoint))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .fallback(not_found_page)
        .with_state(state)
}

/// Which button submitted the prediction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormAction {
    Predict,
    Clear,
}

impl FormAction {
    fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("clear") {
            Self::Clear
        } else {
            Self::Predict
        }
    }
}

pub(crate) async fn home_page() -> Result<Html<String>, AppError> {
    render(&HomePage::new())
}

pub(crate) async fn about_page() -> Result<Html<String>, AppError> {
    let year = chrono::Local::now().year();
    render(&AboutPage::new(year))
}

pub(crate) async fn prediction_page() -> Result<Html<String>, AppError> {
    let controller = PredictionController::new();
    render(&PredictionPage::new(PredictionView::from_controller(
        &controller,
    )))
}

/// Replays the posted inputs as edits on a fresh controller, then either
/// scores the applicant or clears the result.
pub(crate) async fn prediction_submit(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Html<String>, AppError> {
    let mut controller = PredictionController::new();
    let mut action = FormAction::Predict;

    for (name, value) in &fields {
        if name == "action" {
            action = FormAction::parse(value);
            continue;
        }
        if let Err(err) = controller.edit(name, value) {
            debug!(field = %name, error = %err, "form edit rejected");
        }
    }

    match action {
        FormAction::Predict => {
            if let Err(err) = controller.submit(state.scoring.as_ref()).await {
                debug!(error = %err, "prediction not submitted");
            }
        }
        FormAction::Clear => controller.clear_result(),
    }

    render(&PredictionPage::new(PredictionView::from_controller(
        &controller,
    )))
}

/// Unparseable bodies and rule-breaking applicants are answered with the same
/// `{"error"}` shape as scoring failures, without calling the service.
pub(crate) async fn score_endpoint(
    State(state): State<AppState>,
    body: Result<Json<ApplicantRequest>, JsonRejection>,
) -> Response {
    let applicant = match body {
        Ok(Json(applicant)) => applicant,
        Err(rejection) => return error_response(rejection.status(), rejection.body_text()),
    };

    if let Err(err) = applicant.validate() {
        return error_response(StatusCode::UNPROCESSABLE_ENTITY, err.to_string());
    }

    match state.scoring.score(&applicant).await {
        ScoringOutcome::Success(result) => (StatusCode::OK, Json(result)).into_response(),
        ScoringOutcome::Failure(message) => error_response(StatusCode::BAD_GATEWAY, message),
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

pub(crate) async fn asset_endpoint(Path(file): Path<String>) -> Response {
    match assets::lookup(&file) {
        Some(asset) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, asset.content_type)],
            asset.bytes,
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Trailing-slash variants of known pages redirect; anything else is a 404.
pub(crate) async fn not_found_page(uri: Uri) -> Result<Response, AppError> {
    if let Some(page) = Page::from_path(uri.path()) {
        return Ok(Redirect::permanent(page.path()).into_response());
    }

    let page = render(&NotFoundPage::new(uri.path().to_string()))?;
    Ok((StatusCode::NOT_FOUND, page).into_response())
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
