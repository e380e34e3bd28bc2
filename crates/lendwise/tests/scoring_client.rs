//! End-to-end checks of the scoring client against an in-process stand-in for
//! the scoring service.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use serde_json::Value;

use lendwise::config::ScoringConfig;
use lendwise::prediction::{PredictionController, ResultView, ViewState};
use lendwise::scoring::{
    ApplicantRequest, HttpScoringClient, ScoringOutcome, ScoringService, REQUEST_FAILED_MESSAGE,
};

#[derive(Clone)]
struct Stub {
    status: StatusCode,
    body: &'static str,
    predictions: Arc<Mutex<Vec<(Option<String>, Value)>>>,
    other_hits: Arc<Mutex<Vec<(Method, String)>>>,
}

impl Stub {
    fn new(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            body,
            predictions: Arc::new(Mutex::new(Vec::new())),
            other_hits: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn predictions(&self) -> Vec<(Option<String>, Value)> {
        self.predictions.lock().expect("stub mutex").clone()
    }

    fn other_hits(&self) -> Vec<(Method, String)> {
        self.other_hits.lock().expect("stub mutex").clone()
    }
}

async fn stub_predict(
    State(stub): State<Stub>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let parsed = serde_json::from_str(&body).unwrap_or(Value::Null);
    stub.predictions
        .lock()
        .expect("stub mutex")
        .push((content_type, parsed));

    (
        stub.status,
        [(header::CONTENT_TYPE, "application/json")],
        stub.body,
    )
}

async fn stub_fallback(State(stub): State<Stub>, method: Method, uri: Uri) -> StatusCode {
    stub.other_hits
        .lock()
        .expect("stub mutex")
        .push((method, uri.path().to_string()));
    StatusCode::NOT_FOUND
}

async fn spawn_stub(stub: Stub) -> String {
    let app = Router::new()
        .route("/predict", post(stub_predict))
        .fallback(stub_fallback)
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("stub binds");
    let addr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub serves");
    });

    format!("http://{addr}")
}

fn client_for(base_url: &str) -> HttpScoringClient {
    HttpScoringClient::new(&ScoringConfig::new(base_url)).expect("client builds")
}

const ACCEPT_BODY: &str =
    r#"{"default_probability":0.1234,"interest_rate_percent":9.5,"decision":"ACCEPT"}"#;

#[tokio::test]
async fn submission_posts_once_to_predict_with_typed_json() {
    let stub = Stub::new(StatusCode::OK, ACCEPT_BODY);
    let base_url = spawn_stub(stub.clone()).await;
    let client = client_for(&base_url);

    let mut controller = PredictionController::new();
    controller
        .edit("person_emp_length", "4.5")
        .expect("edit accepted");
    controller.submit(&client).await.expect("submits");

    let predictions = stub.predictions();
    assert_eq!(predictions.len(), 1, "exactly one POST to /predict");
    assert!(stub.other_hits().is_empty());

    let (content_type, body) = &predictions[0];
    assert_eq!(content_type.as_deref(), Some("application/json"));

    let object = body.as_object().expect("flat JSON object");
    assert_eq!(object.len(), 8);
    for numeric in [
        "person_age",
        "person_income",
        "person_emp_length",
        "loan_amnt",
        "cb_person_cred_hist_length",
    ] {
        assert!(object[numeric].is_number(), "{numeric} sent as number");
    }
    for categorical in [
        "cb_person_default_on_file",
        "person_home_ownership",
        "loan_intent",
    ] {
        assert!(object[categorical].is_string(), "{categorical} sent as string");
    }
    assert_eq!(object["person_emp_length"].as_f64(), Some(4.5));

    let ViewState::Resolved(outcome) = controller.state() else {
        panic!("controller should be resolved");
    };
    let ResultView::Scored { tiles, banner } = ResultView::from_outcome(outcome) else {
        panic!("expected a scored result");
    };
    assert_eq!(tiles[0].value, "12.34%");
    assert_eq!(tiles[1].value, "9.5%");
    assert_eq!(tiles[2].value, "ACCEPT");
    assert_eq!(banner.threshold, "35%");
}

#[tokio::test]
async fn reported_threshold_is_carried_through() {
    let stub = Stub::new(
        StatusCode::OK,
        r#"{"default_probability":0.61,"interest_rate_percent":13.71,"decision":"REJECT","explain":{"threshold_used":0.4}}"#,
    );
    let base_url = spawn_stub(stub).await;

    let outcome = client_for(&base_url)
        .score(&ApplicantRequest::default())
        .await;
    let ScoringOutcome::Success(result) = outcome else {
        panic!("expected success");
    };
    assert_eq!(result.threshold_used(), 0.4);
    assert!(!result.decision.is_accept());
}

#[tokio::test]
async fn unreachable_service_is_a_request_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("port reservation binds");
    let addr = listener.local_addr().expect("reserved address");
    drop(listener);

    let outcome = client_for(&format!("http://{addr}"))
        .score(&ApplicantRequest::default())
        .await;

    assert_eq!(
        outcome,
        ScoringOutcome::Failure(REQUEST_FAILED_MESSAGE.to_string())
    );
    assert!(ResultView::from_outcome(&outcome).is_error());
}

#[tokio::test]
async fn malformed_and_error_bodies_are_request_failures() {
    for (status, body) in [
        (StatusCode::OK, "<html>upstream down</html>"),
        (StatusCode::OK, r#"{"error":"model not loaded"}"#),
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail":[{"loc":["body","person_age"],"msg":"field required"}]}"#,
        ),
    ] {
        let stub = Stub::new(status, body);
        let base_url = spawn_stub(stub.clone()).await;

        let outcome = client_for(&base_url)
            .score(&ApplicantRequest::default())
            .await;

        assert_eq!(outcome, ScoringOutcome::request_failed(), "body: {body}");
        assert_eq!(stub.predictions().len(), 1);
    }
}
