use askama::Template;
use axum::response::Html;
use lendwise::error::AppError;
use lendwise::prediction::{FieldView, KpiTile, PredictionView, ResultView, SUBMITTING_LABEL};
use lendwise::site::Page;

#[derive(Template)]
#[template(path = "home.html")]
pub(crate) struct HomePage {
    title: &'static str,
    active: &'static str,
}

impl HomePage {
    pub(crate) fn new() -> Self {
        Self {
            title: Page::Home.title(),
            active: Page::Home.key(),
        }
    }
}

#[derive(Template)]
#[template(path = "about.html")]
pub(crate) struct AboutPage {
    title: &'static str,
    active: &'static str,
    year: i32,
}

impl AboutPage {
    pub(crate) fn new(year: i32) -> Self {
        Self {
            title: Page::About.title(),
            active: Page::About.key(),
            year,
        }
    }
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub(crate) struct NotFoundPage {
    title: &'static str,
    active: &'static str,
    path: String,
}

impl NotFoundPage {
    pub(crate) fn new(path: String) -> Self {
        Self {
            title: "LendWise · Not found",
            active: "",
            path,
        }
    }
}

/// Result area flattened so the template needs no enum matching.
pub(crate) struct ResultPanel {
    is_error: bool,
    message: String,
    tiles: Vec<KpiTile>,
    banner_class: &'static str,
    headline: &'static str,
    threshold: String,
    note: Option<String>,
}

impl From<ResultView> for ResultPanel {
    fn from(view: ResultView) -> Self {
        match view {
            ResultView::Error { message } => Self {
                is_error: true,
                message,
                tiles: Vec::new(),
                banner_class: "result-bad",
                headline: "",
                threshold: String::new(),
                note: None,
            },
            ResultView::Scored { tiles, banner } => Self {
                is_error: false,
                message: String::new(),
                tiles,
                banner_class: banner.tone.css_class(),
                headline: banner.tone.headline(),
                threshold: banner.threshold,
                note: banner.note,
            },
        }
    }
}

#[derive(Template)]
#[template(path = "prediction.html")]
pub(crate) struct PredictionPage {
    title: &'static str,
    active: &'static str,
    fields: Vec<FieldView>,
    submitting: bool,
    submit_label: &'static str,
    submitting_label: &'static str,
    result: Option<ResultPanel>,
}

impl PredictionPage {
    pub(crate) fn new(view: PredictionView) -> Self {
        Self {
            title: Page::Prediction.title(),
            active: Page::Prediction.key(),
            fields: view.fields,
            submitting: view.submitting,
            submit_label: view.submit_label,
            submitting_label: SUBMITTING_LABEL,
            result: view.result.map(ResultPanel::from),
        }
    }
}

pub(crate) fn render<T: Template>(page: &T) -> Result<Html<String>, AppError> {
    page.render()
        .map(Html)
        .map_err(|err| AppError::Render(err.to_string()))
}
