use clap::Args;
use lendwise::config::AppConfig;
use lendwise::error::AppError;
use lendwise::prediction::{result_lines, ResultView};
use lendwise::scoring::{
    read_applicants_from_path, ApplicantRequest, Choice, HomeOwnership, HttpScoringClient,
    LoanIntent, PriorDefault, ScoringOutcome, ScoringService,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Applicant age in years
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(18..=100))]
    pub(crate) age: u32,
    /// Annual income (INR)
    #[arg(long, default_value_t = 60_000.0, value_parser = parse_amount)]
    pub(crate) income: f64,
    /// Employment length in years; fractions allowed
    #[arg(long, default_value_t = 2.0, value_parser = parse_amount)]
    pub(crate) emp_length: f64,
    /// Requested loan amount (INR)
    #[arg(long, default_value_t = 15_000.0, value_parser = parse_amount)]
    pub(crate) loan_amount: f64,
    /// Previous default on file (Y or N)
    #[arg(long, default_value = "N", value_parser = parse_choice::<PriorDefault>)]
    pub(crate) prior_default: PriorDefault,
    /// Credit history length in years
    #[arg(long, default_value_t = 6)]
    pub(crate) credit_history: u32,
    /// RENT, MORTGAGE, OWN or OTHER
    #[arg(long, default_value = "RENT", value_parser = parse_choice::<HomeOwnership>)]
    pub(crate) home_ownership: HomeOwnership,
    /// PERSONAL, EDUCATION, DEBTCONSOLIDATION, HOMEIMPROVEMENT, MEDICAL or VENTURE
    #[arg(long, default_value = "PERSONAL", value_parser = parse_choice::<LoanIntent>)]
    pub(crate) loan_intent: LoanIntent,
    /// Score every row of this CSV file (header uses the API field names)
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Override SCORING_API_URL for this run
    #[arg(long)]
    pub(crate) api_url: Option<String>,
}

impl ScoreArgs {
    fn applicant(&self) -> ApplicantRequest {
        ApplicantRequest {
            person_age: self.age,
            person_income: self.income,
            person_emp_length: self.emp_length,
            loan_amnt: self.loan_amount,
            cb_person_default_on_file: self.prior_default,
            cb_person_cred_hist_length: self.credit_history,
            person_home_ownership: self.home_ownership,
            loan_intent: self.loan_intent,
        }
    }
}

fn parse_amount(raw: &str) -> Result<f64, String> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("'{raw}' must be a non-negative number"));
    }
    Ok(value)
}

fn parse_choice<C: Choice>(raw: &str) -> Result<C, String> {
    C::from_code(&raw.trim().to_ascii_uppercase()).ok_or_else(|| {
        let codes: Vec<&str> = C::ALL.iter().map(|choice| choice.code()).collect();
        format!("'{raw}' is not one of {}", codes.join(", "))
    })
}

pub(crate) async fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(url) = args.api_url.clone() {
        config.scoring.base_url = url;
    }

    let client = HttpScoringClient::new(&config.scoring)?;
    println!("Scoring service: {}", client.endpoint());

    match &args.csv {
        Some(path) => {
            let applicants = read_applicants_from_path(path)?;
            let tally = score_batch(&client, &applicants).await;
            println!(
                "\n{} scored: {} accepted, {} rejected, {} failed",
                applicants.len(),
                tally.accepted,
                tally.rejected,
                tally.failed
            );
        }
        None => {
            let applicant = args.applicant();
            let outcome = client.score(&applicant).await;
            println!();
            for line in result_lines(&applicant, &outcome) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
struct BatchTally {
    accepted: usize,
    rejected: usize,
    failed: usize,
}

impl BatchTally {
    fn record(&mut self, outcome: &ScoringOutcome) {
        match outcome {
            ScoringOutcome::Success(result) if result.decision.is_accept() => self.accepted += 1,
            ScoringOutcome::Success(_) => self.rejected += 1,
            ScoringOutcome::Failure(_) => self.failed += 1,
        }
    }
}

async fn score_batch<S>(service: &S, applicants: &[ApplicantRequest]) -> BatchTally
where
    S: ScoringService + ?Sized,
{
    let mut tally = BatchTally::default();
    for (index, applicant) in applicants.iter().enumerate() {
        let outcome = service.score(applicant).await;
        println!("{}", row_line(index + 1, &outcome));
        tally.record(&outcome);
    }
    tally
}

fn row_line(row: usize, outcome: &ScoringOutcome) -> String {
    match ResultView::from_outcome(outcome) {
        ResultView::Error { message } => format!("row {row}: {message}"),
        ResultView::Scored { tiles, banner } => {
            let values: Vec<String> = tiles
                .iter()
                .map(|tile| format!("{} {}", tile.label.to_lowercase(), tile.value))
                .collect();
            format!(
                "row {row}: {} (threshold {})",
                values.join(" | "),
                banner.threshold
            )
        }
    }
}
