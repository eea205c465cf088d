//! Student Performance Predictor CLI.
//!
//! ```bash
//! # Backend status and model summary
//! student-predictor status
//!
//! # Model information view
//! student-predictor info
//!
//! # Predict with the form defaults, overriding a few fields
//! student-predictor predict --study-time-hours 4.5 --sleep-hours 8
//!
//! # Against a local backend, as JSON
//! student-predictor --api-url http://localhost:8000 --json predict
//! ```

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use student_predictor::config::{ClientConfig, API_URL_ENV};
use student_predictor::controller::{ActiveView, Controller, SubmitOutcome};
use student_predictor::form::{FormCollector, FormField};
use student_predictor::gateway::HttpGateway;
use student_predictor::{output, render};

#[derive(Parser)]
#[command(name = "student-predictor", version, about = "Predict student grades from a remote model")]
struct Cli {
    /// Backend base URL (defaults to the deployed service)
    #[arg(long, global = true, env = API_URL_ENV)]
    api_url: Option<String>,

    /// Output the rendered screen as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show backend status and model summary
    Status,
    /// Show the model information view
    Info,
    /// Submit a student profile for prediction
    Predict(ProfileArgs),
}

/// Omitted fields keep the form defaults.
#[derive(Args)]
struct ProfileArgs {
    /// Age in years (15-25)
    #[arg(long, value_parser = form_value(FormField::Age))]
    age: Option<String>,

    /// male | female
    #[arg(long, value_parser = form_value(FormField::Gender))]
    gender: Option<String>,

    /// Study time per day in hours (0-12, step 0.5)
    #[arg(long, value_parser = form_value(FormField::StudyTimeHours))]
    study_time_hours: Option<String>,

    /// Absences per semester (0-50)
    #[arg(long, value_parser = form_value(FormField::Absences))]
    absences: Option<String>,

    /// none | primary | high_school | college | bachelor | master
    #[arg(long, value_parser = form_value(FormField::ParentalEducation))]
    parental_education: Option<String>,

    /// Previous grade (0-100, step 0.1)
    #[arg(long, value_parser = form_value(FormField::PreviousGrade))]
    previous_grade: Option<String>,

    /// yes | no
    #[arg(long, value_parser = form_value(FormField::Extracurricular))]
    extracurricular: Option<String>,

    /// Sleep per night in hours (3-12, step 0.5)
    #[arg(long, value_parser = form_value(FormField::SleepHours))]
    sleep_hours: Option<String>,
}

impl ProfileArgs {
    fn apply(self, form: &mut FormCollector) {
        let edits = [
            (FormField::Age, self.age),
            (FormField::Gender, self.gender),
            (FormField::StudyTimeHours, self.study_time_hours),
            (FormField::Absences, self.absences),
            (FormField::ParentalEducation, self.parental_education),
            (FormField::PreviousGrade, self.previous_grade),
            (FormField::Extracurricular, self.extracurricular),
            (FormField::SleepHours, self.sleep_hours),
        ];
        for (field, value) in edits {
            if let Some(value) = value {
                form.set(field, value);
            }
        }
    }
}

/// Input boundary: values outside a field's constraints never reach the form.
fn form_value(field: FormField) -> impl Fn(&str) -> Result<String, String> + Clone + Send + Sync + 'static {
    move |raw: &str| {
        field.constraint().check(raw)?;
        Ok(raw.trim().to_string())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("student_predictor=debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::resolve(cli.api_url.as_deref())?;
    let gateway = HttpGateway::new(config).context("failed to set up backend client")?;
    let controller = Controller::new(gateway);
    controller.initialize().await;

    let mut exit = ExitCode::SUCCESS;
    match cli.command {
        Commands::Status => {}
        Commands::Info => controller.set_view(ActiveView::Info),
        Commands::Predict(args) => {
            let mut form = FormCollector::new();
            args.apply(&mut form);
            match form.submit(&controller).await {
                SubmitOutcome::Succeeded => {}
                SubmitOutcome::Disabled | SubmitOutcome::AlreadyLoading | SubmitOutcome::Failed => {
                    exit = ExitCode::FAILURE;
                }
            }
        }
    }

    let screen = render::render(&controller.snapshot());
    let text = if cli.json {
        output::format_json(&screen)
    } else {
        output::format_human(&screen)
    };
    println!("{}", text);

    Ok(exit)
}
