use anyhow::{bail, Context};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use thalassemia_common::session::{UPLOAD_FAILED_MESSAGE, WAIT_MESSAGE};
use thalassemia_common::{FormData, FormValidation, PredictOutcome};
use thalassemia_detect::backend::{HttpBackend, ReportBackend};
use thalassemia_detect::error::DetectError;
use thalassemia_detect::{cli, config, controller, report, review};
use cli::{Cli, Commands};
use config::Config;
use controller::DetectionFlow;
use review::ReviewDecision;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::load()?;

    match cli.command {
        Commands::Detect { file, yes, strict } => {
            println!("🩸 thalassemia-detect - detection\n");
            let mut flow = DetectionFlow::new(HttpBackend::new(config.base_url()));

            // 1. Select
            println!("[1/3] Reading report...");
            flow.select_file(report::load_report(&file)?);
            println!("✔ {}\n", file.display());

            // 2. Extract
            println!("[2/3] Extracting parameters...");
            let spinner = wait_spinner();
            let uploaded = flow.upload().await.map(|p| p.len());
            spinner.finish_and_clear();
            match uploaded {
                Ok(count) => println!("✔ {} parameters extracted\n", count),
                Err(_) => bail!(UPLOAD_FAILED_MESSAGE),
            }
            if flow.form().data().is_empty() {
                println!("No parameters extracted.");
                return Ok(());
            }

            // 3. Review
            let decision = if yes {
                review::print_form(flow.form());
                ReviewDecision::Detect
            } else {
                review::run_interactive_review(&mut flow)?
            };

            if decision == ReviewDecision::Cancel {
                flow.rollback();
                println!("Cancelled");
                return Ok(());
            }

            if strict && !flow.validate_form() {
                println!("Donor fields failed validation:");
                review::print_form(flow.form());
                let failed = failed_fields(flow.form());
                flow.rollback();
                return Err(DetectError::Validation(failed).into());
            }

            // 4. Predict
            println!("\n[3/3] Running detection...");
            let spinner = wait_spinner();
            let outcome = flow.predict().await;
            spinner.finish_and_clear();
            report_outcome(outcome)?;
        }

        Commands::Extract { file, output } => {
            let mut flow = DetectionFlow::new(HttpBackend::new(config.base_url()));
            flow.select_file(report::load_report(&file)?);

            let spinner = wait_spinner();
            let uploaded = flow.upload().await.cloned();
            spinner.finish_and_clear();
            let parameters = match uploaded {
                Ok(parameters) => parameters,
                Err(_) => bail!(UPLOAD_FAILED_MESSAGE),
            };

            let json = serde_json::to_string_pretty(&parameters)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("✔ {} parameters saved: {}", parameters.len(), path.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::Predict { input } => {
            let parameters = read_parameters(&input)?;
            let backend = HttpBackend::new(config.base_url());

            let spinner = wait_spinner();
            let result = backend.predict(&parameters).await;
            spinner.finish_and_clear();
            if let Err(err) = &result {
                tracing::error!(error = %err, "prediction failed");
            }
            let outcome = match result {
                Ok(prediction) => PredictOutcome::from(prediction),
                Err(_) => PredictOutcome::Failed,
            };
            report_outcome(outcome)?;
        }

        Commands::Validate { input } => {
            let parameters = read_parameters(&input)?;
            let mut form = FormValidation::new(parameters.clone());

            // Per-field rules for every key, then the fixed donor set
            let mut field_errors: Vec<(String, String)> = Vec::new();
            for (field, value) in parameters.iter() {
                if !form.validate_field(field, value) {
                    if let Some(message) = form.error(field) {
                        field_errors.push((field.to_string(), message.to_string()));
                    }
                }
            }
            let form_valid = form.validate_form();
            for (field, message) in form.errors() {
                if !field_errors.iter().any(|(f, _)| f == field) {
                    field_errors.push((field.clone(), message.clone()));
                }
            }

            if field_errors.is_empty() && form_valid {
                println!("✔ All {} fields are valid", parameters.len());
            } else {
                for (field, message) in &field_errors {
                    println!("  ⚠ {}: {}", field, message);
                }
                let failed: Vec<&str> = field_errors.iter().map(|(f, _)| f.as_str()).collect();
                return Err(DetectError::Validation(failed.join(", ")).into());
            }
        }

        Commands::Config { set_base_url, show } => {
            let mut config = config;

            if let Some(url) = set_base_url {
                config.set_base_url(url)?;
                println!("✔ Base URL saved");
            }

            if show {
                println!("Settings:");
                println!("  Base URL: {}", config.base_url());
                println!("  Config file: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}

fn wait_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(WAIT_MESSAGE);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

fn failed_fields(form: &FormValidation) -> String {
    form.errors()
        .iter()
        .filter(|(_, message)| !message.is_empty())
        .map(|(field, _)| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn read_parameters(path: &Path) -> anyhow::Result<FormData> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read parameter file: {}", path.display()))?;
    let parameters: FormData = serde_json::from_str(&content)
        .with_context(|| format!("Parameter file must be a flat JSON object: {}", path.display()))?;
    Ok(parameters)
}

fn report_outcome(outcome: PredictOutcome) -> anyhow::Result<()> {
    if let Some((title, text)) = outcome.dialog() {
        let icon = if outcome == PredictOutcome::Normal { "✅" } else { "ℹ️" };
        println!("\n{} {}\n   {}", icon, title, text);
    }
    if let Some(message) = outcome.toast() {
        bail!(message);
    }
    Ok(())
}
