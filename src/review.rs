//! Interactive review of extracted parameters
//!
//! Walks every field in extraction order, lets the user edit it in place, and
//! shows the field's validation message right after each edit.

use crate::backend::ReportBackend;
use crate::controller::DetectionFlow;
use crate::error::{DetectError, Result};
use dialoguer::{Confirm, Input};
use thalassemia_common::FormValidation;

/// What the user chose at the end of the review
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Detect,
    Cancel,
}

/// One line per field: `  Name: value` plus `⚠ message` when invalid.
pub fn format_fields(form: &FormValidation) -> Vec<String> {
    form.data()
        .iter()
        .map(|(field, value)| match form.error(field) {
            Some(message) => format!("  {}: {}  ⚠ {}", field, value, message),
            None => format!("  {}: {}", field, value),
        })
        .collect()
}

pub fn print_form(form: &FormValidation) {
    for line in format_fields(form) {
        println!("{}", line);
    }
}

pub fn run_interactive_review<B: ReportBackend>(flow: &mut DetectionFlow<B>) -> Result<ReviewDecision> {
    let fields: Vec<(String, String)> = flow
        .form()
        .data()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    println!("📝 Review & update extracted parameters ({} fields)", fields.len());
    println!("---");
    println!("Press [Enter] to keep a value, or type a new one");
    println!("---\n");

    for (count, (field, current)) in fields.iter().enumerate() {
        let value: String = Input::new()
            .with_prompt(format!("[{}/{}] {}", count + 1, fields.len(), field))
            .with_initial_text(current.clone())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| DetectError::Prompt(e.to_string()))?;

        flow.on_field_change(field, &value);

        if let Some(message) = flow.form().error(field) {
            println!("  ⚠ {}", message);
        }
    }

    println!();
    print_form(flow.form());
    println!();

    let detect = Confirm::new()
        .with_prompt("Submit for detection?")
        .default(true)
        .interact()
        .map_err(|e| DetectError::Prompt(e.to_string()))?;

    Ok(if detect {
        ReviewDecision::Detect
    } else {
        ReviewDecision::Cancel
    })
}
