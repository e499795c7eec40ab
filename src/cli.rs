use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "thalassemia-detect")]
#[command(about = "Blood report parameter extraction and thalassemia carrier detection", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload a report, review the extracted parameters, and run detection
    Detect {
        /// Blood report (PDF or image)
        #[arg(required = true)]
        file: PathBuf,

        /// Submit the extracted parameters without reviewing them
        #[arg(short, long)]
        yes: bool,

        /// Cancel instead of submitting when the donor fields fail validation
        #[arg(long)]
        strict: bool,
    },

    /// Upload a report and save the extracted parameters as JSON
    Extract {
        /// Blood report (PDF or image)
        #[arg(required = true)]
        file: PathBuf,

        /// Output JSON file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run detection on a saved parameter JSON file
    Predict {
        /// Parameter JSON file (flat object)
        #[arg(required = true)]
        input: PathBuf,
    },

    /// Check a saved parameter JSON file against the field rules
    Validate {
        /// Parameter JSON file (flat object)
        #[arg(required = true)]
        input: PathBuf,
    },

    /// Show or edit settings
    Config {
        /// Set the backend base URL
        #[arg(long)]
        set_base_url: Option<String>,

        /// Show settings
        #[arg(long)]
        show: bool,
    },
}
