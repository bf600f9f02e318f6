//! Command implementations for the ESG CLI.
//!
//! Provides subcommands for the energy and soil-carbon dashboards and for
//! managing documents in the ESG library.

use chrono::{Datelike, Local};
use clap::{Subcommand, ValueEnum};
use esg_api::client::ClientConfig;
use std::path::PathBuf;

pub mod dashboard;
pub mod library;
pub mod screen;
pub mod source;
pub mod tabs;

/// Energy dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnergyView {
    Overview,
    Mix,
    Grid,
    Trends,
    Metrics,
}

/// Soil-carbon dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SoilView {
    Overview,
    Analytics,
    Yearly,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the energy consumption and renewables dashboard
    Energy {
        /// Company identifier
        #[arg(short = 'c', long)]
        company: String,

        /// Reporting year (defaults to the current year)
        #[arg(short = 'y', long)]
        year: Option<i32>,

        /// Only render this view (all views when omitted)
        #[arg(short = 't', long, value_enum)]
        tab: Option<EnergyView>,

        /// Open the detail view for a metric, e.g. "Coal Consumption"
        #[arg(short = 'd', long)]
        detail: Option<String>,

        /// Read a saved response instead of calling the API
        #[arg(long)]
        from_file: Option<PathBuf>,
    },

    /// Show the soil health and carbon dashboard
    Soil {
        /// Company identifier
        #[arg(short = 'c', long)]
        company: String,

        /// Reporting year (defaults to the current year)
        #[arg(short = 'y', long)]
        year: Option<i32>,

        /// Only render this view (all views when omitted)
        #[arg(short = 't', long, value_enum)]
        tab: Option<SoilView>,

        /// Open the detail view for a field (e.g. "ndvi_max") or a month (e.g. "2024-08")
        #[arg(short = 'd', long)]
        detail: Option<String>,

        /// Compute Pearson correlations from the monthly samples instead of
        /// showing the illustrative table
        #[arg(long)]
        computed_correlations: bool,

        /// Read a saved response instead of calling the API
        #[arg(long)]
        from_file: Option<PathBuf>,
    },

    /// Create or update documents in the ESG library
    LibraryBook {
        #[command(subcommand)]
        action: library::LibraryBookAction,
    },
}

fn current_year() -> i32 {
    Local::now().naive_local().date().year()
}

pub async fn run(command: Command, config: ClientConfig) -> anyhow::Result<()> {
    match command {
        Command::Energy {
            company,
            year,
            tab,
            detail,
            from_file,
        } => {
            let year = year.unwrap_or_else(current_year);
            let output = dashboard::run_energy(
                &config,
                &company,
                year,
                tab,
                detail.as_deref(),
                from_file.as_deref(),
            )
            .await?;
            println!("{}", output);
            Ok(())
        }
        Command::Soil {
            company,
            year,
            tab,
            detail,
            computed_correlations,
            from_file,
        } => {
            let year = year.unwrap_or_else(current_year);
            let output = dashboard::run_soil(
                &config,
                &company,
                year,
                tab,
                detail.as_deref(),
                computed_correlations,
                from_file.as_deref(),
            )
            .await?;
            println!("{}", output);
            Ok(())
        }
        Command::LibraryBook { action } => library::run_library_book(&config, action).await,
    }
}
