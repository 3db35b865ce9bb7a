use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

mod analytics;
mod api;
mod dashboard;
mod filter;
mod ingest;
mod models;
mod options;
mod report;
mod resolve;
mod stats;

use dashboard::{DashboardEvent, DashboardState, ReadyState};
use models::FilterCriteria;

const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Parser)]
#[command(name = "asc-survey-dashboard")]
#[command(about = "Filterable metrics over ASC mentored-project survey responses", long_about = None)]
struct Cli {
    /// Load the session snapshot from a CSV export instead of the API
    #[arg(long, global = true)]
    csv: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify the backend API is reachable
    Check,
    /// Print summary statistics for the filtered responses
    Summary {
        #[arg(long)]
        mentor: Option<String>,
        #[arg(long)]
        topic: Option<String>,
        #[arg(long)]
        project_name: Option<String>,
        #[arg(long)]
        start_date: Option<NaiveDate>,
        #[arg(long)]
        end_date: Option<NaiveDate>,
    },
    /// List the filter options reachable under the current selection
    Options {
        #[arg(long)]
        mentor: Option<String>,
        #[arg(long)]
        topic: Option<String>,
        #[arg(long)]
        project_name: Option<String>,
        #[arg(long)]
        start_date: Option<NaiveDate>,
        #[arg(long)]
        end_date: Option<NaiveDate>,
    },
    /// Generate a markdown report for the filtered responses
    Report {
        #[arg(long)]
        mentor: Option<String>,
        #[arg(long)]
        topic: Option<String>,
        #[arg(long)]
        project_name: Option<String>,
        #[arg(long)]
        start_date: Option<NaiveDate>,
        #[arg(long)]
        end_date: Option<NaiveDate>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let api_url =
        std::env::var("ASC_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

    match cli.command {
        Commands::Check => {
            let client = api::ApiClient::new(&api_url);
            client.check().await?;
            println!("Survey API at {api_url} is reachable.");
        }
        Commands::Summary {
            mentor,
            topic,
            project_name,
            start_date,
            end_date,
        } => {
            let criteria = FilterCriteria {
                mentor,
                topic,
                project_name,
                start_date,
                end_date,
            };
            let ready = load_session(cli.csv.as_deref(), &api_url, criteria).await?;
            print_summary(&ready);
        }
        Commands::Options {
            mentor,
            topic,
            project_name,
            start_date,
            end_date,
        } => {
            let criteria = FilterCriteria {
                mentor,
                topic,
                project_name,
                start_date,
                end_date,
            };
            let ready = load_session(cli.csv.as_deref(), &api_url, criteria).await?;
            print_options(&ready);
        }
        Commands::Report {
            mentor,
            topic,
            project_name,
            start_date,
            end_date,
            out,
        } => {
            let criteria = FilterCriteria {
                mentor,
                topic,
                project_name,
                start_date,
                end_date,
            };
            let ready = load_session(cli.csv.as_deref(), &api_url, criteria).await?;
            let report = report::build_report(&ready.filters, ready.responses.len(), &ready.view);
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

/// Drive the session state machine through one fetch and one filter change,
/// from either the API or a local CSV snapshot.
async fn load_session(
    csv: Option<&Path>,
    api_url: &str,
    criteria: FilterCriteria,
) -> anyhow::Result<ReadyState> {
    let state = dashboard::reduce(DashboardState::Uninitialized, DashboardEvent::FetchStarted);

    let fetched = match csv {
        Some(path) => ingest::read_snapshot(path),
        None => {
            let client = api::ApiClient::new(api_url);
            client.fetch_responses().await
        }
    };

    let state = match fetched {
        Ok(responses) => dashboard::reduce(state, DashboardEvent::FetchSucceeded(responses)),
        Err(err) => dashboard::reduce(state, DashboardEvent::FetchFailed(format!("{err:#}"))),
    };
    let state = dashboard::reduce(state, DashboardEvent::FiltersChanged(criteria));

    match state {
        DashboardState::Ready(ready) => Ok(ready),
        DashboardState::Error { message } => {
            anyhow::bail!("failed to fetch dashboard data: {message}. Retry once the backend is reachable.")
        }
        _ => anyhow::bail!("dashboard did not finish loading"),
    }
}

fn print_summary(ready: &ReadyState) {
    let stats = &ready.view.stats;
    let analytics = &ready.view.analytics;

    if stats.total_responses == 0 {
        println!("No responses match these filters.");
        return;
    }

    println!(
        "Survey responses: {} total ({} starting, {} ending)",
        stats.total_responses, stats.starting_responses, stats.ending_responses
    );
    println!("Completion rate: {:.2}%", stats.completion_rate);

    println!("Experience ratings:");
    for field in &stats::RATING_FIELDS {
        match stats.average_ratings.get(field.key) {
            Some(average) => println!("- {}: {:.2}", field.label, average),
            None => println!("- {}: n/a", field.label),
        }
    }

    match stats.average_recommendation {
        Some(average) => println!("Average recommendation: {average:.2}"),
        None => println!("Average recommendation: n/a"),
    }

    let scaled = [
        ("Hard skills improved", &analytics.hard_skills_improvement),
        ("Soft skills improved", &analytics.soft_skills_improvement),
        ("Confidence in job placement", &analytics.confidence_levels),
    ];
    for (label, values) in scaled {
        match stats::mean(values) {
            Some(average) => {
                println!("{label}: {average:.2} across {} responses", values.len());
            }
            None => println!("{label}: n/a"),
        }
    }
}

fn print_options(ready: &ReadyState) {
    let options = &ready.view.options;

    println!("Mentors:");
    for mentor in &options.mentors {
        println!("- {mentor}");
    }

    println!("Topics:");
    for topic in &options.topics {
        println!("- {topic}");
    }

    println!("Projects (narrowed by the current selection):");
    if options.projects.is_empty() {
        println!("- none");
    } else {
        for project in &options.projects {
            println!("- {project}");
        }
    }
}
