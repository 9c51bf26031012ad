use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use evalai_client::models::timestamp::parse_timestamp;
use evalai_client::models::{GithubSubmission, Hackathon, HackathonUpdate, ResourceId, SubmissionUpload};
use evalai_client::{ApiClient, Settings};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "evalai")]
#[command(about = "Command-line client for the EvalAI hackathon evaluation API", long_about = None)]
struct Cli {
    /// API root, overriding configuration (e.g. http://localhost:5000/api)
    #[arg(short = 'u', long, env = "EVALAI_API_URL")]
    api_url: Option<String>,

    /// Configuration file to load instead of config/default + config/local
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage hackathons
    #[command(subcommand)]
    Hackathons(HackathonCommand),
    /// List and submit projects
    #[command(subcommand)]
    Submissions(SubmissionCommand),
    /// Inspect and trigger evaluations
    #[command(subcommand)]
    Evaluations(EvaluationCommand),
}

#[derive(Subcommand)]
enum HackathonCommand {
    /// List all hackathons
    List,
    /// Show one hackathon
    Get { id: ResourceId },
    /// Create a hackathon
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        prompt: String,
        #[arg(long)]
        host_email: Option<String>,
        #[arg(long, value_parser = parse_deadline)]
        deadline: Option<DateTime<Utc>>,
        /// Criteria as a JSON array
        #[arg(long)]
        criteria: Option<String>,
    },
    /// Update selected fields of a hackathon
    Update {
        id: ResourceId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        prompt: Option<String>,
        #[arg(long)]
        host_email: Option<String>,
        #[arg(long, value_parser = parse_deadline)]
        deadline: Option<DateTime<Utc>>,
        /// Criteria as a JSON array
        #[arg(long)]
        criteria: Option<String>,
    },
    /// Delete a hackathon
    Delete { id: ResourceId },
}

#[derive(Subcommand)]
enum SubmissionCommand {
    /// List submissions for a hackathon
    List { hackathon_id: ResourceId },
    /// Show one submission
    Get {
        hackathon_id: ResourceId,
        submission_id: ResourceId,
    },
    /// Upload project files
    Upload {
        hackathon_id: ResourceId,
        #[command(flatten)]
        upload: UploadArgs,
    },
    /// Submit a repository URL
    Github {
        hackathon_id: ResourceId,
        #[arg(long)]
        team: String,
        #[arg(long)]
        project: String,
        #[arg(long)]
        url: String,
    },
    /// Upload project files and evaluate them in one request
    Create {
        hackathon_id: ResourceId,
        #[command(flatten)]
        upload: UploadArgs,
    },
}

#[derive(Args)]
struct UploadArgs {
    #[arg(long)]
    team: String,
    #[arg(long)]
    project: String,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    email: Option<String>,
    /// Files to attach
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

impl UploadArgs {
    async fn into_upload(self) -> std::io::Result<SubmissionUpload> {
        let mut upload = SubmissionUpload::new(self.team, self.project);
        if let Some(description) = self.description {
            upload = upload.description(description);
        }
        if let Some(email) = self.email {
            upload = upload.participant_email(email);
        }
        for path in self.files {
            upload = upload.attach_path(path).await?;
        }
        Ok(upload)
    }
}

#[derive(Subcommand)]
enum EvaluationCommand {
    /// Show the evaluation of a submission
    Get { submission_id: ResourceId },
    /// Show the leaderboard of a hackathon
    Leaderboard { hackathon_id: ResourceId },
    /// Re-run the evaluation of a submission
    Trigger { submission_id: ResourceId },
    /// Show a submission with its evaluation and hackathon
    Report { submission_id: ResourceId },
}

fn parse_deadline(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp(raw).ok_or_else(|| format!("invalid timestamp: {}", raw))
}

fn parse_criteria(raw: Option<String>) -> Result<Option<Vec<Value>>, String> {
    raw.map(|raw| {
        serde_json::from_str(&raw).map_err(|e| format!("criteria must be a JSON array: {}", e))
    })
    .transpose()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    if let Some(api_url) = cli.api_url {
        settings.api.base_url = api_url;
    }

    init_logging(&settings);

    let client = ApiClient::from_settings(&settings.api)?;
    info!(base_url = %client.base_url(), "EvalAI client ready");

    match cli.command {
        Commands::Hackathons(command) => run_hackathons(&client, command).await,
        Commands::Submissions(command) => run_submissions(&client, command).await,
        Commands::Evaluations(command) => run_evaluations(&client, command).await,
    }
}

/// Logs go to stderr so stdout stays valid JSON
fn init_logging(settings: &Settings) {
    // LOG_LEVEL / LOG_FORMAT take precedence over the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

async fn run_hackathons(
    client: &ApiClient,
    command: HackathonCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let hackathons = client.hackathons();

    match command {
        HackathonCommand::List => print_json(&hackathons.list().await?),
        HackathonCommand::Get { id } => print_json(&hackathons.get(id).await?),
        HackathonCommand::Create {
            name,
            description,
            prompt,
            host_email,
            deadline,
            criteria,
        } => {
            let hackathon = Hackathon {
                host_email,
                deadline,
                criteria: parse_criteria(criteria)?,
                ..Hackathon::new(name, description, prompt)
            };
            print_json(&hackathons.create(&hackathon).await?)
        }
        HackathonCommand::Update {
            id,
            name,
            description,
            prompt,
            host_email,
            deadline,
            criteria,
        } => {
            let update = HackathonUpdate {
                name,
                description,
                evaluation_prompt: prompt,
                criteria: parse_criteria(criteria)?,
                host_email,
                deadline,
            };
            if update.is_empty() {
                return Err("nothing to update: pass at least one field".into());
            }
            print_json(&hackathons.update(id, &update).await?)
        }
        HackathonCommand::Delete { id } => {
            hackathons.delete(id).await?;
            info!(id, "Hackathon deleted");
            Ok(())
        }
    }
}

async fn run_submissions(
    client: &ApiClient,
    command: SubmissionCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let submissions = client.submissions();

    match command {
        SubmissionCommand::List { hackathon_id } => print_json(&submissions.list(hackathon_id).await?),
        SubmissionCommand::Get {
            hackathon_id,
            submission_id,
        } => print_json(&submissions.get(hackathon_id, submission_id).await?),
        SubmissionCommand::Upload {
            hackathon_id,
            upload,
        } => {
            let upload = upload.into_upload().await?;
            info!(files = upload.files.len(), "Uploading submission");
            print_json(&submissions.upload(hackathon_id, upload).await?)
        }
        SubmissionCommand::Github {
            hackathon_id,
            team,
            project,
            url,
        } => {
            let body = GithubSubmission::new(team, project, url);
            print_json(&submissions.submit_with_github(hackathon_id, &body).await?)
        }
        SubmissionCommand::Create {
            hackathon_id,
            upload,
        } => {
            let upload = upload.into_upload().await?;
            info!(files = upload.files.len(), "Creating and evaluating submission");
            print_json(&submissions.create_and_evaluate(hackathon_id, upload).await?)
        }
    }
}

async fn run_evaluations(
    client: &ApiClient,
    command: EvaluationCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let evaluations = client.evaluations();

    match command {
        EvaluationCommand::Get { submission_id } => print_json(&evaluations.get(submission_id).await?),
        EvaluationCommand::Leaderboard { hackathon_id } => {
            print_json(&evaluations.leaderboard(hackathon_id).await?)
        }
        EvaluationCommand::Trigger { submission_id } => {
            print_json(&evaluations.trigger(submission_id).await?)
        }
        EvaluationCommand::Report { submission_id } => {
            print_json(&evaluations.result(submission_id).await?)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
