use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use std::process::ExitCode;
use tracing::{error, info};

use civic_info::config::Config;
use civic_info::constants::CANDIDATES_DATASET;
use civic_info::dataset::{DatasetStore, MatchOptions};
use civic_info::domain::{CandidateField, CandidateRecord, Record};
use civic_info::eligibility::{self, QuizAnswers};
use civic_info::gateway::{CivicClient, ElectionSelector};
use civic_info::{logging, voting_info, CivicError, ResultEnvelope};

#[derive(Parser)]
#[command(name = "civic-info")]
#[command(about = "Civic information lookups: polling places, representatives, candidates and terms")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up polling places and early voting sites for an address
    Polling {
        #[arg(long)]
        address: String,
        /// Election to query; defaults to CIVICS_ELECTION_ID, then discovery
        #[arg(long, conflicts_with = "discover")]
        election_id: Option<String>,
        /// Always discover the upcoming election, ignoring configuration
        #[arg(long)]
        discover: bool,
    },
    /// Look up elected representatives for an address
    Representatives {
        #[arg(long)]
        address: String,
    },
    /// List elections known to the civic-information service
    Elections,
    /// Print a raw dataset file
    Dataset { name: String },
    /// List candidates, optionally keeping only some attributes
    Candidates {
        /// Comma-separated attribute names, e.g. name,party
        #[arg(long, value_delimiter = ',')]
        attributes: Vec<String>,
    },
    /// Search candidates by one attribute
    FindCandidate {
        #[arg(long)]
        attribute: String,
        #[arg(long)]
        value: String,
        /// Return every match instead of the first
        #[arg(long)]
        all: bool,
        #[arg(long)]
        case_sensitive: bool,
    },
    /// Show glossary terms
    Glossary {
        /// Only terms in this category ("all" for every term)
        #[arg(long)]
        category: Option<String>,
        /// List the categories instead of terms
        #[arg(long)]
        categories: bool,
    },
    /// Evaluate the voter eligibility quiz
    Quiz {
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        citizenship: Option<String>,
        #[arg(long)]
        registered: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        election_type: Option<String>,
    },
    /// Show voting requirements, steps and important dates
    VotingInfo {
        /// Only describe one requirement, e.g. age or id_required
        #[arg(long)]
        requirement: Option<String>,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_envelope<T: Serialize>(envelope: &ResultEnvelope<T>) -> anyhow::Result<ExitCode> {
    print_json(envelope)?;
    Ok(if envelope.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn gateway_client(config: &Config) -> anyhow::Result<CivicClient> {
    config.validate()?;
    Ok(CivicClient::from_config(config)?)
}

// Ids are integers in the dataset; every other candidate field is text.
fn candidate_needle(attribute: &str, raw: &str) -> civic_info::Result<Value> {
    match CandidateRecord::parse_field(attribute)? {
        CandidateField::Id => raw
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|e| CivicError::Config(format!("candidate id must be a whole number: {}", e))),
        _ => Ok(Value::String(raw.to_string())),
    }
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<ExitCode> {
    let store = DatasetStore::from_config(&config.datasets);

    match cli.command {
        Commands::Polling {
            address,
            election_id,
            discover,
        } => {
            let client = gateway_client(&config)?;
            let selector = match (election_id, discover) {
                (Some(id), _) => ElectionSelector::Id(id),
                (None, true) => ElectionSelector::Discover,
                (None, false) => client.default_selector(),
            };
            let envelope = client.fetch_polling_locations(&address, selector).await;
            print_envelope(&envelope)
        }
        Commands::Representatives { address } => {
            let client = gateway_client(&config)?;
            let envelope = client.fetch_representatives(&address).await;
            print_envelope(&envelope)
        }
        Commands::Elections => {
            let client = gateway_client(&config)?;
            let envelope = client.fetch_elections().await;
            print_envelope(&envelope)
        }
        Commands::Dataset { name } => {
            print_json(&store.load_dataset(&name)?)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Candidates { attributes } => {
            let attributes = (!attributes.is_empty()).then_some(attributes.as_slice());
            print_json(&store.project_attributes(CandidateRecord::DATASET, attributes)?)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::FindCandidate {
            attribute,
            value,
            all,
            case_sensitive,
        } => {
            let needle = candidate_needle(&attribute, &value)?;
            let options = MatchOptions {
                unique: !all,
                case_sensitive,
            };
            let found = store.find_by_attribute(CANDIDATES_DATASET, &attribute, &needle, options)?;
            info!(attribute = %attribute, found = !found.is_empty(), "Candidate search");
            print_json(&found)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Glossary {
            category,
            categories,
        } => {
            if categories {
                print_json(&store.glossary_categories()?)?;
            } else {
                let category = category.as_deref().filter(|c| *c != "all");
                print_json(&store.glossary_terms(category)?)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Quiz {
            age,
            citizenship,
            registered,
            address,
            election_type,
        } => {
            let answers = QuizAnswers {
                age,
                citizenship,
                registered,
                address,
                election_type,
            };
            let outcome = eligibility::evaluate(&answers);
            print_json(&serde_json::json!({
                "result": outcome,
                "message": outcome.message(),
                "next": outcome.next_page(),
            }))?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::VotingInfo { requirement: Some(key) } => match voting_info::requirement(&key) {
            Some(description) => {
                print_json(&serde_json::json!({ "requirement": key, "description": description }))?;
                Ok(ExitCode::SUCCESS)
            }
            None => {
                eprintln!("Unknown requirement '{}'", key);
                Ok(ExitCode::FAILURE)
            }
        },
        Commands::VotingInfo { requirement: None } => {
            print_json(&serde_json::json!({
                "guide": voting_info::guide(),
                "key_issues": voting_info::KEY_ISSUES,
            }))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Before logging so RUST_LOG from .env reaches the filter
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::load()?;
    logging::init_logging(&config.logging);

    match run(cli, config).await {
        Ok(code) => Ok(code),
        Err(e) => match e.downcast_ref::<CivicError>() {
            Some(civic) if civic.is_data_unavailable() => {
                error!("Data unavailable: {}", civic);
                eprintln!("Data unavailable: {}", civic);
                Ok(ExitCode::from(3))
            }
            _ => Err(e),
        },
    }
}
