use std::io::Write;
use std::path::PathBuf;

use alibi_bedrock::client::BedrockGenerator;
use alibi_cli::config::{self, AlibiConfig, CredentialSource, Overrides, Settings};
use alibi_cli::controller::GeneratorController;
use alibi_cli::emergency::LoggingChannel;
use alibi_cli::{aws, commands};
use alibi_core::models::contact::EmergencyContact;
use alibi_storage::excuses::ExcuseStore;
use alibi_storage::kv::FileStore;
use clap::{Parser, Subcommand};
use eyre::Result;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "alibi")]
#[command(about = "Generate, save and manage plausible excuses")]
#[command(version)]
struct Cli {
    /// Storage directory for saved excuses
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Bedrock inference profile ID
    #[arg(long, global = true)]
    model: Option<String>,

    /// AWS region
    #[arg(long, global = true)]
    region: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session (default)
    Shell,

    /// Generate one excuse
    Generate {
        /// work, school, social or family
        #[arg(short, long, default_value = "work")]
        context: String,

        /// High, Medium or Low
        #[arg(short, long, default_value = "")]
        urgency: String,

        /// "Very Believable", "Somewhat Believable" or "A Little Stretchy"
        #[arg(short, long, default_value = "")]
        believability: String,

        /// Save the generated excuse
        #[arg(short, long)]
        save: bool,
    },

    /// List saved excuses, newest first
    List,

    /// Delete a saved excuse
    Delete {
        id: String,
    },

    /// Reach an emergency contact
    Emergency {
        #[command(subcommand)]
        action: EmergencyAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum EmergencyAction {
    /// Send a text message
    Message {
        name: String,
        phone: String,
        message: String,
    },
    /// Place a voice call
    Call { name: String, phone: String },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration (credentials redacted)
    Show,
    /// Write a config file
    Init {
        #[arg(long, default_value = config::DEFAULT_REGION)]
        region: String,
        /// Use a named AWS profile instead of the default credential chain
        #[arg(long)]
        profile: Option<String>,
    },
    /// Validate AWS credentials with STS
    Check,
    /// Delete the config file
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let file_config = config::load_config_lenient(&config::config_path()?);
    let overrides = Overrides {
        region: cli.region.clone(),
        model_id: cli.model.clone(),
        data_dir: cli.data_dir.clone(),
    };
    let settings = config::resolve_settings(
        file_config.as_ref(),
        |key| std::env::var(key).ok(),
        &overrides,
        config::default_data_dir()?,
    );
    tracing::debug!(
        data_dir = %settings.data_dir.display(),
        region = %settings.region,
        model_id = %settings.model_id,
        "settings resolved"
    );

    let mut out = std::io::stdout().lock();

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let mut controller = GeneratorController::new(build_generator(&settings).await);
            let mut store = open_store(&settings);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            commands::run_shell(&mut controller, &mut store, stdin, &mut out).await?;
        }
        Commands::Generate {
            context,
            urgency,
            believability,
            save,
        } => {
            let mut controller = GeneratorController::new(build_generator(&settings).await);
            let form = controller.form_mut();
            form.context = context;
            form.urgency = urgency;
            form.believability = believability;

            let mut store = open_store(&settings);
            if !commands::generate(&mut controller, &mut store, save, &mut out).await? {
                out.flush()?;
                std::process::exit(1);
            }
        }
        Commands::List => {
            let store = open_store(&settings);
            commands::list(&store, &mut out, jiff::Timestamp::now())?;
        }
        Commands::Delete { id } => {
            let mut store = open_store(&settings);
            commands::delete(&mut store, &id, &mut out)?;
        }
        Commands::Emergency { action } => match action {
            EmergencyAction::Message {
                name,
                phone,
                message,
            } => {
                let contact = EmergencyContact::new(name, phone);
                commands::emergency_message(&LoggingChannel, &contact, &message, &mut out).await?;
            }
            EmergencyAction::Call { name, phone } => {
                let contact = EmergencyContact::new(name, phone);
                commands::emergency_call(&LoggingChannel, &contact, &mut out).await?;
            }
        },
        Commands::Config { action } => {
            run_config(action, file_config.as_ref(), &settings, &mut out).await?;
        }
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn build_generator(settings: &Settings) -> BedrockGenerator {
    let sdk_config = aws::sdk_config(settings).await;
    let generator = BedrockGenerator::from_config(&sdk_config, settings.model_id.clone());
    tracing::info!(model_id = %generator.model_id(), region = %settings.region, "bedrock generator ready");
    generator
}

fn open_store(settings: &Settings) -> ExcuseStore<FileStore> {
    ExcuseStore::load(FileStore::new(&settings.data_dir))
}

async fn run_config(
    action: ConfigAction,
    file_config: Option<&AlibiConfig>,
    settings: &Settings,
    out: &mut impl Write,
) -> Result<()> {
    match action {
        ConfigAction::Show => match file_config {
            Some(file_config) => {
                let info = config::config_info(file_config, settings);
                writeln!(out, "{}", serde_json::to_string_pretty(&info)?)?;
            }
            None => {
                writeln!(out, "No usable config file; using defaults.")?;
                writeln!(out, "region:   {}", settings.region)?;
                writeln!(out, "model_id: {}", settings.model_id)?;
                writeln!(out, "data_dir: {}", settings.data_dir.display())?;
            }
        },
        ConfigAction::Init { region, profile } => {
            let credentials = match profile {
                Some(profile_name) => CredentialSource::Profile { profile_name },
                None => CredentialSource::DefaultChain,
            };
            config::save_config(&AlibiConfig::new(region, credentials))?;
            writeln!(out, "Config written to {}.", config::config_path()?.display())?;
        }
        ConfigAction::Check => {
            let sdk_config = aws::sdk_config(settings).await;
            let identity = aws::caller_identity(&sdk_config).await?;
            writeln!(out, "Authenticated as {} (account {}).", identity.arn, identity.account_id)?;
        }
        ConfigAction::Reset => {
            config::delete_config()?;
            writeln!(out, "Config removed.")?;
        }
    }
    Ok(())
}
