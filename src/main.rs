use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cfdns::{config::Settings, CloudflareClient, RegistrationRequest, Registrar};

#[derive(Parser)]
#[command(name = "cfdns")]
#[command(about = "Create or update DNS records on Cloudflare by domain name")]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the record, or update it when one with the same name exists
    Register {
        /// Fully-qualified domain name (e.g., www.example.com)
        domain: String,

        /// Record content (e.g., the CNAME target)
        content: String,

        /// Record type, sent verbatim
        #[arg(long = "type", default_value = "CNAME")]
        record_type: String,

        /// Time to live in seconds (1 = automatic)
        #[arg(long)]
        ttl: Option<u32>,

        /// Proxy traffic through Cloudflare
        #[arg(long)]
        proxied: bool,
    },

    /// Show the record currently registered for a domain name
    Lookup {
        /// Fully-qualified domain name
        domain: String,
    },

    /// Show configuration file location and contents
    Config,
}

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_registrar(settings: &Settings) -> Result<Registrar<CloudflareClient>> {
    let credentials = settings.credentials()?;
    let client = CloudflareClient::new(credentials, settings.client_options())
        .context("Failed to create Cloudflare client")?;
    Ok(Registrar::new(client))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(Settings::config_path);
    let settings = Settings::load_with_env(&config_path)?;

    init_logging(&settings.log_level);

    match cli.command {
        Commands::Register {
            domain,
            content,
            record_type,
            ttl,
            proxied,
        } => {
            let registrar = build_registrar(&settings)?;

            let mut request = RegistrationRequest::new(&domain, &content, &record_type);
            if let Some(ttl) = ttl {
                request = request.with_ttl(ttl);
            }
            if proxied {
                request = request.with_proxied(true);
            }

            info!("Registering {} {} -> {}", record_type, domain, content);
            let record = registrar
                .register_request(&request)
                .await
                .with_context(|| format!("Failed to register {}", domain))?;

            println!("{}", serde_json::to_string_pretty(&record)?);
        }

        Commands::Lookup { domain } => {
            let registrar = build_registrar(&settings)?;

            match registrar
                .lookup(&domain)
                .await
                .with_context(|| format!("Failed to look up {}", domain))?
            {
                Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
                None => println!("No record registered for {}", domain),
            }
        }

        Commands::Config => {
            show_config(&config_path, &settings)?;
        }
    }

    Ok(())
}

fn show_config(config_path: &std::path::Path, settings: &Settings) -> Result<()> {
    println!("Configuration file location: {}\n", config_path.display());

    if !config_path.exists() {
        println!("Configuration file not found; using defaults and environment.");
        println!("Example configuration:\n");
        println!(
            r#"log_level = "info"

[api]
base_url = "https://api.cloudflare.com/client/v4"
timeout_seconds = 30

[credentials]
email = "you@example.com"
auth_key = "your-global-api-key"
"#
        );
    }

    println!("Effective configuration:\n");
    println!("{}", toml::to_string_pretty(&settings.redacted())?);

    Ok(())
}
