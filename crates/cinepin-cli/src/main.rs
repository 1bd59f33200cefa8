//! Cinepin CLI, registers movie content on content-addressable storage.
//!
//! Set PINATA_JWT for the fallback provider; ORIGIN_API_BASE, PINATA_API_BASE,
//! CAMP_CHAIN_ID, MAX_FILE_SIZE_MB, ALLOWED_CONTENT_TYPES and
//! HTTP_TIMEOUT_SECS override the defaults.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use cinepin_cli::{init_tracing, parse_meta_arg};
use cinepin_core::{Config, GatewayPreference, UploadRequest, ValidationPolicy};
use cinepin_registry::{create_orchestrator, gateway, OriginClient, PinataClient, ProviderKind};

#[derive(Parser)]
#[command(name = "cinepin", about = "Content registration & retrieval CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a file, falling back to the pin provider if the primary fails
    Upload {
        /// Path to the file to upload
        file: PathBuf,
        /// Declared content type (e.g. video/mp4)
        #[arg(long, default_value = "application/octet-stream")]
        content_type: String,
        /// Metadata tags as key=value (repeatable)
        #[arg(long = "meta")]
        meta: Vec<String>,
        /// Try this provider first: origin or pinata
        #[arg(long)]
        provider: Option<ProviderKind>,
    },
    /// Pin a JSON document from a file
    PinJson {
        /// Path to the JSON file
        file: PathBuf,
        /// Name to record with the pin
        #[arg(long)]
        name: String,
    },
    /// Resolve a CID to a gateway URL
    Resolve {
        /// Content identifier
        cid: String,
        /// Gateway preference: origin, pinata, ipfs, or cloudflare
        #[arg(long, default_value = "origin")]
        gateway: String,
    },
    /// Check whether a CID is registered on the network
    Verify {
        /// Content identifier
        cid: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Upload {
            file,
            content_type,
            meta,
            provider,
        } => {
            let mut metadata = BTreeMap::new();
            for arg in &meta {
                let (key, value) = parse_meta_arg(arg).map_err(|e| anyhow::anyhow!(e))?;
                metadata.insert(key, value);
            }

            let request = UploadRequest::from_path(&file, content_type)
                .await
                .with_context(|| format!("Failed to read file: {}", file.display()))?
                .with_metadata(metadata);

            let policy = ValidationPolicy::new(
                config.max_file_size_bytes,
                config.allowed_content_types.clone(),
            );

            let orchestrator = create_orchestrator(&config)?;
            let result = orchestrator.upload(&request, &policy, provider).await?;

            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::PinJson { file, name } => {
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read file: {}", file.display()))?;
            let content: serde_json::Value =
                serde_json::from_str(&text).context("File is not valid JSON")?;

            let credential = config
                .pinata_jwt
                .as_ref()
                .context("PINATA_JWT not configured")?;
            let client =
                PinataClient::new(config.pinata_api_base.clone(), credential, config.http_timeout)?;

            let cid = client.pin_json(&content, &name).await?;
            println!("{}", cid);
        }
        Commands::Resolve { cid, gateway: pref } => {
            // unknown preference strings resolve to the default gateway
            let preference: GatewayPreference = pref.parse().unwrap_or_default();
            println!("{}", gateway::resolve(&cid, preference));
        }
        Commands::Verify { cid } => {
            let client = OriginClient::new(
                config.origin_api_base.clone(),
                config.chain_id,
                config.http_timeout,
            )?;
            let registered = client.verify(&cid).await?;
            println!("{}", if registered { "registered" } else { "not found" });
            if !registered {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
