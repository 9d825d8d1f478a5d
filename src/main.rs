mod cli;

use fileforge::convert::{self, BatchOutput, Converter, UploadItem};
use fileforge::{config, server};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on the
    // verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "fileforge=trace,tower_http=debug".to_string()
        } else {
            "fileforge=debug,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::Convert { input, output } => convert_file(&input, output.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("fileforge {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn start_server(host: String, port: u16, config_path: Option<&Path>) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    // Override host/port from CLI if specified
    config.server.host = host;
    config.server.port = port;

    tracing::info!("Starting fileforge server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    server::start_server(config).await
}

fn convert_file(input: &Path, output: Option<&Path>) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {:?}", input);
    }

    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let converter: &'static Converter = match extension.as_str() {
        "csv" => &convert::CSV_TO_XLSX,
        "png" => &convert::PNG_TO_WEBP,
        "webp" => &convert::WEBP_TO_PNG,
        "pdf" => &convert::PDF_TO_PNG,
        other => anyhow::bail!("Unsupported input extension: {:?}", other),
    };

    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned());
    let media_type = converter.accepted_types.first().map(|t| t.to_string());
    let bytes = std::fs::read(input)?;

    let item = UploadItem::new(name, media_type, bytes);
    let batch_output = convert::convert_batch(&[item], converter)?;

    let (default_name, bytes) = match batch_output {
        BatchOutput::Single { name, bytes, .. } => (name, bytes),
        BatchOutput::Archive { bytes } => (convert::batch::ARCHIVE_NAME.to_string(), bytes),
    };

    let target = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| input.with_file_name(&default_name));

    std::fs::write(&target, bytes)?;
    println!("Wrote {}", target.display());

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!("  Upload limit: {} bytes", config.limits.max_upload_bytes);
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Server: {}:{}", config.server.host, config.server.port);
        }
    }

    Ok(())
}
