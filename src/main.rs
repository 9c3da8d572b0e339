//! generate-front-api CLI entrypoint
//! Parses command-line arguments, builds the configuration and runs the generator.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use generate_front_api::application::{GenerateApiRequest, GenerateApiUseCase};
use generate_front_api::core::{
    Config, ConfigOverrides, FormattingOverrides, OutputOverrides, load_config,
};
use generate_front_api::infrastructure::openapi::CompositeOpenApiLoader;
use generate_front_api::infrastructure::output::FileSystemOutputService;
use generate_front_api::infrastructure::{
    CommandHooks, FileSystemTemplateLoader, FormatterPostProcessor, ShellCommandExecutor,
};
use std::path::PathBuf;
use std::sync::Arc;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "generate-front-api")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Where the configuration comes from
#[derive(clap::Args, Debug)]
pub struct ConfigLocation {
    /// Project directory; relative paths in the configuration resolve against it
    #[arg(long)]
    workspace: Option<PathBuf>,
    /// Config file to use instead of searching the workspace
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate API modules from the OpenAPI document
    Generate {
        #[command(flatten)]
        location: ConfigLocation,
        /// URL of the OpenAPI document (overrides openApiUrl)
        #[arg(long)]
        url: Option<String>,
        /// Local OpenAPI document (overrides openApiFile)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Root directory of the generated modules (overrides output.baseDir)
        #[arg(long)]
        base_dir: Option<PathBuf>,
        /// Skip the formatter pass
        #[arg(long)]
        no_format: bool,
    },
    /// Print the effective configuration as JSON
    #[command(name = "show-config")]
    ShowConfig {
        #[command(flatten)]
        location: ConfigLocation,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with default level INFO; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            location,
            url,
            file,
            base_dir,
            no_format,
        } => {
            let overrides = command_line_overrides(url, file, base_dir, no_format);
            generate(location, overrides).await?
        }
        Commands::ShowConfig { location } => {
            let (_, config) = resolve_config(&location, ConfigOverrides::default()).await?;
            let json = serde_json::to_string_pretty(&config)
                .context("Failed to serialize configuration")?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Flags as a second override layer on top of the config file
fn command_line_overrides(
    url: Option<String>,
    file: Option<PathBuf>,
    base_dir: Option<PathBuf>,
    no_format: bool,
) -> ConfigOverrides {
    // An explicit local file wins over a URL from the config file
    let open_api_url = url.or_else(|| file.as_ref().map(|_| String::new()));

    ConfigOverrides {
        open_api_file: file,
        open_api_url,
        output: base_dir.map(|base_dir| OutputOverrides {
            base_dir: Some(base_dir),
        }),
        formatting: no_format.then(|| FormattingOverrides {
            run_prettier: Some(false),
            ..Default::default()
        }),
        ..Default::default()
    }
}

async fn resolve_config(
    location: &ConfigLocation,
    overrides: ConfigOverrides,
) -> anyhow::Result<(PathBuf, Config)> {
    let workspace = match &location.workspace {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let config = load_config(&workspace, location.config.as_deref())
        .await
        .context("Failed to load configuration")?
        .merge(overrides)
        .context("Invalid command-line options")?;

    Ok((workspace, config))
}

async fn generate(location: ConfigLocation, overrides: ConfigOverrides) -> anyhow::Result<()> {
    let (workspace, config) = resolve_config(&location, overrides).await?;

    let executor = Arc::new(ShellCommandExecutor::new());
    let use_case = GenerateApiUseCase::new(
        Arc::new(CompositeOpenApiLoader::new()),
        Arc::new(FileSystemTemplateLoader::new()),
        Arc::new(FileSystemOutputService::new()),
        Arc::new(FormatterPostProcessor::new(
            config.formatting.command.clone(),
            executor.clone(),
        )),
        Arc::new(CommandHooks::new(
            config.hooks.clone(),
            workspace.clone(),
            executor,
        )),
    );

    let summary = use_case
        .execute(GenerateApiRequest::new(workspace, config))
        .await
        .context("Failed to generate API modules")?;

    info!(
        modules = summary.module_count,
        files = summary.generated_files.len(),
        "Done"
    );
    Ok(())
}
