use anyhow::Result;
use clap::{CommandFactory, Parser};
use manifest_eda::app::{self, OutputFormat};
use manifest_eda::cli::{Cli, Commands, ConfigAction};
use manifest_eda::config::{Config, DurationPolicy};
use manifest_eda::defaults;
use manifest_eda::output::Reporter;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let reporter = Reporter::new(cli.quiet, cli.verbose);
    reporter.debug(&format!("manifest-eda {}", manifest_eda::version_string()));

    match cli.command {
        None => {
            let config = load_config(&cli)?;
            app::run_all(&config, defaults::HEAD_ROWS, defaults::TOP_WORDS, &reporter)?;
        }
        Some(Commands::Run { head, top }) => {
            let config = load_config(&cli)?;
            app::run_all(&config, head, top, &reporter)?;
        }
        Some(Commands::Info { head }) => {
            let config = load_config(&cli)?;
            app::run_info(&config, head, &reporter)?;
        }
        Some(Commands::Rate {
            ref format,
            bins,
            terminal,
        }) => {
            let mut config = load_config(&cli)?;
            if bins.is_some() {
                config.rate.bins = bins;
            }
            config.validate()?;
            let format: OutputFormat = format.parse()?;
            app::run_rate(&config, format, terminal, &reporter)?;
        }
        Some(Commands::Words {
            top,
            ref format,
            ref stopwords,
        }) => {
            let mut config = load_config(&cli)?;
            config
                .cloud
                .extra_stopwords
                .extend(stopwords.iter().cloned());
            let format: OutputFormat = format.parse()?;
            app::run_words(&config, top, format, &reporter)?;
        }
        Some(Commands::Config { ref action }) => {
            handle_config_command(action, &cli)?;
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "manifest-eda",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

/// Load configuration and apply overrides.
///
/// Priority order (highest first):
/// 1. CLI flags (--manifest, --output-dir, --allow-invalid-duration)
/// 2. Environment variables (MANIFEST_EDA_*)
/// 3. Config file from --config, or the default path if it exists
/// 4. Built-in defaults
fn load_config(cli: &Cli) -> Result<Config> {
    let config = match cli.config.as_deref() {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(&Config::default_path())?,
    };
    let mut config = config.with_env_overrides()?;

    if let Some(manifest) = &cli.manifest {
        config.manifest.path = manifest.clone();
    }
    if let Some(dir) = &cli.output_dir {
        config.output.dir = dir.clone();
    }
    if cli.allow_invalid_duration {
        config.manifest.duration_policy = DurationPolicy::Propagate;
    }

    Ok(config)
}

/// Handle configuration commands.
fn handle_config_command(action: &ConfigAction, cli: &Cli) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = load_config(cli)?;
            println!("{}", config.get(key)?);
        }
        ConfigAction::Dump => {
            let config = load_config(cli)?;
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Path => {
            let path = cli
                .config
                .clone()
                .unwrap_or_else(Config::default_path);
            println!("{}", display_path(&path));
        }
    }
    Ok(())
}

fn display_path(path: &Path) -> String {
    if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not present, using defaults)", path.display())
    }
}
