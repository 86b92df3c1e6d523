// rimsort-rs: RimWorld Mod Load-Order Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Sort | Tiers | Cycles | Options | Inis
//! ```

use std::process::ExitCode;

use rimsort_rs::cli::global::GlobalOptions;
use rimsort_rs::cli::{self, Command};
use rimsort_rs::cmd::config::{run_inis_command, run_options_command};
use rimsort_rs::cmd::cycles::run_cycles_command;
use rimsort_rs::cmd::sort::run_sort_command;
use rimsort_rs::cmd::tiers::run_tiers_command;
use rimsort_rs::config::Config;
use rimsort_rs::config::loader::ConfigLoader;
use rimsort_rs::error::{ConfigError, Result, RimSortError, bail_out};
use rimsort_rs::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DEFAULT_INI: &str = "rimsort.toml";
const ENV_PREFIX: &str = "RIMSORT";

fn main() -> ExitCode {
    let cli = cli::parse();

    match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            return ExitCode::SUCCESS;
        }
        Some(Command::Inis) => {
            return match build_config_loader(&cli.global) {
                Ok(loader) => {
                    run_inis_command(&loader.format_loaded_files());
                    ExitCode::SUCCESS
                }
                Err(e) => report_failure(&e),
            };
        }
        Some(_) => {}
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            return report_failure(&anyhow::Error::from(bail_out("no command specified")));
        }
    }

    let config = match load_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&build_log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    match dispatch_command(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_failure(&e),
    }
}

fn dispatch_command(cli: &cli::Cli, config: &Config) -> Result<()> {
    match &cli.command {
        Some(Command::Options) => {
            run_options_command(config);
            Ok(())
        }
        Some(Command::Sort(args)) => run_sort_command(args, config),
        Some(Command::Tiers(input)) => run_tiers_command(input, config),
        Some(Command::Cycles(input)) => run_cycles_command(input, config),
        Some(Command::Version | Command::Inis) | None => Ok(()),
    }
}

fn report_failure(error: &anyhow::Error) -> ExitCode {
    eprintln!("Error: {error:#}");
    ExitCode::FAILURE
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

/// Console and file levels come from the merged config, so `-l` and
/// `--file-log-level` arrive here as overrides. Level 0 disables the file.
fn build_log_config(config: &Config) -> LogConfig {
    let global = &config.global;
    let log_file = global
        .file_log_level
        .to_tracing_level()
        .map(|_| global.log_file.display().to_string());

    LogConfig::builder()
        .with_console_level(global.output_log_level)
        .with_file_level(global.file_log_level)
        .maybe_with_log_file(log_file)
        .with_json_file(global.json_log)
        .build()
}

fn build_config_loader(global: &GlobalOptions) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    if !global.no_default_inis {
        loader = loader.add_toml_file_optional(DEFAULT_INI);
    }
    for ini_path in &global.inis {
        if !ini_path.exists() {
            let missing = ConfigError::NotFound(ini_path.display().to_string());
            return Err(RimSortError::from(missing).into());
        }
        loader = loader.add_toml_file(ini_path);
    }
    loader
        .with_env_prefix(ENV_PREFIX)
        .apply_overrides(&global.to_config_overrides())
}

fn load_config(global: &GlobalOptions) -> Result<Config> {
    build_config_loader(global)?.build()
}
