//! TISS financial reconciliation CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tiss_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_inspect, run_summary, run_visualize};
use crate::summary::{eprint_issues, print_issues, print_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Visualize(args) => match run_visualize(&args) {
            Ok(result) => {
                if result.blocked {
                    eprintln!("error: batch has findings; output not written (--strict)");
                    eprint_issues(&result.inspection);
                    1
                } else {
                    0
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Summary(args) => match run_summary(&args) {
            Ok(result) => {
                if let Some(view) = &result.view {
                    print_summary(view);
                }
                if !result.inspection.is_empty() {
                    println!();
                    print_issues(&result.inspection);
                }
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Inspect(args) => {
            let json = args.json;
            match run_inspect(&args) {
                Ok(result) => {
                    if json {
                        match serde_json::to_string_pretty(&result.inspection) {
                            Ok(text) => println!("{text}"),
                            Err(error) => {
                                eprintln!("error: serialize findings: {error}");
                                std::process::exit(1);
                            }
                        }
                    } else {
                        print_issues(&result.inspection);
                    }
                    if result.blocked { 1 } else { 0 }
                }
                Err(error) => {
                    eprintln!("error: {error:#}");
                    1
                }
            }
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
