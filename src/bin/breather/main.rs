// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

mod cli;
mod commands;
mod logging;
mod recipe;

use std::process;

use breather_rs::prelude::Settings;
use clap::{CommandFactory, Parser};
use colored::Colorize;

use crate::cli::{Cli, Commands};
use crate::commands::CommandResult;

fn main() {
    let cli = Cli::parse();

    let _logger = match logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref()) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            process::exit(1);
        }
    };

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        eprintln!("{} {}", "error:".red().bold(), e.to_string().red());
        process::exit(1);
    }
}

fn run(cli: Cli) -> CommandResult {
    log::debug!("breather_rs {} with arguments {:?}", breather_rs::BREATHER_VERSION, cli);

    if let (Some(path), Some(_)) = (&cli.path, &cli.command) {
        return Err(format!(
            "path `{}` cannot be combined with a subcommand",
            path.display()
        )
        .into());
    }

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };

    match cli.command {
        Some(Commands::Apply(args)) => commands::apply(args, &settings),
        Some(Commands::Export(args)) => commands::export(args, &settings),
        Some(Commands::Ids(args)) => commands::ids(args),
        None => match &cli.path {
            Some(path) => commands::summary(path, &settings),
            None => {
                Cli::command().print_help()?;
                Ok(())
            }
        },
    }
}
