// Copyright 2025 the Tiered Settings Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inspect and edit demo settings stored on disk.
//!
//! ```text
//! settings_cli get
//! settings_cli set VOLUME 30
//! settings_cli --run any-percent set SCALE 1.5 --local
//! settings_cli --run any-percent unset SCALE
//! ```
//!
//! Set `RUST_LOG=debug` to see every store operation.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tiered_settings::{BackingStore, DeclarationError, PropertyId, SettingsError, Tier};
use tiered_settings_demos::{DemoProperties, parse_value};
use tiered_settings_fs::{FileSettings, InvalidRunName, Locations, open};

const APP: &str = "tiered-settings-demo";

#[derive(Debug, Parser)]
#[command(version, about = "Two-tier settings demo")]
struct Cli {
    /// Settings directory; defaults to the platform configuration directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Run whose local overrides to use.
    #[arg(long, global = true)]
    run: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print effective values, or one property's value in each tier.
    Get {
        /// Property name.
        name: Option<String>,
    },
    /// Write a value and save.
    Set {
        /// Property name.
        name: String,
        /// New value.
        value: String,
        /// Override for the selected run only.
        #[arg(long)]
        local: bool,
    },
    /// Drop the local override of a property and save.
    Unset {
        /// Property name.
        name: String,
    },
    /// List categories left unsaved after loading.
    Unsaved,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Declaration(#[from] DeclarationError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Run(#[from] InvalidRunName),
    #[error("unknown property `{0}`")]
    UnknownProperty(String),
    #[error("`{text}` is not a valid {kind} value")]
    InvalidValue { text: String, kind: &'static str },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut locations = match cli.dir {
        Some(dir) => Locations::in_dir(dir),
        None => Locations::for_app(APP),
    };
    if let Some(run) = &cli.run {
        locations = locations.with_run(run)?;
    }
    info!(global = %locations.global.display(), local = %locations.local.display(), "opening settings");

    let (registry, _) = DemoProperties::registry()?;
    let mut settings = open(registry, &locations)?;
    settings.load_local()?;

    match cli.command {
        Command::Get { name: None } => {
            for (id, declaration) in settings.registry().iter() {
                let marker = if settings.local().has(declaration.name()) {
                    " (local)"
                } else {
                    ""
                };
                println!("{} = {}{marker}", declaration.name(), settings.value(id));
            }
        }
        Command::Get { name: Some(name) } => {
            let id = lookup(&settings, &name)?;
            println!("effective = {}", settings.value(id));
            for tier in [Tier::Global, Tier::Local] {
                let store_value = match tier {
                    Tier::Global => settings.global().get(&name),
                    Tier::Local => settings.local().get(&name),
                };
                match store_value {
                    Some(value) => println!("{tier} = {value}"),
                    None => println!("{tier} = (unset)"),
                }
            }
        }
        Command::Set { name, value, local } => {
            let id = lookup(&settings, &name)?;
            let kind = settings
                .registry()
                .declaration(id)
                .map(|d| d.kind())
                .ok_or_else(|| CliError::UnknownProperty(name.clone()))?;
            let parsed = parse_value(kind, &value).ok_or(CliError::InvalidValue {
                text: value,
                kind: kind.as_str(),
            })?;
            let tier = if local { Tier::Local } else { Tier::Global };
            settings.add_listener(|event| {
                println!("{} changed in {} to {}", event.name, event.tier, event.value);
            });
            settings.set_value(id, parsed, tier)?;
            settings.save()?;
        }
        Command::Unset { name } => {
            let id = lookup(&settings, &name)?;
            if settings.undefine_id(id) {
                settings.save()?;
                println!("{name} = {}", settings.value(id));
            } else {
                println!("{name} has no local override");
            }
        }
        Command::Unsaved => {
            for unsaved in settings.unsaved() {
                println!("{unsaved}");
            }
        }
    }
    Ok(())
}

fn lookup(settings: &FileSettings, name: &str) -> Result<PropertyId, CliError> {
    settings
        .registry()
        .by_name(name)
        .ok_or_else(|| CliError::UnknownProperty(name.to_owned()))
}
