// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `folio` command line tool.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use folio_server_config::{LoggingConfig, ServerConfig};
use sqlx::SqlitePool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod identity;
mod invitations;
mod users;

/// Folio - identity records and invitations for scholarly publishing.
#[derive(Parser, Debug)]
#[command(name = "folio", about = "Folio identity and invitation tools", version)]
struct Args {
	/// Server config file (defaults to /etc/folio/server.toml)
	#[arg(long, global = true, env = "FOLIO_CONFIG")]
	config: Option<PathBuf>,

	/// Log filter directive, overrides `logging.level`
	#[arg(long, global = true)]
	log_level: Option<String>,

	/// Emit logs as JSON lines
	#[arg(long, global = true)]
	json_logs: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Print the display name of an identity
	Name(identity::NameArgs),
	/// Print one localized field of an identity
	Field(identity::FieldArgs),
	/// Print the family name that pairs with the displayed given name
	FamilyName(identity::FamilyNameArgs),
	/// Print the country name of an identity
	Country(identity::CountryArgs),
	/// User maintenance
	#[command(subcommand)]
	Users(users::UsersCommand),
	/// Inspect and clean up invitations
	#[command(subcommand)]
	Invitations(invitations::InvitationsCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	let config = match &args.config {
		Some(path) => folio_server_config::load_config_with_file(path),
		None => folio_server_config::load_config(),
	}
	.context("failed to load configuration")?;

	init_tracing(&config.logging, args.log_level.as_deref(), args.json_logs);

	run(args.command, &config).await
}

async fn run(command: Command, config: &ServerConfig) -> anyhow::Result<()> {
	match command {
		Command::Name(args) => identity::name(&args, config),
		Command::Field(args) => identity::field(&args, config),
		Command::FamilyName(args) => identity::family_name(&args, config),
		Command::Country(args) => identity::country(&args),
		Command::Users(cmd) => users::run(cmd, config).await,
		Command::Invitations(cmd) => invitations::run(cmd, config).await,
	}
}

fn init_tracing(logging: &LoggingConfig, level: Option<&str>, json: bool) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| level.unwrap_or(&logging.level).into());

	let registry = tracing_subscriber::registry().with(filter);
	if json || logging.json {
		registry
			.with(
				tracing_subscriber::fmt::layer()
					.json()
					.with_writer(std::io::stderr),
			)
			.init();
	} else {
		registry
			.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
			.init();
	}
}

/// Open the configured database and bring its schema up to date.
async fn open_database(config: &ServerConfig) -> anyhow::Result<SqlitePool> {
	let pool = folio_server_db::create_pool(&config.database.url)
		.await
		.with_context(|| format!("failed to open database {}", config.database.url))?;
	folio_server_db::run_migrations(&pool)
		.await
		.context("failed to run migrations")?;
	Ok(pool)
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	#[test]
	fn test_cli_definition_is_valid() {
		Args::command().debug_assert();
	}

	#[test]
	fn test_global_flags_after_subcommand() {
		let args = Args::try_parse_from([
			"folio",
			"invitations",
			"total",
			"--config",
			"/tmp/folio.toml",
			"--json-logs",
		])
		.unwrap();
		assert_eq!(args.config, Some(PathBuf::from("/tmp/folio.toml")));
		assert!(args.json_logs);
	}

	#[test]
	fn test_name_flags() {
		let args = Args::try_parse_from([
			"folio",
			"name",
			"jane.json",
			"--locale",
			"fr_CA",
			"--family-first",
			"--no-preferred",
		])
		.unwrap();
		match args.command {
			Command::Name(name) => {
				assert_eq!(name.locale.as_deref(), Some("fr_CA"));
				assert!(name.family_first);
				assert!(name.no_preferred);
				assert!(name.default_locale.is_none());
			}
			other => panic!("unexpected command {other:?}"),
		}
	}

	#[test]
	fn test_change_primary_locale_requires_both_locales() {
		let result = Args::try_parse_from(["folio", "users", "change-primary-locale", "--from", "en"]);
		assert!(result.is_err());
	}
}
