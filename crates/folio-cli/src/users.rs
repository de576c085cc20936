// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use anyhow::Context;
use clap::Subcommand;
use folio_common_i18n::{ensure_supported, normalize_locale};
use folio_server_config::ServerConfig;
use folio_server_db::{LocaleMigration, UserRepository};

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
	/// Copy user names into a new site primary locale
	ChangePrimaryLocale {
		/// Current site primary locale
		#[arg(long)]
		from: String,
		/// New site primary locale
		#[arg(long)]
		to: String,
	},
}

pub async fn run(command: UsersCommand, config: &ServerConfig) -> anyhow::Result<()> {
	match command {
		UsersCommand::ChangePrimaryLocale { from, to } => {
			let (from, to) = (parse_locale(&from)?, parse_locale(&to)?);
			let pool = crate::open_database(config).await?;
			let report = UserRepository::new(pool)
				.change_site_primary_locale(&from, &to)
				.await
				.with_context(|| format!("failed to move names from {from} to {to}"))?;
			tracing::info!(%from, %to, ?report, "site primary locale changed");
			println!("{}", summary(&report));
			Ok(())
		}
	}
}

fn parse_locale(raw: &str) -> anyhow::Result<String> {
	let locale = normalize_locale(raw);
	ensure_supported(&locale).with_context(|| format!("invalid locale '{raw}'"))?;
	Ok(locale)
}

fn summary(report: &LocaleMigration) -> String {
	format!(
		"removed {} blank names, copied full names for {} users, copied given names for {} users",
		report.blank_names_removed, report.names_copied, report.given_names_copied
	)
}
