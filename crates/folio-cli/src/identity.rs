// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Name resolution commands over an identity JSON file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use folio_common_i18n::{normalize_locale, LocaleContext};
use folio_identity::{Identity, NameOptions};
use folio_server_config::ServerConfig;

#[derive(Args, Debug)]
pub struct NameArgs {
	/// Identity JSON file
	pub file: PathBuf,
	/// Locale to render in (falls back to the site primary locale)
	#[arg(long)]
	pub locale: Option<String>,
	/// Locale to read names from when the active locale has no given name
	#[arg(long)]
	pub default_locale: Option<String>,
	/// Render `Family, Given`
	#[arg(long)]
	pub family_first: bool,
	/// Ignore the preferred public name
	#[arg(long)]
	pub no_preferred: bool,
}

#[derive(Args, Debug)]
pub struct FieldArgs {
	/// Identity JSON file
	pub file: PathBuf,
	/// Setting name, e.g. `affiliation` or `biography`
	pub field: String,
	/// Locale to try first
	#[arg(long)]
	pub locale: Option<String>,
}

#[derive(Args, Debug)]
pub struct FamilyNameArgs {
	/// Identity JSON file
	pub file: PathBuf,
	/// Locale to try after the active locale
	#[arg(long)]
	pub default_locale: Option<String>,
}

#[derive(Args, Debug)]
pub struct CountryArgs {
	/// Identity JSON file
	pub file: PathBuf,
}

pub fn name(args: &NameArgs, config: &ServerConfig) -> anyhow::Result<()> {
	let identity = load_identity(&args.file)?;
	let ctx = config.locale_context(args.locale.as_deref());
	print_value(Some(render_name(&identity, &ctx, args).as_str()));
	Ok(())
}

pub fn field(args: &FieldArgs, config: &ServerConfig) -> anyhow::Result<()> {
	let identity = load_identity(&args.file)?;
	let ctx = config.locale_context(None);
	let preferred = args.locale.as_deref().map(normalize_locale);
	print_value(identity.localized_data(&args.field, preferred.as_deref(), &ctx));
	Ok(())
}

pub fn family_name(args: &FamilyNameArgs, config: &ServerConfig) -> anyhow::Result<()> {
	let identity = load_identity(&args.file)?;
	let ctx = config.locale_context(None);
	let default_locale = args.default_locale.as_deref().map(normalize_locale);
	print_value(identity.localized_family_name(&ctx, default_locale.as_deref()));
	Ok(())
}

pub fn country(args: &CountryArgs) -> anyhow::Result<()> {
	let identity = load_identity(&args.file)?;
	print_value(identity.country_localized());
	Ok(())
}

fn render_name(identity: &Identity, ctx: &LocaleContext, args: &NameArgs) -> String {
	let default_locale = args.default_locale.as_deref().map(normalize_locale);
	let options = NameOptions::default()
		.prefer_public_name(!args.no_preferred)
		.family_name_first(args.family_first)
		.default_locale(default_locale.as_deref());
	identity.full_name(ctx, &options)
}

// Absent values print nothing so scripts can test for empty output.
fn print_value(value: Option<&str>) {
	match value {
		Some(v) if !v.is_empty() => println!("{v}"),
		_ => tracing::debug!("no value"),
	}
}

fn load_identity(path: &Path) -> anyhow::Result<Identity> {
	let content = std::fs::read_to_string(path)
		.with_context(|| format!("failed to read {}", path.display()))?;
	serde_json::from_str(&content)
		.with_context(|| format!("{} is not a valid identity record", path.display()))
}
