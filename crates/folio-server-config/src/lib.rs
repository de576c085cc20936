// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Centralized configuration management for Folio server.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`FOLIO_SERVER_*`)
//!
//! # Usage
//!
//! ```ignore
//! use folio_server_config::load_config;
//!
//! let config = load_config()?;
//! let ctx = config.locale_context(Some("fr_CA"));
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use folio_common_i18n::{resolve_locale, LocaleContext};
use tracing::{debug, info};

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
	pub site: SiteConfig,
	pub invitations: InvitationsConfig,
	pub database: DatabaseConfig,
	pub logging: LoggingConfig,
}

impl ServerConfig {
	/// Build the locale context for a request asking for `requested`.
	///
	/// Unsupported or missing requests fall back to the site primary locale.
	pub fn locale_context(&self, requested: Option<&str>) -> LocaleContext {
		let active = resolve_locale(
			requested,
			&self.site.primary_locale,
			&self.site.supported_locales,
		);
		let ctx = LocaleContext::new(active, self.site.primary_locale.clone());
		match &self.site.context_primary_locale {
			Some(locale) => ctx.with_context_primary_locale(locale.clone()),
			None => ctx,
		}
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`FOLIO_SERVER_*`)
/// 2. Config file (`/etc/folio/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration from environment only (for testing or simple deployments).
pub fn load_config_from_env() -> Result<ServerConfig, ConfigError> {
	let mut merged = ServerConfigLayer::default();
	merged.merge(EnvSource.load()?);
	finalize(merged)
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let site = layer.site.unwrap_or_default().finalize()?;
	let invitations = layer.invitations.unwrap_or_default().finalize()?;
	let database = layer.database.unwrap_or_default().finalize()?;
	let logging = layer.logging.unwrap_or_default().finalize();

	validate_config(&site)?;

	info!(
		base_url = %site.base_url,
		primary_locale = %site.primary_locale,
		supported_locales = ?site.supported_locales,
		context_primary_locale = ?site.context_primary_locale,
		invitation_expiration_days = invitations.expiration_days,
		database = %database.url,
		"Server configuration loaded"
	);

	Ok(ServerConfig {
		site,
		invitations,
		database,
		logging,
	})
}

/// Validate cross-field configuration rules.
fn validate_config(site: &SiteConfig) -> Result<(), ConfigError> {
	if site.supported_locales.is_empty() {
		return Err(ConfigError::Validation(
			"site.supported_locales must name at least one locale".to_string(),
		));
	}

	if !site.supported_locales.contains(&site.primary_locale) {
		return Err(ConfigError::Validation(format!(
			"site.primary_locale '{}' is not in site.supported_locales {:?}",
			site.primary_locale, site.supported_locales
		)));
	}

	if let Some(context) = &site.context_primary_locale {
		if !site.supported_locales.contains(context) {
			return Err(ConfigError::Validation(format!(
				"site.context_primary_locale '{context}' is not in site.supported_locales {:?}",
				site.supported_locales
			)));
		}
	}

	Ok(())
}
