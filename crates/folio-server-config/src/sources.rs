// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ServerConfigLayer;
use crate::sections::{
	DatabaseConfigLayer, InvitationsConfigLayer, LoggingConfigLayer, SiteConfigLayer,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ServerConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ServerConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/folio/server.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ServerConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ServerConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: FOLIO_SERVER_<SECTION>_<FIELD>, named after the TOML table and
/// key, e.g. `FOLIO_SERVER_SITE_PRIMARY_LOCALE` for `site.primary_locale`.
pub struct EnvSource;

impl EnvSource {
	/// Build a layer from an arbitrary variable lookup.
	pub(crate) fn load_from<F>(lookup: F) -> Result<ServerConfigLayer, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let env = Env(&lookup);
		Ok(ServerConfigLayer {
			site: Some(load_site_from_env(&env)),
			invitations: Some(load_invitations_from_env(&env)?),
			database: Some(load_database_from_env(&env)),
			logging: Some(load_logging_from_env(&env)),
		})
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Self::load_from(|name| std::env::var(name).ok())
	}
}

struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
	fn var(&self, name: &str) -> Option<String> {
		(self.0)(name).filter(|s| !s.is_empty())
	}

	fn bool(&self, name: &str) -> Option<bool> {
		self.var(name)
			.map(|v| v.eq_ignore_ascii_case("true") || v == "1")
	}

	fn i64(&self, name: &str) -> Result<Option<i64>, ConfigError> {
		match self.var(name) {
			Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
				key: name.to_string(),
				message: format!("invalid i64 value '{v}'"),
			}),
			None => Ok(None),
		}
	}

	fn list(&self, name: &str) -> Option<Vec<String>> {
		self.var(name).map(|s| {
			s.split(',')
				.map(|s| s.trim().to_string())
				.filter(|s| !s.is_empty())
				.collect()
		})
	}
}

fn load_site_from_env(env: &Env<'_>) -> SiteConfigLayer {
	SiteConfigLayer {
		base_url: env.var("FOLIO_SERVER_SITE_BASE_URL"),
		primary_locale: env.var("FOLIO_SERVER_SITE_PRIMARY_LOCALE"),
		supported_locales: env.list("FOLIO_SERVER_SITE_SUPPORTED_LOCALES"),
		context_primary_locale: env.var("FOLIO_SERVER_SITE_CONTEXT_PRIMARY_LOCALE"),
		context_path: env.var("FOLIO_SERVER_SITE_CONTEXT_PATH"),
	}
}

fn load_invitations_from_env(env: &Env<'_>) -> Result<InvitationsConfigLayer, ConfigError> {
	Ok(InvitationsConfigLayer {
		expiration_days: env.i64("FOLIO_SERVER_INVITATIONS_EXPIRATION_DAYS")?,
	})
}

fn load_database_from_env(env: &Env<'_>) -> DatabaseConfigLayer {
	DatabaseConfigLayer {
		url: env.var("FOLIO_SERVER_DATABASE_URL"),
	}
}

fn load_logging_from_env(env: &Env<'_>) -> LoggingConfigLayer {
	LoggingConfigLayer {
		level: env.var("FOLIO_SERVER_LOGGING_LEVEL"),
		json: env.bool("FOLIO_SERVER_LOGGING_JSON"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn from_map(vars: &[(&str, &str)]) -> Result<ServerConfigLayer, ConfigError> {
		let vars: HashMap<String, String> = vars
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		EnvSource::load_from(|name| vars.get(name).cloned())
	}

	#[test]
	fn test_precedence_ordering() {
		assert!(Precedence::Environment > Precedence::ConfigFile);
		assert!(Precedence::ConfigFile > Precedence::Defaults);
	}

	#[test]
	fn test_defaults_source_returns_empty_layer() {
		let layer = DefaultsSource.load().unwrap();
		assert!(layer.site.is_none());
		assert!(layer.database.is_none());
	}

	#[test]
	fn test_toml_source_missing_file_returns_empty() {
		let source = TomlSource::new("/nonexistent/config.toml");
		let layer = source.load().unwrap();
		assert!(layer.site.is_none());
	}

	#[test]
	fn test_toml_source_invalid_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("server.toml");
		std::fs::write(&path, "[site\nprimary_locale = ").unwrap();

		let err = TomlSource::new(&path).load().unwrap_err();
		assert!(matches!(err, ConfigError::TomlParse { .. }));
	}

	#[test]
	fn test_env_source_reads_all_sections() {
		let layer = from_map(&[
			("FOLIO_SERVER_SITE_BASE_URL", "https://journals.example.org"),
			("FOLIO_SERVER_SITE_PRIMARY_LOCALE", "fr_CA"),
			("FOLIO_SERVER_SITE_SUPPORTED_LOCALES", "en, fr_CA,,de"),
			("FOLIO_SERVER_INVITATIONS_EXPIRATION_DAYS", "14"),
			("FOLIO_SERVER_DATABASE_URL", "sqlite:/var/lib/folio/folio.db"),
			("FOLIO_SERVER_LOGGING_JSON", "1"),
		])
		.unwrap();

		let site = layer.site.unwrap();
		assert_eq!(site.primary_locale.as_deref(), Some("fr_CA"));
		assert_eq!(site.supported_locales.unwrap(), vec!["en", "fr_CA", "de"]);
		assert!(site.context_path.is_none());
		assert_eq!(layer.invitations.unwrap().expiration_days, Some(14));
		assert_eq!(
			layer.database.unwrap().url.as_deref(),
			Some("sqlite:/var/lib/folio/folio.db")
		);
		assert_eq!(layer.logging.unwrap().json, Some(true));
	}

	#[test]
	fn test_env_empty_values_are_unset() {
		let layer = from_map(&[("FOLIO_SERVER_SITE_PRIMARY_LOCALE", "")]).unwrap();
		assert!(layer.site.unwrap().primary_locale.is_none());
	}

	#[test]
	fn test_env_invalid_number() {
		let err = from_map(&[("FOLIO_SERVER_INVITATIONS_EXPIRATION_DAYS", "three")]).unwrap_err();
		assert!(err
			.to_string()
			.contains("FOLIO_SERVER_INVITATIONS_EXPIRATION_DAYS"));
	}

	#[test]
	fn test_env_names_mirror_toml_keys() {
		let keys = [
			("site", "base_url", "https://journals.example.org"),
			("site", "primary_locale", "en"),
			("site", "supported_locales", "en"),
			("site", "context_primary_locale", "en"),
			("site", "context_path", "jhs"),
			("invitations", "expiration_days", "5"),
			("database", "url", "sqlite::memory:"),
			("logging", "level", "debug"),
			("logging", "json", "true"),
		];
		let vars: HashMap<String, String> = keys
			.iter()
			.map(|(section, field, value)| {
				let name = format!("FOLIO_SERVER_{section}_{field}").to_uppercase();
				(name, value.to_string())
			})
			.collect();
		let layer = EnvSource::load_from(|name| vars.get(name).cloned()).unwrap();

		let site = layer.site.unwrap();
		assert!(site.base_url.is_some());
		assert!(site.primary_locale.is_some());
		assert!(site.supported_locales.is_some());
		assert!(site.context_primary_locale.is_some());
		assert!(site.context_path.is_some());
		assert_eq!(layer.invitations.unwrap().expiration_days, Some(5));
		assert!(layer.database.unwrap().url.is_some());
		let logging = layer.logging.unwrap();
		assert_eq!(logging.level.as_deref(), Some("debug"));
		assert_eq!(logging.json, Some(true));
	}
}
