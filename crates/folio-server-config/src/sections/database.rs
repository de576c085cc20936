// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Where Folio keeps user records and invitations.
//!
//! Folio only ships a SQLite backend, so the URL must use the `sqlite:`
//! scheme. A blank value in any layer counts as unset.

use serde::Deserialize;

use crate::error::ConfigError;

const DEFAULT_URL: &str = "sqlite:./folio.db";
const SCHEME: &str = "sqlite:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
	/// SQLite connection string handed to the pool.
	pub url: String,
}

impl Default for DatabaseConfig {
	fn default() -> Self {
		Self {
			url: DEFAULT_URL.to_string(),
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseConfigLayer {
	#[serde(default)]
	pub url: Option<String>,
}

impl DatabaseConfigLayer {
	pub fn merge(&mut self, other: DatabaseConfigLayer) {
		if let Some(url) = other.url.filter(|url| !url.trim().is_empty()) {
			self.url = Some(url);
		}
	}

	pub fn finalize(self) -> Result<DatabaseConfig, ConfigError> {
		let url = match self.url.as_deref().map(str::trim) {
			Some(url) if !url.is_empty() => url.to_string(),
			_ => return Ok(DatabaseConfig::default()),
		};
		if !url.starts_with(SCHEME) || url.len() == SCHEME.len() {
			return Err(ConfigError::invalid(
				"database.url",
				format!("expected a {SCHEME} URL, got {url:?}"),
			));
		}
		Ok(DatabaseConfig { url })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn layer(url: &str) -> DatabaseConfigLayer {
		DatabaseConfigLayer {
			url: Some(url.to_string()),
		}
	}

	#[test]
	fn test_unset_uses_local_file() {
		let config = DatabaseConfigLayer::default().finalize().unwrap();
		assert_eq!(config, DatabaseConfig::default());
		assert_eq!(config.url, "sqlite:./folio.db");

		assert_eq!(layer("  ").finalize().unwrap(), DatabaseConfig::default());
	}

	#[test]
	fn test_sqlite_urls_are_trimmed() {
		let config = layer(" sqlite:/var/lib/folio/folio.db ").finalize().unwrap();
		assert_eq!(config.url, "sqlite:/var/lib/folio/folio.db");
		assert!(layer("sqlite::memory:").finalize().is_ok());
	}

	#[test]
	fn test_other_backends_are_rejected() {
		for url in ["postgres://folio@localhost/folio", "./folio.db", "sqlite:"] {
			let err = layer(url).finalize().unwrap_err();
			assert!(
				matches!(&err, ConfigError::InvalidValue { key, .. } if key == "database.url"),
				"{url}: {err}"
			);
		}
	}

	#[test]
	fn test_blank_layer_does_not_clear_url() {
		let mut base = layer("sqlite:/srv/folio.db");
		base.merge(layer(""));
		base.merge(DatabaseConfigLayer::default());
		assert_eq!(base.finalize().unwrap().url, "sqlite:/srv/folio.db");
	}
}
