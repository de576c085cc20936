// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Site configuration: public URL and locales.

use folio_common_i18n::{ensure_supported, normalize_locale, DEFAULT_LOCALE};
use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_CONTEXT_PATH: &str = "index";

/// Site configuration (runtime, fully resolved).
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
	/// Public root URL, used to build links in emails.
	pub base_url: Url,
	/// Site primary locale, the last resort before any-locale fallback.
	pub primary_locale: String,
	/// Locales the site offers. Always contains `primary_locale`.
	pub supported_locales: Vec<String>,
	/// Primary locale of the current journal, if it differs from the site.
	pub context_primary_locale: Option<String>,
	/// URL path of the current journal.
	pub context_path: String,
}

/// Site configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfigLayer {
	#[serde(default)]
	pub base_url: Option<String>,
	#[serde(default)]
	pub primary_locale: Option<String>,
	#[serde(default)]
	pub supported_locales: Option<Vec<String>>,
	#[serde(default)]
	pub context_primary_locale: Option<String>,
	#[serde(default)]
	pub context_path: Option<String>,
}

impl SiteConfigLayer {
	pub fn merge(&mut self, other: SiteConfigLayer) {
		if other.base_url.is_some() {
			self.base_url = other.base_url;
		}
		if other.primary_locale.is_some() {
			self.primary_locale = other.primary_locale;
		}
		if other.supported_locales.is_some() {
			self.supported_locales = other.supported_locales;
		}
		if other.context_primary_locale.is_some() {
			self.context_primary_locale = other.context_primary_locale;
		}
		if other.context_path.is_some() {
			self.context_path = other.context_path;
		}
	}

	/// Parse the URL and normalize every locale (`fr-ca` becomes `fr_CA`).
	///
	/// Cross-field rules are checked by the caller once all sections exist.
	pub fn finalize(self) -> Result<SiteConfig, ConfigError> {
		let raw_url = self
			.base_url
			.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
		let base_url = Url::parse(&raw_url)
			.map_err(|e| ConfigError::invalid("site.base_url", format!("'{raw_url}': {e}")))?;
		if base_url.cannot_be_a_base() {
			return Err(ConfigError::invalid(
				"site.base_url",
				format!("'{raw_url}' cannot carry a path"),
			));
		}

		let primary_locale = locale(
			"site.primary_locale",
			self.primary_locale.as_deref().unwrap_or(DEFAULT_LOCALE),
		)?;

		let supported_locales = match self.supported_locales {
			Some(locales) => {
				let mut normalized = Vec::with_capacity(locales.len());
				for raw in locales {
					let code = locale("site.supported_locales", &raw)?;
					if !normalized.contains(&code) {
						normalized.push(code);
					}
				}
				normalized
			}
			None => vec![primary_locale.clone()],
		};

		let context_primary_locale = self
			.context_primary_locale
			.filter(|l| !l.trim().is_empty())
			.map(|l| locale("site.context_primary_locale", &l))
			.transpose()?;

		let context_path = self
			.context_path
			.map(|p| p.trim_matches('/').to_string())
			.filter(|p| !p.is_empty())
			.unwrap_or_else(|| DEFAULT_CONTEXT_PATH.to_string());

		Ok(SiteConfig {
			base_url,
			primary_locale,
			supported_locales,
			context_primary_locale,
			context_path,
		})
	}
}

fn locale(key: &str, raw: &str) -> Result<String, ConfigError> {
	let code = normalize_locale(raw);
	ensure_supported(&code).map_err(|e| ConfigError::invalid(key, e.to_string()))?;
	Ok(code)
}
