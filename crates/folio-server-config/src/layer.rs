// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration layer for merging from multiple sources.

use serde::Deserialize;

use crate::sections::{
	DatabaseConfigLayer, InvitationsConfigLayer, LoggingConfigLayer, SiteConfigLayer,
};

/// Server configuration layer - all fields are Option for merging.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfigLayer {
	#[serde(default)]
	pub site: Option<SiteConfigLayer>,
	#[serde(default)]
	pub invitations: Option<InvitationsConfigLayer>,
	#[serde(default)]
	pub database: Option<DatabaseConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
}

impl ServerConfigLayer {
	/// Merge another layer into this one. Other layer takes precedence.
	pub fn merge(&mut self, other: ServerConfigLayer) {
		merge_option(&mut self.site, other.site, SiteConfigLayer::merge);
		merge_option(
			&mut self.invitations,
			other.invitations,
			InvitationsConfigLayer::merge,
		);
		merge_option(
			&mut self.database,
			other.database,
			DatabaseConfigLayer::merge,
		);
		merge_option(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}

fn merge_option<T, F>(target: &mut Option<T>, source: Option<T>, merge_fn: F)
where
	F: FnOnce(&mut T, T),
{
	match (target.as_mut(), source) {
		(Some(t), Some(s)) => merge_fn(t, s),
		(None, Some(s)) => *target = Some(s),
		_ => {}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_merge_empty_layers() {
		let mut base = ServerConfigLayer::default();
		base.merge(ServerConfigLayer::default());
		assert!(base.site.is_none());
		assert!(base.invitations.is_none());
	}

	#[test]
	fn test_merge_other_overwrites() {
		let mut base = ServerConfigLayer {
			site: Some(SiteConfigLayer {
				primary_locale: Some("en".to_string()),
				context_path: Some("jhs".to_string()),
				..Default::default()
			}),
			..Default::default()
		};
		let other = ServerConfigLayer {
			site: Some(SiteConfigLayer {
				primary_locale: Some("fr_CA".to_string()),
				..Default::default()
			}),
			..Default::default()
		};
		base.merge(other);
		let site = base.site.unwrap();
		assert_eq!(site.primary_locale.as_deref(), Some("fr_CA"));
		assert_eq!(site.context_path.as_deref(), Some("jhs"));
	}

	#[test]
	fn test_merge_adds_missing_sections() {
		let mut base = ServerConfigLayer {
			database: Some(DatabaseConfigLayer {
				url: Some("sqlite::memory:".to_string()),
			}),
			..Default::default()
		};
		let other = ServerConfigLayer {
			invitations: Some(InvitationsConfigLayer {
				expiration_days: Some(7),
			}),
			..Default::default()
		};
		base.merge(other);
		assert_eq!(
			base.database.unwrap().url.as_deref(),
			Some("sqlite::memory:")
		);
		assert_eq!(base.invitations.unwrap().expiration_days, Some(7));
	}

	#[test]
	fn test_parse_full_toml() {
		let layer: ServerConfigLayer = toml::from_str(
			r#"
[site]
base_url = "https://journals.example.org"
primary_locale = "en"
supported_locales = ["en", "fr_CA"]
context_path = "jhs"

[invitations]
expiration_days = 5

[logging]
json = true
"#,
		)
		.unwrap();
		let site = layer.site.unwrap();
		assert_eq!(site.supported_locales.unwrap(), vec!["en", "fr_CA"]);
		assert_eq!(layer.invitations.unwrap().expiration_days, Some(5));
		assert!(layer.database.is_none());
		assert_eq!(layer.logging.unwrap().json, Some(true));
	}
}
