// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The identity shared by users and authors.
//!
//! An [`Identity`] carries the localized name, affiliation and biography of a
//! person plus a few unlocalized contact fields. The `localized_*` methods
//! are thin wrappers over [`crate::resolve`].
//!
//! # PII Handling
//!
//! Names, email and ORCID are personal data. Log the owning user's id, not
//! these fields.

use std::collections::BTreeMap;

use folio_common_i18n::LocaleContext;
use serde::{Deserialize, Serialize};

use crate::country::country_name;
use crate::fields::{AFFILIATION, BIOGRAPHY, FAMILY_NAME, GIVEN_NAME, PREFERRED_PUBLIC_NAME};
use crate::localized::{LocalizedRecord, LocalizedValues};
use crate::resolve::{
	resolve_family_name_localized, resolve_full_name, resolve_localized, NameOptions,
};

/// Identity data of a user or author.
///
/// Serializes as a flat JSON object: unlocalized fields by name, localized
/// settings as `{"<setting>": {"<locale>": "<value>"}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,

	/// ORCID iD, usually in URL form (`https://orcid.org/0000-...`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub orcid: Option<String>,

	/// ISO 3166-1 alpha-2 country code.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub country: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,

	#[serde(flatten)]
	settings: BTreeMap<String, LocalizedValues>,
}

impl Identity {
	pub fn new() -> Self {
		Self::default()
	}

	/// Value of a localized setting in exactly `locale`; blank is `None`.
	pub fn localized(&self, field: &str, locale: &str) -> Option<&str> {
		self.value(field, locale)
	}

	pub fn set_localized(
		&mut self,
		field: impl Into<String>,
		locale: impl Into<String>,
		value: impl Into<String>,
	) {
		self.settings
			.entry(field.into())
			.or_default()
			.set(locale, value);
	}

	/// Remove the value of `field` in `locale`, dropping the field when it
	/// has no locales left.
	pub fn remove_localized(&mut self, field: &str, locale: &str) -> Option<String> {
		let values = self.settings.get_mut(field)?;
		let removed = values.remove(locale);
		if values.is_empty() {
			self.settings.remove(field);
		}
		removed
	}

	/// All localized settings, by setting name.
	pub fn settings(&self) -> impl Iterator<Item = (&str, &LocalizedValues)> {
		self.settings.iter().map(|(name, values)| (name.as_str(), values))
	}

	pub fn given_name(&self, locale: &str) -> Option<&str> {
		self.value(GIVEN_NAME, locale)
	}

	pub fn set_given_name(&mut self, locale: impl Into<String>, value: impl Into<String>) {
		self.set_localized(GIVEN_NAME, locale, value);
	}

	pub fn family_name(&self, locale: &str) -> Option<&str> {
		self.value(FAMILY_NAME, locale)
	}

	pub fn set_family_name(&mut self, locale: impl Into<String>, value: impl Into<String>) {
		self.set_localized(FAMILY_NAME, locale, value);
	}

	pub fn preferred_public_name(&self, locale: &str) -> Option<&str> {
		self.value(PREFERRED_PUBLIC_NAME, locale)
	}

	pub fn set_preferred_public_name(
		&mut self,
		locale: impl Into<String>,
		value: impl Into<String>,
	) {
		self.set_localized(PREFERRED_PUBLIC_NAME, locale, value);
	}

	/// Position, institution, etc.
	pub fn affiliation(&self, locale: &str) -> Option<&str> {
		self.value(AFFILIATION, locale)
	}

	pub fn set_affiliation(&mut self, locale: impl Into<String>, value: impl Into<String>) {
		self.set_localized(AFFILIATION, locale, value);
	}

	pub fn biography(&self, locale: &str) -> Option<&str> {
		self.value(BIOGRAPHY, locale)
	}

	pub fn set_biography(&mut self, locale: impl Into<String>, value: impl Into<String>) {
		self.set_localized(BIOGRAPHY, locale, value);
	}

	/// Any localized setting with locale fallback, see [`resolve_localized`].
	pub fn localized_data<'a>(
		&'a self,
		field: &str,
		preferred: Option<&str>,
		ctx: &LocaleContext,
	) -> Option<&'a str> {
		resolve_localized(self, field, preferred, ctx)
	}

	/// Given name with locale fallback; `default_locale` is tried first.
	pub fn localized_given_name<'a>(
		&'a self,
		ctx: &LocaleContext,
		default_locale: Option<&str>,
	) -> Option<&'a str> {
		resolve_localized(self, GIVEN_NAME, default_locale, ctx)
	}

	/// Family name from a locale that also has a given name, see
	/// [`resolve_family_name_localized`].
	pub fn localized_family_name<'a>(
		&'a self,
		ctx: &LocaleContext,
		default_locale: Option<&str>,
	) -> Option<&'a str> {
		resolve_family_name_localized(self, ctx, default_locale)
	}

	pub fn localized_affiliation<'a>(&'a self, ctx: &LocaleContext) -> Option<&'a str> {
		resolve_localized(self, AFFILIATION, None, ctx)
	}

	pub fn localized_biography<'a>(&'a self, ctx: &LocaleContext) -> Option<&'a str> {
		resolve_localized(self, BIOGRAPHY, None, ctx)
	}

	/// Display name, see [`resolve_full_name`].
	pub fn full_name(&self, ctx: &LocaleContext, options: &NameOptions<'_>) -> String {
		resolve_full_name(self, ctx, options)
	}

	/// Display name of the stored country code.
	///
	/// `None` when no country is set or the code is not a known ISO 3166-1
	/// alpha-2 code.
	pub fn country_localized(&self) -> Option<&'static str> {
		self.country.as_deref().and_then(country_name)
	}
}

impl LocalizedRecord for Identity {
	fn localized_values(&self, field: &str) -> Option<&LocalizedValues> {
		self.settings.get(field)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn getters_hide_blank_values() {
		let mut identity = Identity::new();
		identity.set_given_name("en", "");
		identity.set_family_name("en", "Doe");

		assert_eq!(identity.given_name("en"), None);
		assert_eq!(identity.family_name("en"), Some("Doe"));
		assert_eq!(identity.family_name("fr"), None);
	}

	#[test]
	fn remove_localized_drops_empty_field() {
		let mut identity = Identity::new();
		identity.set_biography("en", "Bio");
		assert_eq!(identity.remove_localized(BIOGRAPHY, "en"), Some("Bio".to_string()));
		assert!(identity.localized_values(BIOGRAPHY).is_none());
		assert_eq!(identity.remove_localized(BIOGRAPHY, "en"), None);
	}

	#[test]
	fn localized_given_name_prefers_default_locale() {
		let mut identity = Identity::new();
		identity.set_given_name("en", "Jane");
		identity.set_given_name("de", "Johanna");

		let ctx = LocaleContext::new("en", "en");
		assert_eq!(identity.localized_given_name(&ctx, Some("de")), Some("Johanna"));
		assert_eq!(identity.localized_given_name(&ctx, None), Some("Jane"));
	}

	#[test]
	fn localized_affiliation_and_biography() {
		let mut identity = Identity::new();
		identity.set_affiliation("es", "Universidad de Chile");
		identity.set_biography("en", "Historian.");

		let ctx = LocaleContext::new("fr", "en").with_context_primary_locale("es");
		assert_eq!(identity.localized_affiliation(&ctx), Some("Universidad de Chile"));
		assert_eq!(identity.localized_biography(&ctx), Some("Historian."));
	}

	#[test]
	fn country_localized() {
		let mut identity = Identity::new();
		assert_eq!(identity.country_localized(), None);

		identity.country = Some("CA".to_string());
		assert_eq!(identity.country_localized(), Some("Canada"));

		identity.country = Some("zz".to_string());
		assert_eq!(identity.country_localized(), None);
	}

	#[test]
	fn json_shape() {
		let json = r#"{
			"email": "jdoe@example.org",
			"orcid": "https://orcid.org/0000-0002-1825-0097",
			"givenName": {"fr_CA": "Jeanne", "en": "Jane"},
			"familyName": {"en": "Doe"}
		}"#;
		let identity: Identity = serde_json::from_str(json).unwrap();

		assert_eq!(identity.email.as_deref(), Some("jdoe@example.org"));
		assert_eq!(identity.given_name("fr_CA"), Some("Jeanne"));
		assert_eq!(identity.family_name("en"), Some("Doe"));
		let locales: Vec<_> = identity
			.localized_values(GIVEN_NAME)
			.unwrap()
			.locales()
			.collect();
		assert_eq!(locales, vec!["fr_CA", "en"]);

		let reparsed: Identity =
			serde_json::from_str(&serde_json::to_string(&identity).unwrap()).unwrap();
		assert_eq!(reparsed, identity);
	}
}
