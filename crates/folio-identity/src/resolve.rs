// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale fallback for display values.
//!
//! Every function here is total: a missing value is `None` (or an empty
//! string for composed names), never an error. Nothing is read from ambient
//! state; the locales in effect come from the [`LocaleContext`] argument.
//!
//! Two fallback policies exist on purpose:
//!
//! - [`resolve_localized`] walks the locale precedence list and then takes
//!   the first value in *any* locale.
//! - [`resolve_family_name_localized`] only accepts a locale that also has a
//!   given name, so a family name is not paired with a given name from a
//!   different language.

use folio_common_i18n::LocaleContext;

use crate::fields::{FAMILY_NAME, GIVEN_NAME, PREFERRED_PUBLIC_NAME};
use crate::localized::{LocalizedRecord, LocalizedValues};

/// Options for [`resolve_full_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameOptions<'a> {
	/// Return the preferred public name verbatim when one exists.
	pub prefer_public_name: bool,
	/// Render `Family, Given` instead of `Given Family`.
	pub family_name_first: bool,
	/// Locale to read names from when the active locale has no given name.
	/// Defaults to the site primary locale.
	pub default_locale: Option<&'a str>,
}

impl Default for NameOptions<'_> {
	fn default() -> Self {
		Self {
			prefer_public_name: true,
			family_name_first: false,
			default_locale: None,
		}
	}
}

impl<'a> NameOptions<'a> {
	pub fn prefer_public_name(mut self, prefer: bool) -> Self {
		self.prefer_public_name = prefer;
		self
	}

	pub fn family_name_first(mut self, family_first: bool) -> Self {
		self.family_name_first = family_first;
		self
	}

	pub fn default_locale(mut self, locale: Option<&'a str>) -> Self {
		self.default_locale = locale;
		self
	}
}

/// Resolve the best display value of `field`.
///
/// Locales are tried in [`LocaleContext::precedence`] order (`preferred`,
/// or the active locale when `None`, then the site and context primary
/// locales). If none of them holds a non-empty value, the first non-empty
/// value in the record's insertion order wins.
///
/// # Example
///
/// ```
/// use folio_common_i18n::LocaleContext;
/// use folio_identity::{resolve_localized, Identity};
///
/// let mut identity = Identity::new();
/// identity.set_given_name("de", "Johanna");
///
/// let ctx = LocaleContext::new("fr_CA", "en");
/// assert_eq!(resolve_localized(&identity, "givenName", None, &ctx), Some("Johanna"));
/// assert_eq!(resolve_localized(&identity, "biography", None, &ctx), None);
/// ```
pub fn resolve_localized<'r, R>(
	record: &'r R,
	field: &str,
	preferred: Option<&str>,
	ctx: &LocaleContext,
) -> Option<&'r str>
where
	R: LocalizedRecord + ?Sized,
{
	for locale in ctx.precedence(preferred) {
		if let Some(value) = record.value(field, locale) {
			return Some(value);
		}
	}

	let fallback = record
		.localized_values(field)
		.and_then(LocalizedValues::first_non_empty);
	if fallback.is_some() {
		tracing::trace!(field, "no value in precedence locales, using first available");
	}
	fallback
}

/// Compose the display name of a person.
///
/// With `prefer_public_name`, a preferred public name in the active locale is
/// returned as is. Otherwise the given name is read from the active locale,
/// or from the default locale when the active locale has none; the family
/// name is read from whichever locale supplied the given name. Absent parts
/// never leave a dangling separator.
///
/// # Example
///
/// ```
/// use folio_common_i18n::LocaleContext;
/// use folio_identity::{resolve_full_name, Identity, NameOptions};
///
/// let mut identity = Identity::new();
/// identity.set_given_name("en", "Jane");
/// identity.set_family_name("en", "Doe");
///
/// let ctx = LocaleContext::new("en", "en");
/// let options = NameOptions::default().family_name_first(true);
/// assert_eq!(resolve_full_name(&identity, &ctx, &options), "Doe, Jane");
/// ```
pub fn resolve_full_name<R>(record: &R, ctx: &LocaleContext, options: &NameOptions<'_>) -> String
where
	R: LocalizedRecord + ?Sized,
{
	let mut locale = ctx.active_locale();

	if options.prefer_public_name {
		if let Some(public_name) = record.value(PREFERRED_PUBLIC_NAME, locale) {
			return public_name.to_string();
		}
	}

	let mut given_name = record.value(GIVEN_NAME, locale);
	if given_name.is_none() {
		locale = options
			.default_locale
			.unwrap_or_else(|| ctx.site_primary_locale());
		given_name = record.value(GIVEN_NAME, locale);
	}
	let family_name = record.value(FAMILY_NAME, locale);

	compose_name(given_name, family_name, options.family_name_first)
}

/// Resolve the family name from a locale that also has a given name.
///
/// Candidates are the active locale, then `default_locale`. The first
/// candidate with a given name decides the answer, even when its family name
/// is blank. When no candidate has a given name, the family name in the site
/// primary locale is returned regardless of its given name.
pub fn resolve_family_name_localized<'r, R>(
	record: &'r R,
	ctx: &LocaleContext,
	default_locale: Option<&str>,
) -> Option<&'r str>
where
	R: LocalizedRecord + ?Sized,
{
	let candidates = std::iter::once(ctx.active_locale()).chain(default_locale);
	for locale in candidates {
		if record.value(GIVEN_NAME, locale).is_some() {
			return record.value(FAMILY_NAME, locale);
		}
	}

	record.value(FAMILY_NAME, ctx.site_primary_locale())
}

fn compose_name(given: Option<&str>, family: Option<&str>, family_first: bool) -> String {
	match (given, family) {
		(Some(given), Some(family)) if family_first => format!("{family}, {given}"),
		(Some(given), Some(family)) => format!("{given} {family}"),
		(Some(given), None) => given.to_string(),
		(None, Some(family)) => family.to_string(),
		(None, None) => String::new(),
	}
}
