// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale context passed into every localized lookup.

use serde::{Deserialize, Serialize};

/// The locales in effect for one request.
///
/// - `active_locale`: the locale the page is being rendered in
/// - `site_primary_locale`: users register with the site, so this is the
///   locale their names are guaranteed to exist in
/// - `context_primary_locale`: primary locale of the journal or press in
///   scope; `None` when no context is in scope, in which case the site
///   primary locale stands in for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleContext {
	active_locale: String,
	site_primary_locale: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	context_primary_locale: Option<String>,
}

impl LocaleContext {
	pub fn new(active_locale: impl Into<String>, site_primary_locale: impl Into<String>) -> Self {
		Self {
			active_locale: active_locale.into(),
			site_primary_locale: site_primary_locale.into(),
			context_primary_locale: None,
		}
	}

	/// Set the primary locale of the journal or press in scope.
	pub fn with_context_primary_locale(mut self, locale: impl Into<String>) -> Self {
		self.context_primary_locale = Some(locale.into());
		self
	}

	pub fn active_locale(&self) -> &str {
		&self.active_locale
	}

	pub fn site_primary_locale(&self) -> &str {
		&self.site_primary_locale
	}

	/// Primary locale of the context in scope, or the site primary locale.
	pub fn context_primary_locale(&self) -> &str {
		self.context_primary_locale
			.as_deref()
			.unwrap_or(&self.site_primary_locale)
	}

	/// Build the locale precedence list for a lookup.
	///
	/// Order is `preferred` (or the active locale when `None`), the site
	/// primary locale, then the context primary locale. Empty entries are
	/// skipped and only the first occurrence of each locale is kept.
	pub fn precedence<'a>(&'a self, preferred: Option<&'a str>) -> Vec<&'a str> {
		let preferred = preferred.unwrap_or(&self.active_locale);
		let mut list: Vec<&str> = Vec::with_capacity(3);
		for locale in [
			preferred,
			self.site_primary_locale.as_str(),
			self.context_primary_locale(),
		] {
			if !locale.is_empty() && !list.contains(&locale) {
				list.push(locale);
			}
		}
		list
	}
}
