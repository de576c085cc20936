// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Active locale resolution.

use crate::locale::normalize_locale;

/// Resolve the active locale for a request.
///
/// Resolution order (highest to lowest priority):
/// 1. The requested locale (user preference, `?locale=` parameter), if the
///    site supports it after normalization
/// 2. The site primary locale
///
/// # Arguments
///
/// * `requested` - Locale asked for by the user, may be `None` or unsupported
/// * `site_primary` - The site's primary locale
/// * `supported` - Locales enabled on the site
///
/// # Example
///
/// ```
/// use folio_common_i18n::resolve_locale;
///
/// let supported = ["en", "es"];
/// assert_eq!(resolve_locale(Some("es"), "en", &supported), "es");
/// assert_eq!(resolve_locale(Some("de"), "en", &supported), "en");
/// assert_eq!(resolve_locale(None, "en", &supported), "en");
/// ```
pub fn resolve_locale<S: AsRef<str>>(
	requested: Option<&str>,
	site_primary: &str,
	supported: &[S],
) -> String {
	if let Some(locale) = requested {
		let normalized = normalize_locale(locale);
		if supported.iter().any(|s| s.as_ref() == normalized) {
			return normalized;
		}
		if !normalized.is_empty() {
			tracing::debug!(
				requested = %normalized,
				fallback = %site_primary,
				"requested locale not enabled on site"
			);
		}
	}

	site_primary.to_string()
}
