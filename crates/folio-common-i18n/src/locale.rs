// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale metadata and direction support.

/// Text direction for a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
	/// Left-to-right (e.g., English, French)
	Ltr,
	/// Right-to-left (e.g., Arabic, Persian)
	Rtl,
}

impl Direction {
	/// Returns the HTML `dir` attribute value.
	pub fn as_html_dir(&self) -> &'static str {
		match self {
			Direction::Ltr => "ltr",
			Direction::Rtl => "rtl",
		}
	}
}

/// Metadata about a locale Folio can display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleInfo {
	/// Locale identifier, language code with optional `_REGION` suffix
	pub code: &'static str,
	/// English name of the locale
	pub name: &'static str,
	/// Native name of the locale
	pub native_name: &'static str,
	/// Text direction
	pub direction: Direction,
}

/// Locale used when nothing else is configured.
pub const DEFAULT_LOCALE: &str = "en";

/// All locales Folio ships metadata for.
pub const LOCALES: &[LocaleInfo] = &[
	LocaleInfo {
		code: "en",
		name: "English",
		native_name: "English",
		direction: Direction::Ltr,
	},
	LocaleInfo {
		code: "es",
		name: "Spanish",
		native_name: "Español",
		direction: Direction::Ltr,
	},
	LocaleInfo {
		code: "fr",
		name: "French",
		native_name: "Français",
		direction: Direction::Ltr,
	},
	LocaleInfo {
		code: "fr_CA",
		name: "French (Canada)",
		native_name: "Français (Canada)",
		direction: Direction::Ltr,
	},
	LocaleInfo {
		code: "de",
		name: "German",
		native_name: "Deutsch",
		direction: Direction::Ltr,
	},
	LocaleInfo {
		code: "it",
		name: "Italian",
		native_name: "Italiano",
		direction: Direction::Ltr,
	},
	LocaleInfo {
		code: "pt",
		name: "Portuguese",
		native_name: "Português",
		direction: Direction::Ltr,
	},
	LocaleInfo {
		code: "pt_BR",
		name: "Portuguese (Brazil)",
		native_name: "Português (Brasil)",
		direction: Direction::Ltr,
	},
	LocaleInfo {
		code: "ru",
		name: "Russian",
		native_name: "Русский",
		direction: Direction::Ltr,
	},
	LocaleInfo {
		code: "uk",
		name: "Ukrainian",
		native_name: "Українська",
		direction: Direction::Ltr,
	},
	LocaleInfo {
		code: "tr",
		name: "Turkish",
		native_name: "Türkçe",
		direction: Direction::Ltr,
	},
	LocaleInfo {
		code: "id",
		name: "Indonesian",
		native_name: "Bahasa Indonesia",
		direction: Direction::Ltr,
	},
	LocaleInfo {
		code: "ja",
		name: "Japanese",
		native_name: "日本語",
		direction: Direction::Ltr,
	},
	LocaleInfo {
		code: "zh_CN",
		name: "Chinese (Simplified)",
		native_name: "简体中文",
		direction: Direction::Ltr,
	},
	LocaleInfo {
		code: "ar",
		name: "Arabic",
		native_name: "العربية",
		direction: Direction::Rtl,
	},
	LocaleInfo {
		code: "fa",
		name: "Persian",
		native_name: "فارسی",
		direction: Direction::Rtl,
	},
	LocaleInfo {
		code: "he",
		name: "Hebrew",
		native_name: "עברית",
		direction: Direction::Rtl,
	},
];

/// Errors raised when a configured locale cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocaleError {
	#[error("locale identifier is empty")]
	Empty,

	#[error("unsupported locale: {0}")]
	Unsupported(String),
}

/// Normalize a locale identifier to the underscore form Folio stores.
///
/// `pt-BR`, `pt_br` and `PT_BR` all become `pt_BR`. The language part is
/// lowercased, the region part uppercased. Surrounding whitespace is dropped.
pub fn normalize_locale(locale: &str) -> String {
	let trimmed = locale.trim();
	match trimmed.split_once(|c: char| c == '-' || c == '_') {
		Some((lang, region)) => format!(
			"{}_{}",
			lang.to_ascii_lowercase(),
			region.to_ascii_uppercase()
		),
		None => trimmed.to_ascii_lowercase(),
	}
}

/// Get metadata for a locale.
///
/// Returns `None` if the locale is unknown.
pub fn locale_info(locale: &str) -> Option<&'static LocaleInfo> {
	LOCALES.iter().find(|l| l.code == locale)
}

/// Check if a locale uses right-to-left text direction.
///
/// Returns `false` for unknown locales.
pub fn is_rtl(locale: &str) -> bool {
	locale_info(locale).is_some_and(|info| info.direction == Direction::Rtl)
}

/// Check if Folio has metadata for a locale.
pub fn is_supported(locale: &str) -> bool {
	LOCALES.iter().any(|l| l.code == locale)
}

/// Check that a locale is non-empty and known.
pub fn ensure_supported(locale: &str) -> Result<(), LocaleError> {
	if locale.is_empty() {
		return Err(LocaleError::Empty);
	}
	if !is_supported(locale) {
		return Err(LocaleError::Unsupported(locale.to_string()));
	}
	Ok(())
}

/// Get all known locales.
pub fn available_locales() -> &'static [LocaleInfo] {
	LOCALES
}
