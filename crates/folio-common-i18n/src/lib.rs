// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale support shared by every Folio crate.
//!
//! Folio stores user and author data per locale (`givenName` in `en`,
//! `givenName` in `fr_CA`, ...). This crate provides the pieces needed to
//! decide *which* locale to read:
//!
//! - [`LOCALES`] / [`locale_info`]: the locales Folio knows how to display
//! - [`LocaleContext`]: the active locale plus the site and context primary
//!   locales, and the de-duplicated precedence list built from them
//! - [`resolve_locale`]: picks the active locale for a request from the
//!   user's preference and the site's supported locales
//!
//! Locale identifiers use the underscore form (`pt_BR`), see
//! [`normalize_locale`].
//!
//! # Example
//!
//! ```
//! use folio_common_i18n::{resolve_locale, LocaleContext};
//!
//! let supported = ["en", "fr_CA"];
//! let active = resolve_locale(Some("fr-CA"), "en", &supported);
//! assert_eq!(active, "fr_CA");
//!
//! let ctx = LocaleContext::new(active, "en");
//! assert_eq!(ctx.precedence(None), vec!["fr_CA", "en"]);
//! ```

mod context;
mod locale;
mod resolve;

pub use context::LocaleContext;
pub use locale::{
	available_locales, ensure_supported, is_rtl, is_supported, locale_info, normalize_locale,
	Direction, LocaleError, LocaleInfo,
};
pub use resolve::resolve_locale;

pub use locale::{DEFAULT_LOCALE, LOCALES};
