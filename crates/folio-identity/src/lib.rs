// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity records for Folio users and authors.
//!
//! This crate provides:
//! - [`LocalizedValues`] / [`LocalizedRecord`]: per-locale field storage
//! - [`resolve_localized`], [`resolve_full_name`],
//!   [`resolve_family_name_localized`]: locale fallback for display values
//! - [`Identity`]: names, affiliation, biography, contact fields
//! - [`User`]: a registered account wrapping an [`Identity`]
//! - [`country_name`]: ISO 3166-1 alpha-2 display names

pub mod country;
pub mod fields;
pub mod identity;
pub mod localized;
pub mod resolve;
pub mod user;

pub use country::{country_name, is_valid_country_code};
pub use identity::Identity;
pub use localized::{LocalizedRecord, LocalizedValues};
pub use resolve::{
	resolve_family_name_localized, resolve_full_name, resolve_localized, NameOptions,
};
pub use user::{User, UserId};
