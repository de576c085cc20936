// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Setting names shared with the persistence layer.

pub const GIVEN_NAME: &str = "givenName";
pub const FAMILY_NAME: &str = "familyName";
pub const PREFERRED_PUBLIC_NAME: &str = "preferredPublicName";
pub const AFFILIATION: &str = "affiliation";
pub const BIOGRAPHY: &str = "biography";

/// The localized settings that make up a person's name.
pub const NAME_FIELDS: [&str; 3] = [GIVEN_NAME, FAMILY_NAME, PREFERRED_PUBLIC_NAME];
