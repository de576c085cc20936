// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections for the Folio server.

pub mod database;
pub mod invitations;
pub mod logging;
pub mod site;

pub use database::{DatabaseConfig, DatabaseConfigLayer};
pub use invitations::{InvitationsConfig, InvitationsConfigLayer, MAX_EXPIRATION_DAYS};
pub use logging::{LoggingConfig, LoggingConfigLayer};
pub use site::{SiteConfig, SiteConfigLayer};
