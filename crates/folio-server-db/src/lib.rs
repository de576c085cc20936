// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! # folio-server-db
//!
//! Persistence layer for Folio server using SQLite via sqlx.
//!
//! ## Repository Pattern
//!
//! Each domain has a `*Store` trait and a `*Repository` struct holding a
//! `SqlitePool`. Inherent methods carry the SQL and the
//! `#[tracing::instrument]` spans; the trait impl delegates to them.
//! Invitations implement [`folio_invitation::InvitationStore`] instead of a
//! local trait so the invitation service can run on top of SQLite.
//!
//! ## Error Handling
//!
//! | Variant | When to use |
//! |---------|-------------|
//! | `NotFound` | Update of a row that must exist |
//! | `Conflict` | Unique constraint violation (username, key hash) |
//! | `Sqlx` | Unexpected database errors, via `?` |
//! | `Internal` | Invalid stored data (unparseable UUID or timestamp) |
//!
//! Lookups where absence is normal return `Result<Option<T>>`.
//!
//! ## Testing
//!
//! Tests run against an in-memory database created by
//! `testing::create_test_pool`, which applies the same migrations as
//! production.

mod error;
pub mod invitation;
pub mod migrations;
pub mod pool;
mod timestamp;
pub mod user;

#[cfg(test)]
pub mod testing;

pub use error::{DbError, Result};
pub use invitation::InvitationRepository;
pub use migrations::run_migrations;
pub use pool::create_pool;
pub use user::{LocaleMigration, UserRepository, UserStore};
