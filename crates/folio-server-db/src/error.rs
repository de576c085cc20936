// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use folio_invitation::InvitationError;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
	#[error("Database error: {0}")]
	Sqlx(#[from] sqlx::Error),

	#[error("Not found: {0}")]
	NotFound(String),

	#[error("Conflict: {0}")]
	Conflict(String),

	#[error("Internal: {0}")]
	Internal(String),

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DbError>;

impl From<DbError> for InvitationError {
	fn from(err: DbError) -> Self {
		InvitationError::store(err)
	}
}

/// Map unique constraint violations to [`DbError::Conflict`].
pub(crate) fn conflict_on_unique(err: sqlx::Error, what: &str) -> DbError {
	match err.as_database_error() {
		Some(db_err) if db_err.is_unique_violation() => DbError::Conflict(format!("{what} already exists")),
		_ => DbError::Sqlx(err),
	}
}
