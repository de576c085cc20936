// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::types::{InvitationId, InvitationStatus};

#[derive(Debug, thiserror::Error)]
pub enum InvitationError {
	#[error("Invitation not found")]
	NotFound,

	#[error("Invitation {0} has expired")]
	Expired(InvitationId),

	#[error("Invitation cannot move from {from} to {to}")]
	InvalidTransition {
		from: InvitationStatus,
		to: InvitationStatus,
	},

	#[error("Invalid invitation expiry: {0} days")]
	InvalidExpiry(i64),

	#[error("Invalid base URL: {0}")]
	InvalidBaseUrl(String),

	#[error("Invitation store error: {0}")]
	Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl InvitationError {
	/// Wrap a storage backend error.
	pub fn store(err: impl std::error::Error + Send + Sync + 'static) -> Self {
		Self::Store(Box::new(err))
	}
}

pub type Result<T> = std::result::Result<T, InvitationError>;
