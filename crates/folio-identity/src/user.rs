// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Registered users.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::Identity;
use crate::localized::{LocalizedRecord, LocalizedValues};

/// Unique identifier for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
	/// Create a new ID from a UUID.
	pub fn new(id: Uuid) -> Self {
		Self(id)
	}

	/// Generate a new random ID.
	pub fn generate() -> Self {
		Self(Uuid::new_v4())
	}

	/// Get the inner UUID value.
	pub fn into_inner(self) -> Uuid {
		self.0
	}
}

impl fmt::Display for UserId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<Uuid> for UserId {
	fn from(id: Uuid) -> Self {
		Self(id)
	}
}

/// A user account.
///
/// The display data lives in [`Identity`]; `User` adds the account fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
	pub id: UserId,

	/// Unique login name.
	pub username: String,

	/// Disabled users cannot log in and are hidden from lookups unless the
	/// caller asks for them.
	pub disabled: bool,

	pub disabled_reason: Option<String>,

	pub date_registered: DateTime<Utc>,

	#[serde(flatten)]
	pub identity: Identity,
}

impl User {
	/// Create an enabled user with a fresh id.
	pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
		let mut identity = Identity::new();
		identity.email = Some(email.into());
		Self {
			id: UserId::generate(),
			username: username.into(),
			disabled: false,
			disabled_reason: None,
			date_registered: Utc::now(),
			identity,
		}
	}

	pub fn email(&self) -> Option<&str> {
		self.identity.email.as_deref()
	}

	pub fn disable(&mut self, reason: Option<String>) {
		self.disabled = true;
		self.disabled_reason = reason;
	}

	pub fn enable(&mut self) {
		self.disabled = false;
		self.disabled_reason = None;
	}
}

impl LocalizedRecord for User {
	fn localized_values(&self, field: &str) -> Option<&LocalizedValues> {
		self.identity.localized_values(field)
	}
}
