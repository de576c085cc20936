// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The invitation record and the draft it is issued from.

use chrono::{DateTime, Duration, Utc};
use folio_identity::UserId;
use serde::{Deserialize, Serialize};

use crate::error::{InvitationError, Result};
use crate::key::{generate_invitation_key, hash_invitation_key, verify_invitation_key};
use crate::types::{ContextId, InvitationId, InvitationStatus};

/// Days an invitation stays open when neither the site nor the draft says
/// otherwise.
pub const DEFAULT_EXPIRY_DAYS: i64 = 3;

/// An invitation sent to a user or an email address.
///
/// The plaintext key is never stored; see [`crate::key`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
	pub id: InvitationId,

	/// Name of the [`crate::InvitationKind`] that issued it.
	pub kind: String,

	/// Existing user being invited, if any.
	pub user_id: Option<UserId>,

	/// Address the invitation is mailed to.
	pub email: Option<String>,

	pub context_id: ContextId,

	/// Id of the object the invitation is about (a submission, a review
	/// round). Opaque to this crate.
	pub assoc_id: Option<String>,

	#[serde(skip_serializing, default)]
	pub key_hash: String,

	pub status: InvitationStatus,

	/// Kind specific data.
	pub payload: serde_json::Value,

	pub expires_at: DateTime<Utc>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl Invitation {
	/// Issue a pending invitation from `draft`.
	///
	/// Returns the invitation and the plaintext key. A positive draft expiry
	/// wins over `default_expiry_days`, and a preset key is hashed instead of
	/// generating one.
	///
	/// # Errors
	/// [`InvitationError::InvalidExpiry`] when the expiry that applies is not
	/// positive or puts the date out of range.
	pub fn issue(
		kind: impl Into<String>,
		draft: InvitationDraft,
		default_expiry_days: i64,
		payload: serde_json::Value,
		now: DateTime<Utc>,
	) -> Result<(Self, String)> {
		let days = draft
			.expiry_days
			.filter(|days| *days > 0)
			.unwrap_or(default_expiry_days);
		let expires_at = expiry_date(now, days)?;

		let (key, key_hash) = match draft.key {
			Some(key) => {
				let hash = hash_invitation_key(&key);
				(key, hash)
			}
			None => generate_invitation_key(),
		};

		let invitation = Self {
			id: InvitationId::generate(),
			kind: kind.into(),
			user_id: draft.user_id,
			email: draft.email,
			context_id: draft.context_id,
			assoc_id: draft.assoc_id,
			key_hash,
			status: InvitationStatus::Pending,
			payload,
			expires_at,
			created_at: now,
			updated_at: now,
		};
		Ok((invitation, key))
	}

	pub fn is_pending(&self) -> bool {
		self.status == InvitationStatus::Pending
	}

	/// Returns true once `now` is past the expiry date.
	pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
		now > self.expires_at
	}

	pub fn is_expired(&self) -> bool {
		self.is_expired_at(Utc::now())
	}

	/// Returns true if the invitation can still be replied to.
	pub fn is_valid(&self) -> bool {
		self.is_pending() && !self.is_expired()
	}

	pub fn is_key_valid(&self, key: &str) -> bool {
		verify_invitation_key(key, &self.key_hash)
	}
}

fn expiry_date(now: DateTime<Utc>, days: i64) -> Result<DateTime<Utc>> {
	if days <= 0 {
		return Err(InvitationError::InvalidExpiry(days));
	}
	Duration::try_days(days)
		.and_then(|offset| now.checked_add_signed(offset))
		.ok_or(InvitationError::InvalidExpiry(days))
}

/// What a caller knows before an invitation is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitationDraft {
	pub context_id: ContextId,
	pub user_id: Option<UserId>,
	pub email: Option<String>,
	pub assoc_id: Option<String>,
	pub expiry_days: Option<i64>,
	pub key: Option<String>,
}

impl InvitationDraft {
	pub fn new(context_id: ContextId) -> Self {
		Self {
			context_id,
			user_id: None,
			email: None,
			assoc_id: None,
			expiry_days: None,
			key: None,
		}
	}

	pub fn for_user(mut self, user_id: UserId) -> Self {
		self.user_id = Some(user_id);
		self
	}

	pub fn to_email(mut self, email: impl Into<String>) -> Self {
		self.email = Some(email.into());
		self
	}

	pub fn about(mut self, assoc_id: impl Into<String>) -> Self {
		self.assoc_id = Some(assoc_id.into());
		self
	}

	/// Days the invitation stays open. Zero or less keeps the site default.
	pub fn expiry_days(mut self, days: i64) -> Self {
		self.expiry_days = Some(days);
		self
	}

	/// Use a known key instead of generating one.
	pub fn with_key(mut self, key: impl Into<String>) -> Self {
		self.key = Some(key.into());
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn draft() -> InvitationDraft {
		InvitationDraft::new(ContextId::generate()).to_email("reviewer@example.org")
	}

	#[test]
	fn issue_uses_default_expiry() {
		let now = Utc::now();
		let (invitation, key) =
			Invitation::issue("reviewer", draft(), DEFAULT_EXPIRY_DAYS, serde_json::Value::Null, now)
				.unwrap();

		assert!(invitation.is_pending());
		assert_eq!(invitation.expires_at, now + Duration::days(3));
		assert_eq!(invitation.created_at, now);
		assert!(invitation.is_key_valid(&key));
		assert_ne!(invitation.key_hash, key);
	}

	#[test]
	fn draft_expiry_overrides_default() {
		let now = Utc::now();
		let (invitation, _) = Invitation::issue(
			"reviewer",
			draft().expiry_days(14),
			DEFAULT_EXPIRY_DAYS,
			serde_json::Value::Null,
			now,
		)
		.unwrap();
		assert_eq!(invitation.expires_at, now + Duration::days(14));
	}

	#[test]
	fn preset_key_is_hashed() {
		let (invitation, key) = Invitation::issue(
			"reviewer",
			draft().with_key("known-key"),
			DEFAULT_EXPIRY_DAYS,
			serde_json::Value::Null,
			Utc::now(),
		)
		.unwrap();
		assert_eq!(key, "known-key");
		assert_eq!(invitation.key_hash, hash_invitation_key("known-key"));
	}

	#[test]
	fn expiry_boundary() {
		let now = Utc::now();
		let (invitation, _) =
			Invitation::issue("reviewer", draft(), 1, serde_json::Value::Null, now).unwrap();

		assert!(!invitation.is_expired_at(invitation.expires_at));
		assert!(invitation.is_expired_at(invitation.expires_at + Duration::seconds(1)));
		assert!(invitation.is_valid());
	}

	#[test]
	fn answered_invitation_is_not_valid() {
		let (mut invitation, _) =
			Invitation::issue("reviewer", draft(), DEFAULT_EXPIRY_DAYS, serde_json::Value::Null, Utc::now())
				.unwrap();
		invitation.status = InvitationStatus::Declined;
		assert!(!invitation.is_valid());
	}

	#[test]
	fn key_hash_is_not_serialized() {
		let (invitation, _) =
			Invitation::issue("reviewer", draft(), DEFAULT_EXPIRY_DAYS, serde_json::Value::Null, Utc::now())
				.unwrap();
		let json = serde_json::to_value(&invitation).unwrap();
		assert!(json.get("key_hash").is_none());
		assert_eq!(json["status"], "pending");
	}

	#[test]
	fn non_positive_draft_expiry_keeps_default() {
		let now = Utc::now();
		for days in [0, -5] {
			let (invitation, _) = Invitation::issue(
				"reviewer",
				draft().expiry_days(days),
				DEFAULT_EXPIRY_DAYS,
				serde_json::Value::Null,
				now,
			)
			.unwrap();
			assert_eq!(invitation.expires_at, now + Duration::days(DEFAULT_EXPIRY_DAYS));
		}
	}

	#[test]
	fn out_of_range_expiry_is_an_error() {
		let now = Utc::now();
		for days in [i64::MAX, 1_000_000_000] {
			let result = Invitation::issue(
				"reviewer",
				draft().expiry_days(days),
				DEFAULT_EXPIRY_DAYS,
				serde_json::Value::Null,
				now,
			);
			assert!(matches!(result, Err(InvitationError::InvalidExpiry(d)) if d == days));
		}

		let result = Invitation::issue("reviewer", draft(), 0, serde_json::Value::Null, now);
		assert!(matches!(result, Err(InvitationError::InvalidExpiry(0))));
	}
}
