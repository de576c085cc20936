// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Issuing invitations and recording replies.
//!
//! # Security
//!
//! - Plaintext keys are returned to the caller once and never logged
//! - Replies are looked up by key hash
//! - Only pending invitations change status

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::error::{InvitationError, Result};
use crate::invitation::{Invitation, InvitationDraft, DEFAULT_EXPIRY_DAYS};
use crate::key::hash_invitation_key;
use crate::kind::InvitationKind;
use crate::mailer::InvitationMailer;
use crate::store::InvitationStore;
use crate::types::{InvitationId, InvitationStatus};
use crate::urls::InvitationUrls;

/// Site wide invitation settings.
#[derive(Debug, Clone)]
pub struct InvitationSettings {
	pub base_url: Url,
	pub context_path: String,
	pub expiry_days: i64,
}

impl InvitationSettings {
	pub fn new(base_url: Url, context_path: impl Into<String>) -> Self {
		Self {
			base_url,
			context_path: context_path.into(),
			expiry_days: DEFAULT_EXPIRY_DAYS,
		}
	}

	pub fn with_expiry_days(mut self, days: i64) -> Self {
		self.expiry_days = days;
		self
	}
}

/// Result of a successful dispatch.
#[derive(Debug, Clone)]
pub struct DispatchedInvitation {
	pub invitation: Invitation,
	/// Plaintext key. Only available here.
	pub key: String,
	pub urls: InvitationUrls,
	pub email_sent: bool,
}

#[derive(Clone)]
pub struct InvitationService {
	store: Arc<dyn InvitationStore>,
	mailer: Arc<dyn InvitationMailer>,
	settings: InvitationSettings,
}

impl InvitationService {
	pub fn new(
		store: Arc<dyn InvitationStore>,
		mailer: Arc<dyn InvitationMailer>,
		settings: InvitationSettings,
	) -> Self {
		Self {
			store,
			mailer,
			settings,
		}
	}

	pub fn settings(&self) -> &InvitationSettings {
		&self.settings
	}

	/// Reply links for a plaintext key.
	pub fn urls(&self, key: &str) -> Result<InvitationUrls> {
		InvitationUrls::build(&self.settings.base_url, &self.settings.context_path, key)
	}

	/// Issue and store an invitation, mailing it when asked to.
	///
	/// Returns `Ok(None)` when the kind vetoes the invitation in
	/// [`InvitationKind::pre_dispatch`]; nothing is stored in that case. A
	/// failed email is logged and does not undo the stored invitation.
	#[tracing::instrument(
		skip(self, kind, draft),
		fields(kind = kind.name(), context_id = %draft.context_id)
	)]
	pub async fn dispatch(
		&self,
		kind: &dyn InvitationKind,
		draft: InvitationDraft,
		send_email: bool,
	) -> Result<Option<DispatchedInvitation>> {
		if !kind.pre_dispatch(&draft) {
			info!("invitation vetoed by pre-dispatch check");
			return Ok(None);
		}

		let payload = build_payload(&draft, kind.payload());
		let (invitation, key) = Invitation::issue(
			kind.name(),
			draft,
			self.settings.expiry_days,
			payload,
			Utc::now(),
		)?;
		let urls = self.urls(&key)?;

		self.store.create(&invitation).await?;
		info!(invitation_id = %invitation.id, expires_at = %invitation.expires_at, "invitation created");

		let mut email_sent = false;
		if send_email {
			match (invitation.email.as_deref(), kind.email(&invitation, &urls)) {
				(Some(to), Some(email)) => match self.mailer.send(to, &email).await {
					Ok(()) => {
						email_sent = true;
						debug!(invitation_id = %invitation.id, "invitation email sent");
					}
					Err(e) => {
						error!(invitation_id = %invitation.id, error = %e, "failed to send invitation email");
					}
				},
				(None, _) => debug!(invitation_id = %invitation.id, "no recipient, email skipped"),
				(_, None) => debug!(invitation_id = %invitation.id, "kind has no email"),
			}
		}

		Ok(Some(DispatchedInvitation {
			invitation,
			key,
			urls,
			email_sent,
		}))
	}

	/// Accept the invitation carrying `key`.
	///
	/// An overdue invitation is marked expired instead and
	/// [`InvitationError::Expired`] is returned.
	#[tracing::instrument(skip(self, key))]
	pub async fn accept(&self, key: &str) -> Result<Invitation> {
		let invitation = self.find_by_key(key).await?;
		self.transition(invitation, InvitationStatus::Accepted, Utc::now())
			.await
	}

	#[tracing::instrument(skip(self, key))]
	pub async fn decline(&self, key: &str) -> Result<Invitation> {
		let invitation = self.find_by_key(key).await?;
		self.transition(invitation, InvitationStatus::Declined, Utc::now())
			.await
	}

	#[tracing::instrument(skip(self), fields(invitation_id = %id))]
	pub async fn cancel(&self, id: &InvitationId) -> Result<Invitation> {
		let invitation = self.store.get(id).await?.ok_or(InvitationError::NotFound)?;
		self.transition(invitation, InvitationStatus::Cancelled, Utc::now())
			.await
	}

	/// Mark every pending invitation past its expiry date as expired.
	///
	/// Returns how many were marked.
	#[tracing::instrument(skip(self))]
	pub async fn expire_overdue(&self, now: DateTime<Utc>) -> Result<usize> {
		let overdue = self.store.list_overdue(now).await?;
		let mut expired = 0;
		for invitation in overdue {
			if self
				.store
				.update_status(&invitation.id, InvitationStatus::Expired, now)
				.await?
			{
				expired += 1;
			}
		}
		if expired > 0 {
			info!(expired, "expired overdue invitations");
		}
		Ok(expired)
	}

	async fn find_by_key(&self, key: &str) -> Result<Invitation> {
		let hash = hash_invitation_key(key);
		match self.store.get_by_key_hash(&hash).await? {
			Some(invitation) => Ok(invitation),
			None => {
				debug!("no invitation for key");
				Err(InvitationError::NotFound)
			}
		}
	}

	async fn transition(
		&self,
		mut invitation: Invitation,
		to: InvitationStatus,
		now: DateTime<Utc>,
	) -> Result<Invitation> {
		if !invitation.status.can_transition_to(to) {
			warn!(
				invitation_id = %invitation.id,
				from = %invitation.status,
				to = %to,
				"rejected invitation status change"
			);
			return Err(InvitationError::InvalidTransition {
				from: invitation.status,
				to,
			});
		}

		if to == InvitationStatus::Accepted && invitation.is_expired_at(now) {
			if !self
				.store
				.update_status(&invitation.id, InvitationStatus::Expired, now)
				.await?
			{
				return Err(self.stale_update(&invitation.id, to).await);
			}
			info!(invitation_id = %invitation.id, "overdue invitation marked expired");
			return Err(InvitationError::Expired(invitation.id));
		}

		if !self.store.update_status(&invitation.id, to, now).await? {
			return Err(self.stale_update(&invitation.id, to).await);
		}
		invitation.status = to;
		invitation.updated_at = now;

		info!(invitation_id = %invitation.id, status = %to, "invitation status changed");
		Ok(invitation)
	}

	/// The store refused a status change on a row we read as pending. Report
	/// what it holds now.
	async fn stale_update(&self, id: &InvitationId, to: InvitationStatus) -> InvitationError {
		match self.store.get(id).await {
			Ok(Some(current)) => {
				warn!(
					invitation_id = %id,
					from = %current.status,
					to = %to,
					"invitation changed before status update"
				);
				InvitationError::InvalidTransition {
					from: current.status,
					to,
				}
			}
			Ok(None) => InvitationError::NotFound,
			Err(e) => e,
		}
	}
}

/// Recipient and context fields merged with the kind's own data. Keys the
/// kind sets win.
fn build_payload(draft: &InvitationDraft, kind_payload: serde_json::Value) -> serde_json::Value {
	let mut payload = serde_json::json!({
		"email": draft.email,
		"context_id": draft.context_id,
		"assoc_id": draft.assoc_id,
	});
	match (payload.as_object_mut(), kind_payload) {
		(Some(base), serde_json::Value::Object(extra)) => {
			base.extend(extra);
		}
		(_, serde_json::Value::Null) => {}
		(Some(base), other) => {
			base.insert("data".to_string(), other);
		}
		(None, _) => {}
	}
	payload
}
