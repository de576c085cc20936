// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::invitation::Invitation;
use crate::types::{ContextId, InvitationId, InvitationStatus};

/// Persistence for invitations.
///
/// Backends wrap their own errors with [`crate::InvitationError::store`].
#[async_trait]
pub trait InvitationStore: Send + Sync {
	async fn create(&self, invitation: &Invitation) -> Result<()>;

	async fn get(&self, id: &InvitationId) -> Result<Option<Invitation>>;

	async fn get_by_key_hash(&self, key_hash: &str) -> Result<Option<Invitation>>;

	/// Move a pending invitation to `status` and bump `updated_at`.
	///
	/// Must only match a row that is still pending, so two replies racing on
	/// the same invitation cannot both win. Returns false if nothing matched.
	async fn update_status(
		&self,
		id: &InvitationId,
		status: InvitationStatus,
		now: DateTime<Utc>,
	) -> Result<bool>;

	/// Pending invitations, oldest first, optionally for one context.
	async fn list_pending(&self, context_id: Option<&ContextId>) -> Result<Vec<Invitation>>;

	async fn count_pending(&self, context_id: Option<&ContextId>) -> Result<u64>;

	/// Pending invitations whose expiry date is before `now`.
	async fn list_overdue(&self, now: DateTime<Utc>) -> Result<Vec<Invitation>>;

	/// Delete invitations marked expired and pending ones past their expiry
	/// date. Returns the number of rows removed.
	async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64>;
}
