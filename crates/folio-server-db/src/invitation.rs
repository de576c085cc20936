// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Invitation repository for database operations.
//!
//! Only key hashes are stored. Lookups by key go through
//! [`folio_invitation::hash_invitation_key`] first.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_identity::UserId;
use folio_invitation::{
	ContextId, Invitation, InvitationError, InvitationId, InvitationStatus, InvitationStore,
};
use sqlx::{sqlite::SqlitePool, Row};
use uuid::Uuid;

use crate::error::{conflict_on_unique, DbError};
use crate::timestamp;

const INVITATION_COLUMNS: &str = "id, kind, user_id, email, context_id, assoc_id, key_hash, status, payload, expires_at, created_at, updated_at";

/// Repository for invitation database operations.
#[derive(Clone)]
pub struct InvitationRepository {
	pool: SqlitePool,
}

impl InvitationRepository {
	/// Create a new repository with the given connection pool.
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Insert a new invitation.
	///
	/// # Errors
	/// Returns `DbError::Conflict` if the id or key hash is already stored.
	#[tracing::instrument(skip(self, invitation), fields(invitation_id = %invitation.id, kind = %invitation.kind))]
	pub async fn create_invitation(&self, invitation: &Invitation) -> Result<(), DbError> {
		let payload = serde_json::to_string(&invitation.payload)?;

		sqlx::query(
			r#"
			INSERT INTO invitations (
				id, kind, user_id, email, context_id, assoc_id, key_hash,
				status, payload, expires_at, created_at, updated_at
			) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(invitation.id.to_string())
		.bind(&invitation.kind)
		.bind(invitation.user_id.map(|id| id.to_string()))
		.bind(&invitation.email)
		.bind(invitation.context_id.to_string())
		.bind(&invitation.assoc_id)
		.bind(&invitation.key_hash)
		.bind(invitation.status.as_str())
		.bind(payload)
		.bind(timestamp::to_db(invitation.expires_at))
		.bind(timestamp::to_db(invitation.created_at))
		.bind(timestamp::to_db(invitation.updated_at))
		.execute(&self.pool)
		.await
		.map_err(|e| conflict_on_unique(e, "invitation"))?;

		tracing::debug!(invitation_id = %invitation.id, "invitation created");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(invitation_id = %id))]
	pub async fn get_invitation(&self, id: &InvitationId) -> Result<Option<Invitation>, DbError> {
		let row = sqlx::query(&format!(
			"SELECT {INVITATION_COLUMNS} FROM invitations WHERE id = ?"
		))
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| parse_invitation_row(&r)).transpose()
	}

	#[tracing::instrument(skip(self, key_hash))]
	pub async fn get_invitation_by_key_hash(&self, key_hash: &str) -> Result<Option<Invitation>, DbError> {
		let row = sqlx::query(&format!(
			"SELECT {INVITATION_COLUMNS} FROM invitations WHERE key_hash = ?"
		))
		.bind(key_hash)
		.fetch_optional(&self.pool)
		.await?;

		match row {
			Some(row) => {
				let invitation = parse_invitation_row(&row)?;
				tracing::debug!(invitation_id = %invitation.id, "invitation found by key hash");
				Ok(Some(invitation))
			}
			None => Ok(None),
		}
	}

	/// Move a pending invitation to `status`.
	///
	/// # Returns
	/// `false` if no invitation has this id or it is no longer pending.
	#[tracing::instrument(skip(self), fields(invitation_id = %id, status = %status))]
	pub async fn update_invitation_status(
		&self,
		id: &InvitationId,
		status: InvitationStatus,
		now: DateTime<Utc>,
	) -> Result<bool, DbError> {
		let result = sqlx::query(
			"UPDATE invitations SET status = ?, updated_at = ? WHERE id = ? AND status = 'pending'",
		)
		.bind(status.as_str())
		.bind(timestamp::to_db(now))
		.bind(id.to_string())
		.execute(&self.pool)
		.await?;
		Ok(result.rows_affected() > 0)
	}

	/// Pending invitations ordered by creation date, oldest first.
	#[tracing::instrument(skip(self))]
	pub async fn list_pending_invitations(
		&self,
		context_id: Option<&ContextId>,
	) -> Result<Vec<Invitation>, DbError> {
		let rows = sqlx::query(&format!(
			r#"
			SELECT {INVITATION_COLUMNS} FROM invitations
			WHERE status = 'pending' AND (? IS NULL OR context_id = ?)
			ORDER BY created_at
			"#
		))
		.bind(context_id.map(|c| c.to_string()))
		.bind(context_id.map(|c| c.to_string()))
		.fetch_all(&self.pool)
		.await?;

		let mut invitations = Vec::with_capacity(rows.len());
		for row in rows {
			invitations.push(parse_invitation_row(&row)?);
		}
		Ok(invitations)
	}

	/// One page of [`Self::list_pending_invitations`]. Pages start at 1;
	/// page 0 is read as page 1.
	#[tracing::instrument(skip(self))]
	pub async fn list_pending_invitations_page(
		&self,
		context_id: Option<&ContextId>,
		per_page: u32,
		page: u32,
	) -> Result<Vec<Invitation>, DbError> {
		let offset = i64::from(page.max(1) - 1) * i64::from(per_page);
		let rows = sqlx::query(&format!(
			r#"
			SELECT {INVITATION_COLUMNS} FROM invitations
			WHERE status = 'pending' AND (? IS NULL OR context_id = ?)
			ORDER BY created_at
			LIMIT ? OFFSET ?
			"#
		))
		.bind(context_id.map(|c| c.to_string()))
		.bind(context_id.map(|c| c.to_string()))
		.bind(i64::from(per_page))
		.bind(offset)
		.fetch_all(&self.pool)
		.await?;

		let mut invitations = Vec::with_capacity(rows.len());
		for row in rows {
			invitations.push(parse_invitation_row(&row)?);
		}
		Ok(invitations)
	}

	#[tracing::instrument(skip(self))]
	pub async fn count_pending_invitations(&self, context_id: Option<&ContextId>) -> Result<u64, DbError> {
		let (count,): (i64,) = sqlx::query_as(
			"SELECT COUNT(*) FROM invitations WHERE status = 'pending' AND (? IS NULL OR context_id = ?)",
		)
		.bind(context_id.map(|c| c.to_string()))
		.bind(context_id.map(|c| c.to_string()))
		.fetch_one(&self.pool)
		.await?;
		Ok(count as u64)
	}

	/// Pending invitations whose expiry date is before `now`.
	#[tracing::instrument(skip(self))]
	pub async fn list_overdue_invitations(&self, now: DateTime<Utc>) -> Result<Vec<Invitation>, DbError> {
		let rows = sqlx::query(&format!(
			r#"
			SELECT {INVITATION_COLUMNS} FROM invitations
			WHERE status = 'pending' AND expires_at < ?
			ORDER BY expires_at
			"#
		))
		.bind(timestamp::to_db(now))
		.fetch_all(&self.pool)
		.await?;

		let mut invitations = Vec::with_capacity(rows.len());
		for row in rows {
			invitations.push(parse_invitation_row(&row)?);
		}
		Ok(invitations)
	}

	/// # Returns
	/// `false` if no invitation has this id.
	#[tracing::instrument(skip(self), fields(invitation_id = %id))]
	pub async fn delete_invitation(&self, id: &InvitationId) -> Result<bool, DbError> {
		let result = sqlx::query("DELETE FROM invitations WHERE id = ?")
			.bind(id.to_string())
			.execute(&self.pool)
			.await?;
		let deleted = result.rows_affected() > 0;
		if deleted {
			tracing::info!(invitation_id = %id, "invitation deleted");
		}
		Ok(deleted)
	}

	/// Delete every invitation regardless of status.
	#[tracing::instrument(skip(self))]
	pub async fn delete_all_invitations(&self) -> Result<u64, DbError> {
		let result = sqlx::query("DELETE FROM invitations")
			.execute(&self.pool)
			.await?;
		let deleted = result.rows_affected();
		tracing::info!(deleted, "all invitations deleted");
		Ok(deleted)
	}

	/// Delete invitations marked expired and pending ones past their expiry.
	#[tracing::instrument(skip(self))]
	pub async fn delete_expired_invitations(&self, now: DateTime<Utc>) -> Result<u64, DbError> {
		let result = sqlx::query(
			r#"
			DELETE FROM invitations
			WHERE status = 'expired'
			   OR (status = 'pending' AND expires_at < ?)
			"#,
		)
		.bind(timestamp::to_db(now))
		.execute(&self.pool)
		.await?;

		let deleted = result.rows_affected();
		if deleted > 0 {
			tracing::info!(deleted, "expired invitations deleted");
		}
		Ok(deleted)
	}
}

#[async_trait]
impl InvitationStore for InvitationRepository {
	async fn create(&self, invitation: &Invitation) -> Result<(), InvitationError> {
		Ok(self.create_invitation(invitation).await?)
	}

	async fn get(&self, id: &InvitationId) -> Result<Option<Invitation>, InvitationError> {
		Ok(self.get_invitation(id).await?)
	}

	async fn get_by_key_hash(&self, key_hash: &str) -> Result<Option<Invitation>, InvitationError> {
		Ok(self.get_invitation_by_key_hash(key_hash).await?)
	}

	async fn update_status(
		&self,
		id: &InvitationId,
		status: InvitationStatus,
		now: DateTime<Utc>,
	) -> Result<bool, InvitationError> {
		Ok(self.update_invitation_status(id, status, now).await?)
	}

	async fn list_pending(&self, context_id: Option<&ContextId>) -> Result<Vec<Invitation>, InvitationError> {
		Ok(self.list_pending_invitations(context_id).await?)
	}

	async fn count_pending(&self, context_id: Option<&ContextId>) -> Result<u64, InvitationError> {
		Ok(self.count_pending_invitations(context_id).await?)
	}

	async fn list_overdue(&self, now: DateTime<Utc>) -> Result<Vec<Invitation>, InvitationError> {
		Ok(self.list_overdue_invitations(now).await?)
	}

	async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, InvitationError> {
		Ok(self.delete_expired_invitations(now).await?)
	}
}

fn parse_uuid(value: &str, column: &str) -> Result<Uuid, DbError> {
	Uuid::parse_str(value).map_err(|e| DbError::Internal(format!("Invalid {column} UUID: {e}")))
}

fn parse_invitation_row(row: &sqlx::sqlite::SqliteRow) -> Result<Invitation, DbError> {
	let id_str: String = row.get("id");
	let user_id_str: Option<String> = row.get("user_id");
	let context_id_str: String = row.get("context_id");
	let status_str: String = row.get("status");
	let payload_json: String = row.get("payload");
	let expires_at_str: String = row.get("expires_at");
	let created_at_str: String = row.get("created_at");
	let updated_at_str: String = row.get("updated_at");

	let user_id = user_id_str
		.map(|s| parse_uuid(&s, "user_id").map(UserId::new))
		.transpose()?;
	let status: InvitationStatus = status_str
		.parse()
		.map_err(|e| DbError::Internal(format!("{e}")))?;

	Ok(Invitation {
		id: InvitationId::new(parse_uuid(&id_str, "invitation id")?),
		kind: row.get("kind"),
		user_id,
		email: row.get("email"),
		context_id: ContextId::new(parse_uuid(&context_id_str, "context_id")?),
		assoc_id: row.get("assoc_id"),
		key_hash: row.get("key_hash"),
		status,
		payload: serde_json::from_str(&payload_json)?,
		expires_at: timestamp::from_db(&expires_at_str, "expires_at")?,
		created_at: timestamp::from_db(&created_at_str, "created_at")?,
		updated_at: timestamp::from_db(&updated_at_str, "updated_at")?,
	})
}
