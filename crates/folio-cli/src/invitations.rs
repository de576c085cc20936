// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Queue-style inspection of pending invitations.

use anyhow::Context;
use chrono::Utc;
use clap::Subcommand;
use folio_invitation::{ContextId, Invitation, InvitationId};
use folio_server_config::ServerConfig;
use folio_server_db::InvitationRepository;
use uuid::Uuid;

#[derive(Subcommand, Debug)]
pub enum InvitationsCommand {
	/// List pending invitations, oldest first
	List {
		/// Only invitations for this journal or press
		#[arg(long)]
		context: Option<Uuid>,
		/// Invitations per page
		#[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
		per_page: u32,
		/// Page to show, starting at 1
		#[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
		page: u32,
		/// Print JSON instead of a table
		#[arg(long)]
		json: bool,
	},
	/// Count pending invitations
	Total {
		/// Only invitations for this journal or press
		#[arg(long)]
		context: Option<Uuid>,
	},
	/// Delete one invitation, or all of them
	Purge {
		/// Invitation to delete
		id: Option<Uuid>,
		/// Delete every invitation
		#[arg(long, conflicts_with = "id", required_unless_present = "id")]
		all: bool,
	},
	/// Delete expired and overdue invitations
	PurgeExpired,
}

pub async fn run(command: InvitationsCommand, config: &ServerConfig) -> anyhow::Result<()> {
	let pool = crate::open_database(config).await?;
	let repo = InvitationRepository::new(pool);
	let output = execute(command, &repo).await?;
	println!("{output}");
	Ok(())
}

async fn execute(command: InvitationsCommand, repo: &InvitationRepository) -> anyhow::Result<String> {
	match command {
		InvitationsCommand::List {
			context,
			per_page,
			page,
			json,
		} => {
			let context = context.map(ContextId::new);
			let total = repo
				.count_pending_invitations(context.as_ref())
				.await
				.context("failed to count invitations")?;
			let invitations = repo
				.list_pending_invitations_page(context.as_ref(), per_page, page)
				.await
				.context("failed to list invitations")?;

			if json {
				let listing = serde_json::json!({
					"total": total,
					"page": page,
					"per_page": per_page,
					"invitations": invitations,
				});
				return Ok(serde_json::to_string_pretty(&listing)?);
			}

			let mut lines = vec![format!("{total} pending invitations")];
			lines.extend(invitations.iter().map(format_row));
			lines.push(pagination(total, per_page, page));
			Ok(lines.join("\n"))
		}
		InvitationsCommand::Total { context } => {
			let context = context.map(ContextId::new);
			let total = repo
				.count_pending_invitations(context.as_ref())
				.await
				.context("failed to count invitations")?;
			Ok(total.to_string())
		}
		InvitationsCommand::Purge { id: Some(id), .. } => {
			let id = InvitationId::new(id);
			let deleted = repo
				.delete_invitation(&id)
				.await
				.context("failed to delete invitation")?;
			if !deleted {
				anyhow::bail!("invalid invitation id: {id}");
			}
			Ok(format!("deleted invitation {id}"))
		}
		InvitationsCommand::Purge { id: None, .. } => {
			let deleted = repo
				.delete_all_invitations()
				.await
				.context("failed to delete invitations")?;
			Ok(format!("deleted {deleted} invitations"))
		}
		InvitationsCommand::PurgeExpired => {
			let deleted = repo
				.delete_expired_invitations(Utc::now())
				.await
				.context("failed to purge expired invitations")?;
			tracing::info!(deleted, "purged expired invitations");
			Ok(deleted.to_string())
		}
	}
}

fn format_row(invitation: &Invitation) -> String {
	format!(
		"{}\t{}\t{}\t{}\t{}",
		invitation.id,
		invitation.kind,
		invitation.email.as_deref().unwrap_or("-"),
		invitation.context_id,
		invitation.expires_at.format("%Y-%m-%d %H:%M"),
	)
}

fn pagination(total: u64, per_page: u32, page: u32) -> String {
	let pages = total.div_ceil(u64::from(per_page)).max(1);
	let page = u64::from(page);
	let mut line = format!("page {page} of {pages}");
	if page > 1 {
		line.push_str(&format!(", previous {}", (page - 1).min(pages)));
	}
	if page < pages {
		line.push_str(&format!(", next {}", page + 1));
	}
	line
}
