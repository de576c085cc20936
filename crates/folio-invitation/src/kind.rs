// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::invitation::{Invitation, InvitationDraft};
use crate::urls::InvitationUrls;

/// A rendered invitation email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitationEmail {
	pub subject: String,
	pub body: String,
}

/// A kind of invitation (reviewer request, editorial role, registration).
///
/// Kinds decide whether an invitation may be sent, what extra data it
/// carries and what the email says.
pub trait InvitationKind: Send + Sync {
	/// Stable name stored with each invitation.
	fn name(&self) -> &'static str;

	/// Kind specific data stored with the invitation.
	fn payload(&self) -> serde_json::Value {
		serde_json::Value::Object(serde_json::Map::new())
	}

	/// Returning false skips the invitation entirely.
	fn pre_dispatch(&self, _draft: &InvitationDraft) -> bool {
		true
	}

	/// The email to send, or `None` for kinds that are not mailed.
	fn email(&self, invitation: &Invitation, urls: &InvitationUrls) -> Option<InvitationEmail>;
}
