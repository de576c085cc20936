// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identifier and status types for invitations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
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

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id)
			}
		}
	};
}

define_id_type!(InvitationId, "Unique identifier for an invitation.");
define_id_type!(ContextId, "Unique identifier for a journal or press.");

/// Lifecycle state of an invitation.
///
/// ```text
///            ┌──> accepted
/// pending ───┼──> declined
///            ├──> expired
///            └──> cancelled
/// ```
///
/// Every state other than `pending` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
	Pending,
	Accepted,
	Declined,
	Expired,
	Cancelled,
}

impl InvitationStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			InvitationStatus::Pending => "pending",
			InvitationStatus::Accepted => "accepted",
			InvitationStatus::Declined => "declined",
			InvitationStatus::Expired => "expired",
			InvitationStatus::Cancelled => "cancelled",
		}
	}

	pub fn is_final(&self) -> bool {
		!matches!(self, InvitationStatus::Pending)
	}

	/// Only pending invitations move, and only to a final state.
	pub fn can_transition_to(&self, next: InvitationStatus) -> bool {
		!self.is_final() && next.is_final()
	}
}

impl fmt::Display for InvitationStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown invitation status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for InvitationStatus {
	type Err = ParseStatusError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"pending" => Ok(InvitationStatus::Pending),
			"accepted" => Ok(InvitationStatus::Accepted),
			"declined" => Ok(InvitationStatus::Declined),
			"expired" => Ok(InvitationStatus::Expired),
			"cancelled" => Ok(InvitationStatus::Cancelled),
			other => Err(ParseStatusError(other.to_string())),
		}
	}
}
