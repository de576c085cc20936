// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Invitations for Folio.
//!
//! An invitation asks a user (or an email address) to take on a role in a
//! journal. It is issued with a random key, mailed as a pair of accept and
//! decline links, and moves from `pending` to exactly one final status.
//!
//! Storage and mail delivery sit behind the [`InvitationStore`] and
//! [`InvitationMailer`] traits; `folio-server-db` provides the SQLite store.

pub mod error;
pub mod invitation;
pub mod key;
pub mod kind;
pub mod mailer;
pub mod service;
pub mod store;
pub mod types;
pub mod urls;

pub use error::{InvitationError, Result};
pub use invitation::{Invitation, InvitationDraft, DEFAULT_EXPIRY_DAYS};
pub use key::{generate_invitation_key, hash_invitation_key, verify_invitation_key};
pub use kind::{InvitationEmail, InvitationKind};
pub use mailer::{InvitationMailer, MailError};
pub use service::{DispatchedInvitation, InvitationService, InvitationSettings};
pub use store::InvitationStore;
pub use types::{ContextId, InvitationId, InvitationStatus, ParseStatusError};
pub use urls::InvitationUrls;
