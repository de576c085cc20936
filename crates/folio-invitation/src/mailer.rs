// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;

use crate::kind::InvitationEmail;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
	#[error("Mail transport failed: {0}")]
	Transport(String),

	#[error("Invalid recipient: {0}")]
	InvalidRecipient(String),
}

/// Delivers invitation emails.
#[async_trait]
pub trait InvitationMailer: Send + Sync {
	async fn send(&self, to: &str, email: &InvitationEmail) -> Result<(), MailError>;
}
