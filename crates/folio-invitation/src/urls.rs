// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Accept and decline links embedded in invitation emails.

use url::Url;

use crate::error::{InvitationError, Result};

/// Page that handles invitation replies.
pub const REPLY_PAGE: &str = "invitation";
pub const ACCEPT_OP: &str = "accept";
pub const DECLINE_OP: &str = "decline";

/// The two reply links of an invitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitationUrls {
	pub accept: Url,
	pub decline: Url,
}

impl InvitationUrls {
	/// Build `{base}/{context_path}/invitation/{accept|decline}?key={key}`.
	///
	/// Any path already on `base_url` is kept, so the site can live under a
	/// prefix.
	pub fn build(base_url: &Url, context_path: &str, key: &str) -> Result<Self> {
		Ok(Self {
			accept: reply_url(base_url, context_path, ACCEPT_OP, key)?,
			decline: reply_url(base_url, context_path, DECLINE_OP, key)?,
		})
	}
}

fn reply_url(base_url: &Url, context_path: &str, op: &str, key: &str) -> Result<Url> {
	let mut url = base_url.clone();
	url.set_query(None);
	url.set_fragment(None);
	url.path_segments_mut()
		.map_err(|()| InvitationError::InvalidBaseUrl(base_url.to_string()))?
		.pop_if_empty()
		.extend([context_path, REPLY_PAGE, op]);
	url.query_pairs_mut().append_pair("key", key);
	Ok(url)
}
