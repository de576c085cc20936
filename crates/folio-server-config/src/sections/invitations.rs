// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Invitation configuration.

use serde::Deserialize;

use crate::error::ConfigError;

const DEFAULT_EXPIRATION_DAYS: i64 = 3;
/// Ten years. Keeps issued expiry dates well inside the calendar range.
pub const MAX_EXPIRATION_DAYS: i64 = 3650;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitationsConfig {
	/// Days before an unanswered invitation expires.
	pub expiration_days: i64,
}

impl Default for InvitationsConfig {
	fn default() -> Self {
		Self {
			expiration_days: DEFAULT_EXPIRATION_DAYS,
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvitationsConfigLayer {
	#[serde(default)]
	pub expiration_days: Option<i64>,
}

impl InvitationsConfigLayer {
	pub fn merge(&mut self, other: InvitationsConfigLayer) {
		if other.expiration_days.is_some() {
			self.expiration_days = other.expiration_days;
		}
	}

	pub fn finalize(self) -> Result<InvitationsConfig, ConfigError> {
		let expiration_days = self.expiration_days.unwrap_or(DEFAULT_EXPIRATION_DAYS);
		if !(1..=MAX_EXPIRATION_DAYS).contains(&expiration_days) {
			return Err(ConfigError::invalid(
				"invitations.expiration_days",
				format!("must be between 1 and {MAX_EXPIRATION_DAYS}, got {expiration_days}"),
			));
		}
		Ok(InvitationsConfig { expiration_days })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_default_is_three_days() {
		let config = InvitationsConfigLayer::default().finalize().unwrap();
		assert_eq!(config.expiration_days, 3);
		assert_eq!(config, InvitationsConfig::default());
	}

	#[test]
	fn test_zero_is_rejected() {
		let layer = InvitationsConfigLayer {
			expiration_days: Some(0),
		};
		assert!(matches!(layer.finalize(), Err(ConfigError::InvalidValue { .. })));
	}

	proptest! {
		#[test]
		fn days_in_range_are_kept(days in 1i64..=MAX_EXPIRATION_DAYS) {
			let layer = InvitationsConfigLayer { expiration_days: Some(days) };
			prop_assert_eq!(layer.finalize().unwrap().expiration_days, days);
		}

		#[test]
		fn non_positive_days_fail(days in -10_000i64..=0) {
			let layer = InvitationsConfigLayer { expiration_days: Some(days) };
			prop_assert!(layer.finalize().is_err());
		}

		#[test]
		fn days_past_the_cap_fail(days in (MAX_EXPIRATION_DAYS + 1)..=i64::MAX) {
			let layer = InvitationsConfigLayer { expiration_days: Some(days) };
			prop_assert!(layer.finalize().is_err());
		}
	}
}
