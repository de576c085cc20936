// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User repository for database operations.
//!
//! A user is one row in `users` plus its localized identity fields in
//! `user_settings`, one row per `(user, locale, setting)`. Settings are read
//! back in insertion order, which is the order locale fallback sees them.

use async_trait::async_trait;
use folio_identity::fields::{GIVEN_NAME, NAME_FIELDS};
use folio_identity::{Identity, User, UserId};
use sqlx::{sqlite::SqlitePool, Row, SqliteConnection};
use uuid::Uuid;

use crate::error::{conflict_on_unique, DbError};
use crate::timestamp;

#[async_trait]
pub trait UserStore: Send + Sync {
	async fn create_user(&self, user: &User) -> Result<UserId, DbError>;
	async fn get_user_by_id(&self, id: &UserId, allow_disabled: bool) -> Result<Option<User>, DbError>;
	async fn get_user_by_username(
		&self,
		username: &str,
		allow_disabled: bool,
	) -> Result<Option<User>, DbError>;
	async fn get_user_by_email(&self, email: &str, allow_disabled: bool) -> Result<Option<User>, DbError>;
	async fn get_user_by_setting(
		&self,
		setting_name: &str,
		setting_value: &str,
		allow_disabled: bool,
	) -> Result<Option<User>, DbError>;
	async fn count_users(&self) -> Result<i64, DbError>;
	async fn update_user(&self, user: &User) -> Result<(), DbError>;
	async fn delete_user(&self, id: &UserId) -> Result<bool, DbError>;
	async fn change_site_primary_locale(
		&self,
		old_locale: &str,
		new_locale: &str,
	) -> Result<LocaleMigration, DbError>;
}

/// What [`UserRepository::change_site_primary_locale`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocaleMigration {
	/// Blank name settings deleted from the new locale.
	pub blank_names_removed: u64,
	/// Users that had no name in the new locale and got at least one name
	/// setting copied from the old locale.
	pub names_copied: u64,
	/// Users that had a partial name and got the old given name copied.
	pub given_names_copied: u64,
}

/// Repository for user database operations.
#[derive(Clone)]
pub struct UserRepository {
	pool: SqlitePool,
}

const USER_COLUMNS: &str = "id, username, email, orcid, country, url, disabled, disabled_reason, date_registered";

impl UserRepository {
	/// Create a new repository with the given connection pool.
	///
	/// # Arguments
	/// * `pool` - SQLite connection pool
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Insert a user and its localized settings.
	///
	/// # Errors
	/// Returns `DbError::Conflict` if the id or username is taken.
	#[tracing::instrument(skip(self, user), fields(user_id = %user.id))]
	pub async fn create_user(&self, user: &User) -> Result<UserId, DbError> {
		let mut tx = self.pool.begin().await?;

		sqlx::query(
			r#"
			INSERT INTO users (
				id, username, email, orcid, country, url,
				disabled, disabled_reason, date_registered
			) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(user.id.to_string())
		.bind(&user.username)
		.bind(&user.identity.email)
		.bind(&user.identity.orcid)
		.bind(&user.identity.country)
		.bind(&user.identity.url)
		.bind(user.disabled)
		.bind(&user.disabled_reason)
		.bind(timestamp::to_db(user.date_registered))
		.execute(&mut *tx)
		.await
		.map_err(|e| conflict_on_unique(e, "user"))?;

		insert_settings(&mut tx, &user.id, &user.identity).await?;
		tx.commit().await?;

		tracing::debug!(user_id = %user.id, "user created");
		Ok(user.id)
	}

	/// Get a user by id.
	///
	/// # Returns
	/// `None` if no user has this id, or the user is disabled and
	/// `allow_disabled` is false.
	#[tracing::instrument(skip(self), fields(user_id = %id))]
	pub async fn get_user_by_id(&self, id: &UserId, allow_disabled: bool) -> Result<Option<User>, DbError> {
		let row = sqlx::query(&format!(
			"SELECT {USER_COLUMNS} FROM users WHERE id = ? AND (? OR disabled = 0)"
		))
		.bind(id.to_string())
		.bind(allow_disabled)
		.fetch_optional(&self.pool)
		.await?;

		self.load(row).await
	}

	#[tracing::instrument(skip(self))]
	pub async fn get_user_by_username(
		&self,
		username: &str,
		allow_disabled: bool,
	) -> Result<Option<User>, DbError> {
		let row = sqlx::query(&format!(
			"SELECT {USER_COLUMNS} FROM users WHERE username = ? AND (? OR disabled = 0)"
		))
		.bind(username)
		.bind(allow_disabled)
		.fetch_optional(&self.pool)
		.await?;

		self.load(row).await
	}

	/// Get a user by email address, ignoring case.
	#[tracing::instrument(skip(self, email))]
	pub async fn get_user_by_email(&self, email: &str, allow_disabled: bool) -> Result<Option<User>, DbError> {
		let row = sqlx::query(&format!(
			"SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER(?) AND (? OR disabled = 0)"
		))
		.bind(email)
		.bind(allow_disabled)
		.fetch_optional(&self.pool)
		.await?;

		let result = self.load(row).await?;
		if let Some(ref user) = result {
			tracing::debug!(user_id = %user.id, "user found by email");
		}
		Ok(result)
	}

	/// Get the first user with a setting equal to `setting_value`.
	///
	/// `orcid`, `url` and `country` match the user columns; any other name
	/// matches a localized setting in any locale.
	#[tracing::instrument(skip(self, setting_value))]
	pub async fn get_user_by_setting(
		&self,
		setting_name: &str,
		setting_value: &str,
		allow_disabled: bool,
	) -> Result<Option<User>, DbError> {
		let sql = match setting_name {
			"orcid" | "url" | "country" => format!(
				"SELECT {USER_COLUMNS} FROM users WHERE {setting_name} = ? AND (? OR disabled = 0) ORDER BY date_registered LIMIT 1"
			),
			_ => format!(
				r#"
				SELECT {USER_COLUMNS} FROM users
				WHERE id IN (
					SELECT user_id FROM user_settings
					WHERE setting_name = ? AND setting_value = ?
				)
				AND (? OR disabled = 0)
				ORDER BY date_registered
				LIMIT 1
				"#
			),
		};

		let mut query = sqlx::query(&sql);
		if !matches!(setting_name, "orcid" | "url" | "country") {
			query = query.bind(setting_name);
		}
		let row = query
			.bind(setting_value)
			.bind(allow_disabled)
			.fetch_optional(&self.pool)
			.await?;

		self.load(row).await
	}

	/// Count all users, disabled included.
	#[tracing::instrument(skip(self))]
	pub async fn count_users(&self) -> Result<i64, DbError> {
		let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
			.fetch_one(&self.pool)
			.await?;
		Ok(count)
	}

	/// Replace a user's row and all of its localized settings.
	///
	/// # Errors
	/// Returns `DbError::NotFound` if the user does not exist.
	#[tracing::instrument(skip(self, user), fields(user_id = %user.id))]
	pub async fn update_user(&self, user: &User) -> Result<(), DbError> {
		let mut tx = self.pool.begin().await?;

		let result = sqlx::query(
			r#"
			UPDATE users SET
				username = ?,
				email = ?,
				orcid = ?,
				country = ?,
				url = ?,
				disabled = ?,
				disabled_reason = ?
			WHERE id = ?
			"#,
		)
		.bind(&user.username)
		.bind(&user.identity.email)
		.bind(&user.identity.orcid)
		.bind(&user.identity.country)
		.bind(&user.identity.url)
		.bind(user.disabled)
		.bind(&user.disabled_reason)
		.bind(user.id.to_string())
		.execute(&mut *tx)
		.await
		.map_err(|e| conflict_on_unique(e, "username"))?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("user {}", user.id)));
		}

		sqlx::query("DELETE FROM user_settings WHERE user_id = ?")
			.bind(user.id.to_string())
			.execute(&mut *tx)
			.await?;
		insert_settings(&mut tx, &user.id, &user.identity).await?;
		tx.commit().await?;

		tracing::debug!(user_id = %user.id, "user updated");
		Ok(())
	}

	/// Delete a user and its settings.
	///
	/// # Returns
	/// `true` if a user was deleted.
	#[tracing::instrument(skip(self), fields(user_id = %id))]
	pub async fn delete_user(&self, id: &UserId) -> Result<bool, DbError> {
		let mut tx = self.pool.begin().await?;
		sqlx::query("DELETE FROM user_settings WHERE user_id = ?")
			.bind(id.to_string())
			.execute(&mut *tx)
			.await?;
		let result = sqlx::query("DELETE FROM users WHERE id = ?")
			.bind(id.to_string())
			.execute(&mut *tx)
			.await?;
		tx.commit().await?;

		let deleted = result.rows_affected() > 0;
		if deleted {
			tracing::debug!(user_id = %id, "user deleted");
		}
		Ok(deleted)
	}

	/// Carry user names over when the site primary locale changes.
	///
	/// 1. Blank `givenName`, `familyName` and `preferredPublicName` settings
	///    in `new_locale` are deleted.
	/// 2. Users with no name at all in `new_locale` get all three copied
	///    from `old_locale`.
	/// 3. Users with some name but no given name in `new_locale` get the
	///    given name copied from `old_locale`.
	///
	/// Runs in a single transaction.
	#[tracing::instrument(skip(self))]
	pub async fn change_site_primary_locale(
		&self,
		old_locale: &str,
		new_locale: &str,
	) -> Result<LocaleMigration, DbError> {
		let mut report = LocaleMigration::default();
		if old_locale == new_locale {
			return Ok(report);
		}

		let mut tx = self.pool.begin().await?;

		for setting_name in NAME_FIELDS {
			let result = sqlx::query(
				r#"
				DELETE FROM user_settings
				WHERE locale = ? AND setting_name = ?
				  AND (setting_value IS NULL OR setting_value = '')
				"#,
			)
			.bind(new_locale)
			.bind(setting_name)
			.execute(&mut *tx)
			.await?;
			report.blank_names_removed += result.rows_affected();
		}

		let rows = sqlx::query(
			r#"
			SELECT DISTINCT us.user_id,
			       usg.setting_value AS given_name,
			       usf.setting_value AS family_name,
			       usp.setting_value AS preferred_public_name
			FROM user_settings us
			LEFT JOIN user_settings usg
			  ON usg.user_id = us.user_id AND usg.locale = ? AND usg.setting_name = ?
			LEFT JOIN user_settings usf
			  ON usf.user_id = us.user_id AND usf.locale = ? AND usf.setting_name = ?
			LEFT JOIN user_settings usp
			  ON usp.user_id = us.user_id AND usp.locale = ? AND usp.setting_name = ?
			"#,
		)
		.bind(new_locale)
		.bind(NAME_FIELDS[0])
		.bind(new_locale)
		.bind(NAME_FIELDS[1])
		.bind(new_locale)
		.bind(NAME_FIELDS[2])
		.fetch_all(&mut *tx)
		.await?;

		for row in rows {
			let user_id: String = row.get("user_id");
			let given: Option<String> = row.get("given_name");
			let family: Option<String> = row.get("family_name");
			let public: Option<String> = row.get("preferred_public_name");

			if is_blank(&given) && is_blank(&family) && is_blank(&public) {
				let mut copied = 0;
				for setting_name in NAME_FIELDS {
					copied +=
						copy_setting(&mut tx, &user_id, setting_name, old_locale, new_locale).await?;
				}
				if copied > 0 {
					report.names_copied += 1;
				}
			} else if is_blank(&given)
				&& copy_setting(&mut tx, &user_id, GIVEN_NAME, old_locale, new_locale).await? > 0
			{
				report.given_names_copied += 1;
			}
		}

		tx.commit().await?;

		tracing::info!(
			old_locale,
			new_locale,
			blank_names_removed = report.blank_names_removed,
			names_copied = report.names_copied,
			given_names_copied = report.given_names_copied,
			"site primary locale changed"
		);
		Ok(report)
	}

	async fn load(&self, row: Option<sqlx::sqlite::SqliteRow>) -> Result<Option<User>, DbError> {
		let Some(row) = row else {
			return Ok(None);
		};
		let mut user = parse_user_row(&row)?;

		let settings = sqlx::query(
			r#"
			SELECT locale, setting_name, setting_value
			FROM user_settings
			WHERE user_id = ?
			ORDER BY id
			"#,
		)
		.bind(user.id.to_string())
		.fetch_all(&self.pool)
		.await?;

		for setting in settings {
			let locale: String = setting.get("locale");
			let name: String = setting.get("setting_name");
			let value: Option<String> = setting.get("setting_value");
			user.identity
				.set_localized(name, locale, value.unwrap_or_default());
		}
		Ok(Some(user))
	}
}

#[async_trait]
impl UserStore for UserRepository {
	async fn create_user(&self, user: &User) -> Result<UserId, DbError> {
		self.create_user(user).await
	}

	async fn get_user_by_id(&self, id: &UserId, allow_disabled: bool) -> Result<Option<User>, DbError> {
		self.get_user_by_id(id, allow_disabled).await
	}

	async fn get_user_by_username(
		&self,
		username: &str,
		allow_disabled: bool,
	) -> Result<Option<User>, DbError> {
		self.get_user_by_username(username, allow_disabled).await
	}

	async fn get_user_by_email(&self, email: &str, allow_disabled: bool) -> Result<Option<User>, DbError> {
		self.get_user_by_email(email, allow_disabled).await
	}

	async fn get_user_by_setting(
		&self,
		setting_name: &str,
		setting_value: &str,
		allow_disabled: bool,
	) -> Result<Option<User>, DbError> {
		self.get_user_by_setting(setting_name, setting_value, allow_disabled)
			.await
	}

	async fn count_users(&self) -> Result<i64, DbError> {
		self.count_users().await
	}

	async fn update_user(&self, user: &User) -> Result<(), DbError> {
		self.update_user(user).await
	}

	async fn delete_user(&self, id: &UserId) -> Result<bool, DbError> {
		self.delete_user(id).await
	}

	async fn change_site_primary_locale(
		&self,
		old_locale: &str,
		new_locale: &str,
	) -> Result<LocaleMigration, DbError> {
		self.change_site_primary_locale(old_locale, new_locale).await
	}
}

fn is_blank(value: &Option<String>) -> bool {
	value.as_deref().map_or(true, str::is_empty)
}

async fn insert_settings(
	conn: &mut SqliteConnection,
	user_id: &UserId,
	identity: &Identity,
) -> Result<(), DbError> {
	for (name, values) in identity.settings() {
		for (locale, value) in values.iter() {
			sqlx::query(
				r#"
				INSERT INTO user_settings (user_id, locale, setting_name, setting_value)
				VALUES (?, ?, ?, ?)
				"#,
			)
			.bind(user_id.to_string())
			.bind(locale)
			.bind(name)
			.bind(value)
			.execute(&mut *conn)
			.await?;
		}
	}
	Ok(())
}

async fn copy_setting(
	conn: &mut SqliteConnection,
	user_id: &str,
	setting_name: &str,
	old_locale: &str,
	new_locale: &str,
) -> Result<u64, DbError> {
	let result = sqlx::query(
		r#"
		INSERT OR IGNORE INTO user_settings (user_id, locale, setting_name, setting_value)
		SELECT user_id, ?, setting_name, setting_value
		FROM user_settings
		WHERE user_id = ? AND locale = ? AND setting_name = ?
		"#,
	)
	.bind(new_locale)
	.bind(user_id)
	.bind(old_locale)
	.bind(setting_name)
	.execute(&mut *conn)
	.await?;
	Ok(result.rows_affected())
}

fn parse_user_row(row: &sqlx::sqlite::SqliteRow) -> Result<User, DbError> {
	let id_str: String = row.get("id");
	let date_registered_str: String = row.get("date_registered");

	let id = Uuid::parse_str(&id_str).map_err(|e| DbError::Internal(format!("Invalid user id UUID: {e}")))?;

	let mut identity = Identity::new();
	identity.email = row.get("email");
	identity.orcid = row.get("orcid");
	identity.country = row.get("country");
	identity.url = row.get("url");

	Ok(User {
		id: UserId::new(id),
		username: row.get("username"),
		disabled: row.get("disabled"),
		disabled_reason: row.get("disabled_reason"),
		date_registered: timestamp::from_db(&date_registered_str, "date_registered")?,
		identity,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::create_test_pool;
	use folio_common_i18n::LocaleContext;
	use folio_identity::{resolve_full_name, NameOptions};
	use proptest::prelude::*;

	async fn make_repo() -> UserRepository {
		UserRepository::new(create_test_pool().await)
	}

	fn jane() -> User {
		let mut user = User::new("jdoe", "Jane.Doe@example.org");
		user.identity.set_given_name("en", "Jane");
		user.identity.set_family_name("en", "Doe");
		user.identity.set_given_name("fr_CA", "Jeanne");
		user.identity.orcid = Some("https://orcid.org/0000-0002-1825-0097".to_string());
		user
	}

	#[tokio::test]
	async fn create_and_get_by_id() {
		let repo = make_repo().await;
		let user = jane();
		let id = repo.create_user(&user).await.unwrap();
		assert_eq!(id, user.id);

		let loaded = repo.get_user_by_id(&id, false).await.unwrap().unwrap();
		assert_eq!(loaded.username, "jdoe");
		assert_eq!(loaded.identity.given_name("fr_CA"), Some("Jeanne"));
		assert_eq!(loaded.identity.family_name("en"), Some("Doe"));
		assert_eq!(loaded.identity.orcid, user.identity.orcid);
	}

	#[tokio::test]
	async fn settings_reload_in_insertion_order() {
		let repo = make_repo().await;
		let mut user = User::new("order", "order@example.org");
		user.identity.set_given_name("fr_CA", "Jeanne");
		user.identity.set_given_name("en", "Jane");
		user.identity.set_given_name("de", "Johanna");
		repo.create_user(&user).await.unwrap();

		let loaded = repo.get_user_by_id(&user.id, true).await.unwrap().unwrap();
		let values = loaded.identity.settings().next().unwrap().1;
		let locales: Vec<_> = values.locales().collect();
		assert_eq!(locales, vec!["fr_CA", "en", "de"]);
	}

	#[tokio::test]
	async fn duplicate_username_conflicts() {
		let repo = make_repo().await;
		repo.create_user(&jane()).await.unwrap();

		let result = repo.create_user(&jane()).await;
		assert!(matches!(result, Err(DbError::Conflict(_))));
	}

	#[tokio::test]
	async fn disabled_users_are_hidden_unless_allowed() {
		let repo = make_repo().await;
		let mut user = jane();
		user.disable(Some("spam".to_string()));
		repo.create_user(&user).await.unwrap();

		assert!(repo.get_user_by_id(&user.id, false).await.unwrap().is_none());
		assert!(repo.get_user_by_username("jdoe", false).await.unwrap().is_none());

		let loaded = repo.get_user_by_id(&user.id, true).await.unwrap().unwrap();
		assert!(loaded.disabled);
		assert_eq!(loaded.disabled_reason.as_deref(), Some("spam"));
	}

	#[tokio::test]
	async fn get_by_email_ignores_case() {
		let repo = make_repo().await;
		let user = jane();
		repo.create_user(&user).await.unwrap();

		let loaded = repo
			.get_user_by_email("jane.doe@EXAMPLE.org", false)
			.await
			.unwrap()
			.unwrap();
		assert_eq!(loaded.id, user.id);
		assert!(repo
			.get_user_by_email("someone@example.org", true)
			.await
			.unwrap()
			.is_none());
	}

	#[tokio::test]
	async fn get_by_setting() {
		let repo = make_repo().await;
		let user = jane();
		repo.create_user(&user).await.unwrap();

		let by_orcid = repo
			.get_user_by_setting("orcid", "https://orcid.org/0000-0002-1825-0097", false)
			.await
			.unwrap()
			.unwrap();
		assert_eq!(by_orcid.id, user.id);

		let by_name = repo
			.get_user_by_setting("givenName", "Jeanne", false)
			.await
			.unwrap()
			.unwrap();
		assert_eq!(by_name.id, user.id);

		assert!(repo
			.get_user_by_setting("givenName", "Nobody", true)
			.await
			.unwrap()
			.is_none());
	}

	#[tokio::test]
	async fn update_replaces_settings() {
		let repo = make_repo().await;
		let mut user = jane();
		repo.create_user(&user).await.unwrap();

		user.identity.remove_localized("givenName", "fr_CA");
		user.identity.set_affiliation("en", "University of Toronto");
		user.identity.country = Some("CA".to_string());
		repo.update_user(&user).await.unwrap();

		let loaded = repo.get_user_by_id(&user.id, false).await.unwrap().unwrap();
		assert_eq!(loaded.identity.given_name("fr_CA"), None);
		assert_eq!(loaded.identity.affiliation("en"), Some("University of Toronto"));
		assert_eq!(loaded.identity.country_localized(), Some("Canada"));
	}

	#[tokio::test]
	async fn update_missing_user_is_not_found() {
		let repo = make_repo().await;
		let result = repo.update_user(&jane()).await;
		assert!(matches!(result, Err(DbError::NotFound(_))));
	}

	#[tokio::test]
	async fn delete_and_count() {
		let repo = make_repo().await;
		let user = jane();
		repo.create_user(&user).await.unwrap();
		repo.create_user(&User::new("other", "other@example.org"))
			.await
			.unwrap();
		assert_eq!(repo.count_users().await.unwrap(), 2);

		assert!(repo.delete_user(&user.id).await.unwrap());
		assert!(!repo.delete_user(&user.id).await.unwrap());
		assert_eq!(repo.count_users().await.unwrap(), 1);

		let (orphans,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_settings WHERE user_id = ?")
			.bind(user.id.to_string())
			.fetch_one(&repo.pool)
			.await
			.unwrap();
		assert_eq!(orphans, 0);
	}

	mod change_site_primary_locale {
		use super::*;

		#[tokio::test]
		async fn copies_all_names_when_new_locale_has_none() {
			let repo = make_repo().await;
			let mut user = User::new("jdoe", "jdoe@example.org");
			user.identity.set_given_name("en", "Jane");
			user.identity.set_family_name("en", "Doe");
			user.identity.set_preferred_public_name("en", "J. Doe");
			repo.create_user(&user).await.unwrap();

			let report = repo.change_site_primary_locale("en", "fr_CA").await.unwrap();
			assert_eq!(report.names_copied, 1);
			assert_eq!(report.given_names_copied, 0);

			let loaded = repo.get_user_by_id(&user.id, false).await.unwrap().unwrap();
			assert_eq!(loaded.identity.given_name("fr_CA"), Some("Jane"));
			assert_eq!(loaded.identity.family_name("fr_CA"), Some("Doe"));
			assert_eq!(loaded.identity.preferred_public_name("fr_CA"), Some("J. Doe"));
		}

		#[tokio::test]
		async fn copies_only_given_name_for_partial_names() {
			let repo = make_repo().await;
			let mut user = User::new("jdoe", "jdoe@example.org");
			user.identity.set_given_name("en", "Jane");
			user.identity.set_family_name("en", "Doe");
			user.identity.set_family_name("fr_CA", "Dupont");
			repo.create_user(&user).await.unwrap();

			let report = repo.change_site_primary_locale("en", "fr_CA").await.unwrap();
			assert_eq!(report.names_copied, 0);
			assert_eq!(report.given_names_copied, 1);

			let loaded = repo.get_user_by_id(&user.id, false).await.unwrap().unwrap();
			assert_eq!(loaded.identity.given_name("fr_CA"), Some("Jane"));
			assert_eq!(loaded.identity.family_name("fr_CA"), Some("Dupont"));
		}

		#[tokio::test]
		async fn blank_names_in_new_locale_are_replaced() {
			let repo = make_repo().await;
			let mut user = User::new("jdoe", "jdoe@example.org");
			user.identity.set_given_name("en", "Jane");
			user.identity.set_family_name("en", "Doe");
			user.identity.set_given_name("fr_CA", "");
			user.identity.set_family_name("fr_CA", "");
			repo.create_user(&user).await.unwrap();

			let report = repo.change_site_primary_locale("en", "fr_CA").await.unwrap();
			assert_eq!(report.blank_names_removed, 2);
			assert_eq!(report.names_copied, 1);

			let loaded = repo.get_user_by_id(&user.id, false).await.unwrap().unwrap();
			assert_eq!(loaded.identity.given_name("fr_CA"), Some("Jane"));
			assert_eq!(loaded.identity.family_name("fr_CA"), Some("Doe"));
		}

		#[tokio::test]
		async fn users_without_old_names_are_not_counted() {
			let repo = make_repo().await;
			let mut nameless = User::new("nameless", "nameless@example.org");
			nameless.identity.set_affiliation("de", "Universität Wien");
			repo.create_user(&nameless).await.unwrap();

			let mut partial = User::new("partial", "partial@example.org");
			partial.identity.set_family_name("fr_CA", "Dupont");
			repo.create_user(&partial).await.unwrap();

			let report = repo.change_site_primary_locale("en", "fr_CA").await.unwrap();
			assert_eq!(report.names_copied, 0);
			assert_eq!(report.given_names_copied, 0);

			let loaded = repo.get_user_by_id(&nameless.id, false).await.unwrap().unwrap();
			assert_eq!(loaded.identity.given_name("fr_CA"), None);
		}

		#[tokio::test]
		async fn complete_names_are_untouched() {
			let repo = make_repo().await;
			let mut user = User::new("jdoe", "jdoe@example.org");
			user.identity.set_given_name("en", "Jane");
			user.identity.set_given_name("fr_CA", "Jeanne");
			user.identity.set_family_name("fr_CA", "Dupont");
			repo.create_user(&user).await.unwrap();

			let report = repo.change_site_primary_locale("en", "fr_CA").await.unwrap();
			assert_eq!(report, LocaleMigration::default());

			let loaded = repo.get_user_by_id(&user.id, false).await.unwrap().unwrap();
			assert_eq!(loaded.identity.given_name("fr_CA"), Some("Jeanne"));
		}

		#[tokio::test]
		async fn display_name_follows_new_primary_locale() {
			let repo = make_repo().await;
			let mut user = User::new("jdoe", "jdoe@example.org");
			user.identity.set_given_name("en", "Jane");
			user.identity.set_family_name("en", "Doe");
			repo.create_user(&user).await.unwrap();

			repo.change_site_primary_locale("en", "de").await.unwrap();

			let loaded = repo.get_user_by_id(&user.id, false).await.unwrap().unwrap();
			let ctx = LocaleContext::new("de", "de");
			let options = NameOptions::default().family_name_first(true);
			assert_eq!(resolve_full_name(&loaded, &ctx, &options), "Doe, Jane");
			assert_eq!(loaded.identity.given_name("de"), Some("Jane"));
		}

		#[tokio::test]
		async fn same_locale_is_a_no_op() {
			let repo = make_repo().await;
			repo.create_user(&jane()).await.unwrap();
			let report = repo.change_site_primary_locale("en", "en").await.unwrap();
			assert_eq!(report, LocaleMigration::default());
		}
	}

	proptest! {
		#![proptest_config(ProptestConfig::with_cases(16))]

		#[test]
		fn migration_never_leaves_user_without_given_name(
			has_new_given in any::<bool>(),
			has_new_family in any::<bool>(),
			blank_new_given in any::<bool>(),
		) {
			let rt = tokio::runtime::Builder::new_current_thread()
				.enable_all()
				.build()
				.unwrap();
			rt.block_on(async {
				let repo = make_repo().await;
				let mut user = User::new("jdoe", "jdoe@example.org");
				user.identity.set_given_name("en", "Jane");
				user.identity.set_family_name("en", "Doe");
				if has_new_given {
					user.identity.set_given_name("fr", if blank_new_given { "" } else { "Jeanne" });
				}
				if has_new_family {
					user.identity.set_family_name("fr", "Dupont");
				}
				repo.create_user(&user).await.unwrap();

				repo.change_site_primary_locale("en", "fr").await.unwrap();

				let loaded = repo.get_user_by_id(&user.id, false).await.unwrap().unwrap();
				let expected = if has_new_given && !blank_new_given { "Jeanne" } else { "Jane" };
				assert_eq!(loaded.identity.given_name("fr"), Some(expected));
			});
		}
	}
}
