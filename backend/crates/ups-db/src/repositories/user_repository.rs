//! User repository backed by SQLite.
//!
//! A user spans three tables: `users`, an optional `addresses` row keyed by
//! the user id, and one `user_roles` row per role tag. Writes touch all three
//! inside one transaction.

use crate::{DbError, Result as DbErrorResult, UserStore};

use ups_core::{Address, UsState, UserRecord, roles_from_tags, roles_to_tags};

use std::panic::Location;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::DateTime;
use error_location::ErrorLocation;
use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};

const SELECT_USER: &str = r#"
    SELECT u.id, u.first_name, u.last_name, u.email, u.password, u.profile_picture,
        u.mfa_enabled, u.account_locked, u.enabled, u.phone_number, u.created_at,
        a.user_id AS address_user_id, a.street_name, a.city_name, a.zipcode, a.state,
        a.country
    FROM users u
    LEFT JOIN addresses a ON a.user_id = u.id
"#;

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    first_name: Option<String>,
    last_name: Option<String>,
    email: String,
    password: String,
    profile_picture: Option<String>,
    mfa_enabled: bool,
    account_locked: bool,
    enabled: bool,
    phone_number: Option<String>,
    created_at: i64,
    address_user_id: Option<i64>,
    street_name: Option<String>,
    city_name: Option<String>,
    zipcode: Option<i32>,
    state: Option<String>,
    country: Option<String>,
}

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new user and return it with its assigned id.
    ///
    /// Fails with `EmailAlreadyExists` when the email is taken.
    pub async fn create(&self, user: &UserRecord) -> DbErrorResult<UserRecord> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
                INSERT INTO users (
                    first_name, last_name, email, password, profile_picture,
                    mfa_enabled, account_locked, enabled, phone_number, created_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.profile_picture)
        .bind(user.mfa_enabled)
        .bind(user.account_locked)
        .bind(user.enabled)
        .bind(&user.phone_number)
        .bind(user.created_at.timestamp())
        .execute(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                DbError::EmailAlreadyExists {
                    email: user.email.clone(),
                    location: ErrorLocation::from(Location::caller()),
                }
            }
            other => DbError::from(other),
        })?;

        let mut created = user.clone();
        created.id = result.last_insert_rowid();

        Self::write_address(&mut tx, created.id, created.address.as_ref()).await?;
        Self::write_roles(&mut tx, &created).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn fetch_one(&self, lookup: Lookup<'_>) -> DbErrorResult<Option<UserRecord>> {
        let sql = format!("{SELECT_USER} WHERE {}", lookup.clause());
        let query = sqlx::query_as::<_, UserRow>(&sql);
        let query = match lookup {
            Lookup::Id(id) => query.bind(id),
            Lookup::Email(email) => query.bind(email),
        };

        let Some(row) = query.fetch_optional(&self.pool).await? else {
            return Ok(None);
        };

        let tags: Vec<String> =
            sqlx::query_scalar("SELECT role FROM user_roles WHERE user_id = ? ORDER BY role")
                .bind(row.id)
                .fetch_all(&self.pool)
                .await?;

        Self::into_record(row, tags).map(Some)
    }

    fn into_record(row: UserRow, tags: Vec<String>) -> DbErrorResult<UserRecord> {
        let address = match row.address_user_id {
            Some(_) => Some(Address {
                street_name: row.street_name,
                city_name: row.city_name,
                zipcode: row.zipcode,
                state: row
                    .state
                    .as_deref()
                    .map(UsState::from_str)
                    .transpose()
                    .map_err(|e| DbError::Initialization {
                        message: format!("Invalid state in addresses.state: {}", e),
                        location: ErrorLocation::from(Location::caller()),
                    })?,
                country: row.country,
            }),
            None => None,
        };

        let roles = roles_from_tags(&tags).map_err(|e| DbError::Initialization {
            message: format!("Invalid role in user_roles.role: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(UserRecord {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            password: row.password,
            profile_picture: row.profile_picture,
            mfa_enabled: row.mfa_enabled,
            account_locked: row.account_locked,
            enabled: row.enabled,
            phone_number: row.phone_number,
            created_at: DateTime::from_timestamp(row.created_at, 0).ok_or_else(|| {
                DbError::Initialization {
                    message: "Invalid timestamp in users.created_at".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?,
            address,
            roles,
        })
    }

    /// Mirror the record's address into its row: present (even with every
    /// part unset) upserts, absent deletes.
    async fn write_address(
        tx: &mut Transaction<'_, Sqlite>,
        user_id: i64,
        address: Option<&Address>,
    ) -> DbErrorResult<()> {
        match address {
            Some(address) => {
                sqlx::query(
                    r#"
                        INSERT INTO addresses (user_id, street_name, city_name, zipcode, state, country)
                        VALUES (?, ?, ?, ?, ?, ?)
                        ON CONFLICT(user_id) DO UPDATE SET
                            street_name = excluded.street_name,
                            city_name = excluded.city_name,
                            zipcode = excluded.zipcode,
                            state = excluded.state,
                            country = excluded.country
                    "#,
                )
                .bind(user_id)
                .bind(&address.street_name)
                .bind(&address.city_name)
                .bind(address.zipcode)
                .bind(address.state.map(|s| s.as_str()))
                .bind(&address.country)
                .execute(&mut **tx)
                .await?;
            }
            None => {
                sqlx::query("DELETE FROM addresses WHERE user_id = ?")
                    .bind(user_id)
                    .execute(&mut **tx)
                    .await?;
            }
        }

        Ok(())
    }

    async fn write_roles(
        tx: &mut Transaction<'_, Sqlite>,
        user: &UserRecord,
    ) -> DbErrorResult<()> {
        sqlx::query("DELETE FROM user_roles WHERE user_id = ?")
            .bind(user.id)
            .execute(&mut **tx)
            .await?;

        for tag in roles_to_tags(&user.roles) {
            sqlx::query("INSERT INTO user_roles (user_id, role) VALUES (?, ?)")
                .bind(user.id)
                .bind(tag)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }
}

enum Lookup<'a> {
    Id(i64),
    Email(&'a str),
}

impl Lookup<'_> {
    fn clause(&self) -> &'static str {
        match self {
            Self::Id(_) => "u.id = ?",
            Self::Email(_) => "u.email = ?",
        }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: i64) -> DbErrorResult<Option<UserRecord>> {
        self.fetch_one(Lookup::Id(id)).await
    }

    async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<UserRecord>> {
        self.fetch_one(Lookup::Email(email)).await
    }

    async fn save(&self, user: &UserRecord) -> DbErrorResult<UserRecord> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
                UPDATE users SET
                    first_name = ?, last_name = ?, email = ?, password = ?,
                    profile_picture = ?, mfa_enabled = ?, account_locked = ?, enabled = ?,
                    phone_number = ?
                WHERE id = ?
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.profile_picture)
        .bind(user.mfa_enabled)
        .bind(user.account_locked)
        .bind(user.enabled)
        .bind(&user.phone_number)
        .bind(user.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                DbError::EmailAlreadyExists {
                    email: user.email.clone(),
                    location: ErrorLocation::from(Location::caller()),
                }
            }
            other => DbError::from(other),
        })?;

        if result.rows_affected() == 0 {
            return Err(DbError::UserNotFound {
                id: user.id,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Self::write_address(&mut tx, user.id, user.address.as_ref()).await?;
        Self::write_roles(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user.clone())
    }

    async fn set_profile_picture(&self, id: i64, url: &str) -> DbErrorResult<()> {
        let result = sqlx::query("UPDATE users SET profile_picture = ? WHERE id = ?")
            .bind(url)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::UserNotFound {
                id,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
