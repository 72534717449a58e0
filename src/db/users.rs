// SPDX-License-Identifier: MIT

//! User account operations.

use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;

use super::model::{NewUserRow, UserRow};
use super::schema::users;
use super::{db_err, last_insert_rowid, Database};
use crate::error::AppError;
use crate::models::{Role, User};

pub(crate) fn user_from_row(row: UserRow) -> Result<User, AppError> {
    let role: Role = row
        .role
        .parse()
        .map_err(|e: String| AppError::Database(e))?;
    Ok(User {
        id: row.id,
        name: row.name,
        email: row.email,
        role,
        bank_info: row.bank_info,
        password_hash: row.password_hash,
    })
}

impl Database {
    /// Get a user by id.
    pub async fn get_user(&self, user_id: i64) -> Result<Option<User>, AppError> {
        self.run(move |conn| {
            let row: Option<UserRow> = users::table
                .find(user_id)
                .first(conn)
                .optional()
                .map_err(db_err)?;
            row.map(user_from_row).transpose()
        })
        .await
    }

    /// Get a user by email (normalized lowercase).
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let email = email.to_lowercase();
        self.run(move |conn| {
            let row: Option<UserRow> = users::table
                .filter(users::email.eq(&email))
                .first(conn)
                .optional()
                .map_err(db_err)?;
            row.map(user_from_row).transpose()
        })
        .await
    }

    /// All users, employees before admins, then by name (listing order
    /// of the admin user screen).
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.run(|conn| {
            let rows: Vec<UserRow> = users::table
                .order((users::role.desc(), users::name.asc()))
                .load(conn)
                .map_err(db_err)?;
            rows.into_iter().map(user_from_row).collect()
        })
        .await
    }

    /// Create a user. Fails with `Conflict` when the email is taken.
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        role: Role,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let new_row = NewUserRow {
            name: name.to_string(),
            email: email.to_lowercase(),
            role: role.as_str().to_string(),
            password_hash: password_hash.to_string(),
            bank_info: String::new(),
        };
        self.run(move |conn| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(conn)
                .map_err(|e| match e {
                    diesel::result::Error::DatabaseError(
                        DatabaseErrorKind::UniqueViolation,
                        _,
                    ) => AppError::Conflict("email already registered".to_string()),
                    other => db_err(other),
                })?;

            let id: i64 = diesel::select(last_insert_rowid())
                .get_result(conn)
                .map_err(db_err)?;
            let row: UserRow = users::table.find(id).first(conn).map_err(db_err)?;
            user_from_row(row)
        })
        .await
    }

    /// Update name, bank details and optionally the password hash.
    pub async fn update_profile(
        &self,
        user_id: i64,
        name: &str,
        bank_info: &str,
        password_hash: Option<&str>,
    ) -> Result<(), AppError> {
        let name = name.to_string();
        let bank_info = bank_info.to_string();
        let password_hash = password_hash.map(str::to_string);
        self.run(move |conn| {
            let target = users::table.find(user_id);
            let updated = match password_hash {
                Some(hash) => diesel::update(target)
                    .set((
                        users::name.eq(&name),
                        users::bank_info.eq(&bank_info),
                        users::password_hash.eq(&hash),
                    ))
                    .execute(conn)
                    .map_err(db_err)?,
                None => diesel::update(target)
                    .set((users::name.eq(&name), users::bank_info.eq(&bank_info)))
                    .execute(conn)
                    .map_err(db_err)?,
            };
            if updated == 0 {
                return Err(AppError::NotFound(format!("User {user_id} not found")));
            }
            Ok(())
        })
        .await
    }

    /// Set a user's password hash.
    pub async fn set_password(&self, user_id: i64, password_hash: &str) -> Result<(), AppError> {
        let hash = password_hash.to_string();
        self.run(move |conn| {
            let updated = diesel::update(users::table.find(user_id))
                .set(users::password_hash.eq(&hash))
                .execute(conn)
                .map_err(db_err)?;
            if updated == 0 {
                return Err(AppError::NotFound(format!("User {user_id} not found")));
            }
            Ok(())
        })
        .await
    }

    /// Delete a user account. Users that still own trips, expenses or
    /// deposits are protected by foreign keys.
    pub async fn delete_user(&self, user_id: i64) -> Result<bool, AppError> {
        self.run(move |conn| {
            diesel::delete(users::table.find(user_id))
                .execute(conn)
                .map(|n| n > 0)
                .map_err(|e| match e {
                    diesel::result::Error::DatabaseError(
                        DatabaseErrorKind::ForeignKeyViolation,
                        _,
                    ) => AppError::Conflict(
                        "user still has trips, expenses or deposits".to_string(),
                    ),
                    other => db_err(other),
                })
        })
        .await
    }

    /// Number of admin accounts (for the last-admin deletion guard).
    pub async fn count_admins(&self) -> Result<i64, AppError> {
        self.run(|conn| {
            users::table
                .filter(users::role.eq("admin"))
                .count()
                .get_result(conn)
                .map_err(db_err)
        })
        .await
    }
}
