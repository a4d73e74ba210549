use log::*;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::{
    db_types::{NewUserAccount, ProfileUpdate, UserAccount},
    traits::AuthApiError,
};

fn map_unique_violation(e: sqlx::Error) -> AuthApiError {
    match e {
        sqlx::Error::Database(de) if de.is_unique_violation() => AuthApiError::AccountAlreadyExists,
        e => AuthApiError::from(e),
    }
}

pub async fn insert_account(account: NewUserAccount, conn: &mut SqliteConnection) -> Result<UserAccount, AuthApiError> {
    let account: UserAccount = sqlx::query_as(
        r#"
            INSERT INTO users (name, email, password_hash, phone, address, answer_hash, role)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *;
        "#,
    )
    .bind(account.name)
    .bind(account.email)
    .bind(account.password_hash)
    .bind(account.phone)
    .bind(account.address)
    .bind(account.answer_hash)
    .bind(account.role)
    .fetch_one(conn)
    .await
    .map_err(map_unique_violation)?;
    debug!("🗃️ Account #{} created for {}", account.id, account.email);
    Ok(account)
}

pub async fn fetch_account_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<UserAccount>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE id = $1").bind(id).fetch_optional(conn).await
}

pub async fn fetch_account_by_email(
    email: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<UserAccount>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE email = $1").bind(email).fetch_optional(conn).await
}

/// Fetches every account, most recently created first.
pub async fn fetch_all_accounts(conn: &mut SqliteConnection) -> Result<Vec<UserAccount>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users ORDER BY created_at DESC, id DESC").fetch_all(conn).await
}

pub async fn update_password(
    id: i64,
    password_hash: &str,
    conn: &mut SqliteConnection,
) -> Result<(), AuthApiError> {
    let result = sqlx::query("UPDATE users SET password_hash = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2")
        .bind(password_hash)
        .bind(id)
        .execute(conn)
        .await?;
    match result.rows_affected() {
        0 => Err(AuthApiError::AccountNotFound),
        _ => Ok(()),
    }
}

/// Updates only the fields that are present in `update`. Returns `None` if the account does not exist.
pub async fn update_profile(
    id: i64,
    update: ProfileUpdate,
    conn: &mut SqliteConnection,
) -> Result<Option<UserAccount>, AuthApiError> {
    let mut builder = QueryBuilder::<Sqlite>::new("UPDATE users SET updated_at = CURRENT_TIMESTAMP");
    if let Some(name) = update.name {
        builder.push(", name = ").push_bind(name);
    }
    if let Some(email) = update.email {
        builder.push(", email = ").push_bind(email);
    }
    if let Some(phone) = update.phone {
        builder.push(", phone = ").push_bind(phone);
    }
    if let Some(address) = update.address {
        builder.push(", address = ").push_bind(address);
    }
    if let Some(hash) = update.password_hash {
        builder.push(", password_hash = ").push_bind(hash);
    }
    builder.push(" WHERE id = ").push_bind(id).push(" RETURNING *");
    trace!("🗃️ Executing query: {}", builder.sql());
    let account = builder.build_query_as::<UserAccount>().fetch_optional(conn).await.map_err(map_unique_violation)?;
    Ok(account)
}
