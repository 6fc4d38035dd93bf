pub mod gcal;
pub mod oauth;

use tokio_rusqlite::Connection;

use crate::core::{AppConfig, Error};

/// Look up the stored refresh token for an account and trade it for a
/// short-lived access token
pub async fn access_token_for(
    db: &Connection,
    config: &AppConfig,
    email: &str,
) -> Result<String, Error> {
    let account = email.to_string();
    let refresh_token: String = db
        .call(move |conn| {
            let result = conn
                .prepare("SELECT refresh_token FROM auth WHERE id = ?1")
                .and_then(|mut stmt| stmt.query_row([&account], |row| row.get(0)))?;
            Ok(result)
        })
        .await
        .map_err(|_| {
            Error::Auth(format!(
                "No stored credential for {}. Run `chronosage auth` first.",
                email
            ))
        })?;

    let token = oauth::refresh_access_token(
        &config.google_oauth_hostname,
        &config.google_client_id,
        &config.google_client_secret,
        &refresh_token,
    )
    .await?;
    Ok(token.access_token)
}

/// The first authorized account in the credential store. Used by the
/// CLI where no account is given explicitly.
pub async fn default_account(db: &Connection) -> Result<String, Error> {
    db.call(|conn| {
        let result = conn
            .prepare("SELECT id FROM auth WHERE service = 'google' ORDER BY id LIMIT 1")
            .and_then(|mut stmt| stmt.query_row([], |row| row.get(0)))?;
        Ok(result)
    })
    .await
    .map_err(|_| Error::Auth("No authorized account found. Run `chronosage auth` first.".to_string()))
}
