//! OAuth code exchange and token refresh against Google's token
//! endpoint

use serde::{Deserialize, Serialize};

use crate::core::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OauthToken {
    pub access_token: String,
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub token_type: String,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Exchange an authorization code for an access and refresh token
pub async fn exchange_code_for_token(
    oauth_hostname: &str,
    client_id: &str,
    client_secret: &str,
    code: &str,
    redirect_uri: &str,
) -> Result<OauthToken, Error> {
    let url = format!("{}/token", oauth_hostname.trim_end_matches('/'));
    let params = [
        ("client_id", client_id),
        ("client_secret", client_secret),
        ("code", code),
        ("grant_type", "authorization_code"),
        ("redirect_uri", redirect_uri),
    ];
    let res = reqwest::Client::new().post(&url).form(&params).send().await?;
    let status = res.status();
    let text = res.text().await.unwrap_or_default();
    if !status.is_success() {
        return Err(Error::Auth(format!(
            "Code exchange failed: {} ({})",
            status, text
        )));
    }
    let token = serde_json::from_str(&text)
        .map_err(|e| Error::Auth(format!("Unexpected token response: {}", e)))?;
    Ok(token)
}

/// Trade a stored refresh token for a fresh access token
pub async fn refresh_access_token(
    oauth_hostname: &str,
    client_id: &str,
    client_secret: &str,
    refresh_token: &str,
) -> Result<OauthToken, Error> {
    let url = format!("{}/token", oauth_hostname.trim_end_matches('/'));
    let params = [
        ("client_id", client_id),
        ("client_secret", client_secret),
        ("refresh_token", refresh_token),
        ("grant_type", "refresh_token"),
    ];
    let res = reqwest::Client::new().post(&url).form(&params).send().await?;
    let status = res.status();
    let text = res.text().await.unwrap_or_default();
    if !status.is_success() {
        return Err(Error::Auth(format!(
            "Token refresh failed: {} ({})",
            status, text
        )));
    }
    let token = serde_json::from_str(&text)
        .map_err(|e| Error::Auth(format!("Unexpected token response: {}", e)))?;
    Ok(token)
}
