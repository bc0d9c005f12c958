//! OAuth authorization-code flow for a single Google account.
//!
//! Prints the consent URL (and tries to open a browser), waits for the
//! provider to redirect to a local callback listener, then exchanges the
//! authorization code for a bearer token. The listener accepts exactly
//! one connection and hands the result back through a oneshot channel;
//! the wait is bounded so an abandoned authorization cannot hang the run
//! forever.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::time::timeout;
use url::Url;

use crate::app_config::GoogleCredentials;

pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/calendar.readonly",
    "https://www.googleapis.com/auth/calendar.events",
];

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const CALLBACK_TIMEOUT: Duration = Duration::from_secs(300);

/// A bearer token for one authorized account, held in memory for the
/// duration of the run.
pub struct AccountSession {
    pub access_token: String,
}

pub async fn authorize(
    creds: &GoogleCredentials,
    http: &reqwest::Client,
    port: u16,
) -> Result<AccountSession> {
    let redirect_uri = format!("http://localhost:{port}/");
    let state = uuid::Uuid::new_v4().to_string();
    let auth_url = consent_url(creds, &redirect_uri, &state)?;

    println!("{auth_url}");
    if open::that(&auth_url).is_err() {
        eprintln!("(Could not open browser automatically, please copy the URL above)");
    }

    let listener = TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("Failed to bind OAuth callback listener on port {port}"))?;

    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let _ = tx.send(wait_for_callback(listener).await);
    });

    let callback = timeout(CALLBACK_TIMEOUT, rx)
        .await
        .context("Timed out waiting for the OAuth callback")?
        .context("OAuth callback listener stopped unexpectedly")?;
    let (code, returned_state) = callback?;

    if returned_state != state {
        anyhow::bail!("State mismatch in OAuth callback");
    }

    let tokens = exchange_code(creds, http, &code, &redirect_uri).await?;

    Ok(AccountSession {
        access_token: tokens.access_token,
    })
}

fn consent_url(creds: &GoogleCredentials, redirect_uri: &str, state: &str) -> Result<String> {
    let mut url = Url::parse(AUTH_URL)?;
    url.query_pairs_mut()
        .append_pair("client_id", &creds.client_id)
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("response_type", "code")
        .append_pair("access_type", "offline")
        .append_pair("prompt", "consent")
        .append_pair("scope", &SCOPES.join(" "))
        .append_pair("state", state);
    Ok(url.to_string())
}

/// Accept one connection on the listener, parse the redirect request and
/// confirm to the browser.
async fn wait_for_callback(listener: TcpListener) -> Result<(String, String)> {
    let (stream, _) = listener
        .accept()
        .await
        .context("Failed to accept OAuth callback")?;

    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader
        .read_line(&mut request_line)
        .await
        .context("Failed to read OAuth callback request line")?;

    let parsed = parse_callback(&request_line);

    let response = "HTTP/1.1 200 OK\r\n\
        Content-Type: text/html\r\n\
        Connection: close\r\n\
        \r\n\
        <html><body>\
        <p>You can now close this tab.</p>\
        </body></html>";

    let mut stream = reader.into_inner();
    stream
        .write_all(response.as_bytes())
        .await
        .context("Failed to write OAuth callback response")?;
    stream.flush().await?;

    parsed
}

fn parse_callback(request_line: &str) -> Result<(String, String)> {
    let url_part = request_line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("Invalid HTTP request on OAuth callback"))?;

    let url = Url::parse(&format!("http://localhost{url_part}"))?;

    let code = url
        .query_pairs()
        .find(|(k, _)| k == "code")
        .map(|(_, v)| v.to_string())
        .ok_or_else(|| anyhow::anyhow!("No code in callback"))?;

    let state = url
        .query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.to_string())
        .ok_or_else(|| anyhow::anyhow!("No state in callback"))?;

    Ok((code, state))
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

async fn exchange_code(
    creds: &GoogleCredentials,
    http: &reqwest::Client,
    code: &str,
    redirect_uri: &str,
) -> Result<TokenResponse> {
    let response = http
        .post(TOKEN_URL)
        .form(&[
            ("client_id", creds.client_id.as_str()),
            ("client_secret", creds.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", redirect_uri),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await
        .context("Failed to send token exchange request")?;

    if !response.status().is_success() {
        let error_text = response.text().await.unwrap_or_default();
        anyhow::bail!("Failed to exchange authorization code for tokens: {error_text}");
    }

    response
        .json()
        .await
        .context("Failed to parse token response")
}
