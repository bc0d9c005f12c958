//! OAuth client credentials loading.
//!
//! The credentials file is the JSON downloaded from the Google console,
//! either the bare client fields or wrapped under "installed"/"web".

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleCredentials {
    pub client_id: String,
    pub client_secret: String,
}

pub fn load(path: &Path) -> Result<GoogleCredentials> {
    if !path.exists() {
        anyhow::bail!(
            "Credentials not found.\n\n\
            Create {} with:\n\n\
            {{\n  \
              \"client_id\": \"your-client-id.apps.googleusercontent.com\",\n  \
              \"client_secret\": \"your-client-secret\"\n\
            }}\n\n\
            See https://console.cloud.google.com/apis/credentials for setup.",
            path.display()
        );
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read credentials from {}", path.display()))?;

    parse(&contents).with_context(|| format!("Failed to parse credentials from {}", path.display()))
}

fn parse(contents: &str) -> Result<GoogleCredentials> {
    #[derive(Deserialize)]
    struct Wrapped {
        #[serde(default)]
        installed: Option<GoogleCredentials>,
        #[serde(default)]
        web: Option<GoogleCredentials>,
    }

    // Bare form first, then the console's wrapped form.
    if let Ok(creds) = serde_json::from_str::<GoogleCredentials>(contents) {
        return Ok(creds);
    }

    let wrapped: Wrapped = serde_json::from_str(contents)?;
    wrapped
        .installed
        .or(wrapped.web)
        .ok_or_else(|| anyhow::anyhow!("No client_id/client_secret found in credentials file"))
}
