//! Supabase (PostgREST) waitlist backend.
//!
//! Inserts go to `POST {SUPABASE_URL}/rest/v1/waitlist` authenticated with the
//! service-role key. PostgREST reports constraint violations as a JSON body
//! carrying the Postgres SQLSTATE in `code`; `23505` is `unique_violation`.

use lev_core::waitlist::InsertError;
use lev_core::Email;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

const UNIQUE_VIOLATION: &str = "23505";

pub struct SupabaseWaitlist {
    client: reqwest::Client,
    endpoint: Url,
    service_role_key: String,
}

#[derive(Debug, Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
}

impl SupabaseWaitlist {
    pub fn new(base_url: &str, service_role_key: impl Into<String>) -> anyhow::Result<Self> {
        let mut base = Url::parse(base_url.trim())
            .map_err(|e| anyhow::anyhow!("invalid SUPABASE_URL '{base_url}': {e}"))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join("rest/v1/waitlist")?;
        // No session persistence: every request carries the key explicitly.
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            endpoint,
            service_role_key: service_role_key.into(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn insert(&self, email: &Email) -> Result<(), InsertError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .header("Prefer", "return=minimal")
            .json(&serde_json::json!([{ "email": email.as_str() }]))
            .send()
            .await
            .map_err(|e| InsertError::Storage(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(classify_response(status, &body))
    }
}

/// Map a non-success PostgREST response onto an [`InsertError`].
pub fn classify_response(status: StatusCode, body: &str) -> InsertError {
    match serde_json::from_str::<PostgrestError>(body) {
        Ok(err) if err.code.as_deref() == Some(UNIQUE_VIOLATION) => InsertError::Duplicate,
        Ok(PostgrestError {
            message: Some(message),
            ..
        }) => InsertError::Storage(message),
        _ if body.trim().is_empty() => {
            InsertError::Storage(format!("waitlist insert failed with status {status}"))
        }
        _ => InsertError::Storage(body.trim().to_string()),
    }
}
