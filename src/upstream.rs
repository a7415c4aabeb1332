use crate::models::{MemberRecord, PhoneContact, ReminderOutcome, ReminderRecord};
use reqwest::StatusCode;

/// HTTP client for the club backend API. One method per endpoint, no retries,
/// no cancellation; callers decide what the user sees.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug)]
pub enum UpstreamError {
    Transport(reqwest::Error),
    Status(StatusCode),
    Decode(reqwest::Error),
}

impl std::fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpstreamError::Transport(err) => write!(f, "transport error: {err}"),
            UpstreamError::Status(status) => write!(f, "unexpected status: {status}"),
            UpstreamError::Decode(err) => write!(f, "malformed response body: {err}"),
        }
    }
}

impl std::error::Error for UpstreamError {}

impl UpstreamClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn search_members(&self, query: &str) -> Result<Vec<MemberRecord>, UpstreamError> {
        self.get_json(&format!("/api/search_members?q={}", urlencode(query)))
            .await
    }

    pub async fn members_needing_reminders(&self) -> Result<Vec<ReminderRecord>, UpstreamError> {
        self.get_json("/api/members_needing_reminders").await
    }

    pub async fn members_with_phones(&self) -> Result<Vec<PhoneContact>, UpstreamError> {
        self.get_json("/api/members_with_phones").await
    }

    pub async fn send_reminder(&self, member_id: i64) -> Result<ReminderOutcome, UpstreamError> {
        self.get_json(&format!("/send_reminder/{member_id}")).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(UpstreamError::Transport)?;
        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status()));
        }
        response.json().await.map_err(UpstreamError::Decode)
    }
}

/// Percent-encode a query value. Enough for the single search parameter this
/// client sends.
fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push_str("%20"),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
