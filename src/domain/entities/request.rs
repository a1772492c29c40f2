use std::fmt;

use serde_json::Value;

use super::RelayParameters;

/// Static HTTP Basic credentials for the backend
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Replace credential values that stand alone in `text` with `***`.
    ///
    /// A value only counts when it is not glued to letters or digits, so a
    /// one-letter username leaves ordinary words intact.
    pub fn scrub(&self, text: &str) -> String {
        let mut out = text.to_string();
        for secret in [&self.password, &self.username] {
            if !secret.is_empty() {
                out = mask_token(&out, secret);
            }
        }
        out
    }
}

fn mask_token(text: &str, secret: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for (start, _) in text.match_indices(secret) {
        let end = start + secret.len();
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        if is_boundary(before) && is_boundary(after) {
            out.push_str(&text[last..start]);
            out.push_str("***");
            last = end;
        }
    }

    out.push_str(&text[last..]);
    out
}

fn is_boundary(c: Option<char>) -> bool {
    c.map_or(true, |c| !c.is_alphanumeric())
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &"***")
            .field("password", &"***")
            .finish()
    }
}

/// Body of the outbound POST
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Research(RelayParameters),
    Empty,
}

impl RequestBody {
    pub fn to_json(&self) -> Value {
        match self {
            RequestBody::Research(params) => serde_json::json!({
                "trend_topic": params.trend_topic,
                "count": params.count,
                "lang": params.lang,
            }),
            RequestBody::Empty => serde_json::json!({}),
        }
    }
}

/// One POST to the configured target, built fresh per invocation
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub target_url: String,
    pub body: RequestBody,
    pub credentials: Credentials,
}

impl OutboundRequest {
    pub fn new(target_url: impl Into<String>, body: RequestBody, credentials: Credentials) -> Self {
        Self {
            target_url: target_url.into(),
            body,
            credentials,
        }
    }
}
