use std::time::Duration;

/// Result of one outbound request, used only to build the reply
#[derive(Debug, Clone, PartialEq)]
pub enum RelayOutcome {
    Success {
        status_code: u16,
        status_text: String,
        elapsed: Duration,
    },
    Failure {
        message: String,
        status_code: Option<u16>,
        response_body: Option<String>,
    },
}

impl RelayOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RelayOutcome::Success { .. })
    }
}

/// Per-invocation handling states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    Received,
    Acknowledged,
    ParametersExtracted,
    RequestSent,
    RepliedSuccess,
    RepliedFailure,
}

impl RelayState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RelayState::RepliedSuccess | RelayState::RepliedFailure)
    }
}

/// Rich embed content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyBody {
    Embed(Embed),
    Text(String),
}

/// Final content sent back for an invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub body: ReplyBody,
    pub ephemeral: bool,
}

impl Reply {
    pub fn embed(embed: Embed) -> Self {
        Self {
            body: ReplyBody::Embed(embed),
            ephemeral: false,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            body: ReplyBody::Text(text.into()),
            ephemeral: false,
        }
    }

    pub fn ephemeral(mut self) -> Self {
        self.ephemeral = true;
        self
    }

    /// All visible text of the reply, for logging and assertions
    pub fn plain_text(&self) -> String {
        match &self.body {
            ReplyBody::Embed(e) => format!("{}\n{}", e.title, e.description),
            ReplyBody::Text(t) => t.clone(),
        }
    }
}
