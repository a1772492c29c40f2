use serde::Serialize;

use super::CommandInvocation;
use crate::application::errors::RelayError;

pub const TOPIC_OPTION: &str = "trend_topic";
pub const COUNT_OPTION: &str = "count";
pub const LANG_OPTION: &str = "lang";

pub const DEFAULT_COUNT: i64 = 1;
pub const DEFAULT_LANG: &str = "english";

/// Parameters forwarded to the backend for one invocation.
///
/// Defaults are applied by falsiness, not presence: a `count` of `0` or an
/// empty `lang` are treated the same as an omitted option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayParameters {
    pub trend_topic: String,
    pub count: i64,
    pub lang: String,
}

impl RelayParameters {
    pub fn new(trend_topic: impl Into<String>, count: Option<i64>, lang: Option<&str>) -> Result<Self, RelayError> {
        let trend_topic = trend_topic.into();
        if trend_topic.is_empty() {
            return Err(RelayError::MissingParameter(TOPIC_OPTION.to_string()));
        }

        // 0 means "use the default"; there is no way to request count:0
        let count = match count {
            None | Some(0) => DEFAULT_COUNT,
            Some(n) => n,
        };

        let lang = match lang {
            None | Some("") => DEFAULT_LANG.to_string(),
            Some(l) => l.to_string(),
        };

        Ok(Self { trend_topic, count, lang })
    }

    pub fn from_invocation(invocation: &CommandInvocation) -> Result<Self, RelayError> {
        let topic = invocation
            .option(TOPIC_OPTION)
            .and_then(|v| v.as_str())
            .ok_or_else(|| RelayError::MissingParameter(TOPIC_OPTION.to_string()))?;
        let count = invocation.option(COUNT_OPTION).and_then(|v| v.as_integer());
        let lang = invocation.option(LANG_OPTION).and_then(|v| v.as_str());

        Self::new(topic, count, lang)
    }
}
