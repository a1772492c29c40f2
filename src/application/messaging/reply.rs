//! Reply composition

use std::time::Duration;

use crate::domain::entities::{Embed, RelayParameters, Reply};

pub const SUCCESS_COLOR: u32 = 0x00FF00;
pub const FAILURE_COLOR: u32 = 0xFF0000;

pub const SUCCESS_TITLE: &str = "✅ Research Completed by DeepSeek AI";
pub const FAILURE_TITLE: &str = "❌ Research Request Failed";

/// Elapsed time in whole seconds, halves rounded up
pub fn elapsed_seconds(elapsed: Duration) -> u128 {
    (elapsed.as_millis() + 500) / 1000
}

pub fn summary_line(count: i64, elapsed: Duration, lang: &str) -> String {
    format!(
        "📊 count: {} | time: {}s | lang: {}",
        count,
        elapsed_seconds(elapsed),
        lang
    )
}

pub fn research_success(params: &RelayParameters, elapsed: Duration, dashboard_url: &str) -> Reply {
    let description = format!(
        "**Trend Topic**\n{}\n\n{}\n🔗 [View Results]({})",
        params.trend_topic,
        summary_line(params.count, elapsed, &params.lang),
        dashboard_url
    );

    Reply::embed(Embed {
        title: SUCCESS_TITLE.to_string(),
        description,
        color: SUCCESS_COLOR,
    })
}

pub fn start_success(status: u16, status_text: &str) -> Reply {
    Reply::text(format!("Status: {} {}", status, status_text).trim_end().to_string())
}

/// Failure replies are always visible only to the invoking user
pub fn failure(message: &str) -> Reply {
    let description = if message.is_empty() {
        "Unknown error".to_string()
    } else {
        message.to_string()
    };

    Reply::embed(Embed {
        title: FAILURE_TITLE.to_string(),
        description,
        color: FAILURE_COLOR,
    })
    .ephemeral()
}
