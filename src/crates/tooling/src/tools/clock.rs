use super::CURRENT_TIME;
use crate::registry::ToolExecutor;
use crate::runtime::ToolResult;
use async_trait::async_trait;
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Success payload of `get_current_time`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeReport {
    pub time: String,
}

impl TimeReport {
    pub fn now() -> Self {
        Self {
            time: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        }
    }
}

/// `get_current_time()`; takes no arguments and cannot fail
pub struct CurrentTimeTool;

#[async_trait]
impl ToolExecutor for CurrentTimeTool {
    fn name(&self) -> &str {
        CURRENT_TIME
    }

    async fn execute(&self, _args: Value) -> ToolResult {
        ToolResult::success(TimeReport::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use serde_json::json;

    #[tokio::test]
    async fn test_returns_parseable_timestamp() {
        let result = CurrentTimeTool.execute(json!({"ignored": true})).await;
        let report: TimeReport = serde_json::from_value(result.data().unwrap().clone()).unwrap();
        assert!(NaiveDateTime::parse_from_str(&report.time, "%Y-%m-%dT%H:%M:%S%.f").is_ok());
    }
}
