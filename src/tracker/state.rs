//! Request state held in a tracker slot.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::ApiResult;

/// Lifecycle of a tracked request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReqStatus {
    /// Never called.
    Idle,
    /// A call is in flight.
    Pending,
    /// The latest call has settled.
    Done,
}

impl std::fmt::Display for ReqStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ReqStatus::Idle => "IDLE",
            ReqStatus::Pending => "PENDING",
            ReqStatus::Done => "DONE",
        };
        f.write_str(s)
    }
}

/// Snapshot of one named request.
///
/// All the `is_*` flags are computed from `status` and `result`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReqState {
    name: String,
    status: ReqStatus,
    result: Option<ApiResult>,
    generation: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    initial_data: Option<Value>,
}

impl ReqState {
    pub(crate) fn new(name: &str, initial_data: Option<Value>) -> Self {
        Self {
            name: name.to_string(),
            status: ReqStatus::Idle,
            result: None,
            generation: 0,
            initial_data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> ReqStatus {
        self.status
    }

    /// The last stored result; `None` until the first call settles.
    pub fn result(&self) -> Option<&ApiResult> {
        self.result.as_ref()
    }

    /// Number of calls issued so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Payload of the last result, or the initial data before one exists.
    pub fn data(&self) -> Option<&Value> {
        match &self.result {
            Some(result) => result.data.as_ref(),
            None => self.initial_data.as_ref(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.status == ReqStatus::Idle
    }

    pub fn is_pending(&self) -> bool {
        self.status == ReqStatus::Pending
    }

    pub fn is_done(&self) -> bool {
        self.status == ReqStatus::Done
    }

    /// Done, and the stored result succeeded.
    pub fn is_success(&self) -> bool {
        self.is_done() && self.result.as_ref().is_some_and(ApiResult::is_success)
    }

    /// Done, and the stored result did not succeed.
    pub fn is_failed(&self) -> bool {
        self.is_done() && !self.is_success()
    }

    /// Start a new call and return its generation.
    pub(crate) fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.status = ReqStatus::Pending;
        self.generation
    }

    /// Store the result of `generation` if it is still the latest call.
    pub(crate) fn settle(&mut self, generation: u64, result: ApiResult) -> bool {
        if generation != self.generation {
            return false;
        }
        self.status = ReqStatus::Done;
        self.result = Some(result);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_state_is_idle() {
        let state = ReqState::new("x", Some(json!([])));

        assert!(state.is_idle());
        assert!(!state.is_pending());
        assert!(!state.is_done());
        assert!(!state.is_success());
        assert!(!state.is_failed());
        assert!(state.result().is_none());
        assert_eq!(state.data(), Some(&json!([])));
    }

    #[test]
    fn test_lifecycle() {
        let mut state = ReqState::new("x", None);

        let generation = state.begin();
        assert_eq!(generation, 1);
        assert!(state.is_pending());
        assert!(state.result().is_none());

        assert!(state.settle(generation, ApiResult::success(Some(json!({"id": 10})))));
        assert!(state.is_done());
        assert!(state.is_success());
        assert_eq!(state.data(), Some(&json!({"id": 10})));

        // A new call re-enters pending and keeps the previous result.
        state.begin();
        assert!(state.is_pending());
        assert!(state.result().is_some());
    }

    #[test]
    fn test_stale_generation_is_rejected() {
        let mut state = ReqState::new("x", None);
        let first = state.begin();
        let second = state.begin();

        assert!(!state.settle(first, ApiResult::success(None)));
        assert!(state.is_pending());

        assert!(state.settle(second, ApiResult::problem("http://x", "Forbidden")));
        assert!(state.is_failed());
    }

    #[test]
    fn test_serializes_status_in_upper_case() {
        let state = ReqState::new("getBadrequest", None);
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["status"], "IDLE");
        assert_eq!(value["name"], "getBadrequest");
        assert!(value["result"].is_null());
    }
}
