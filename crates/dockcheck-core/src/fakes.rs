//! In-memory fakes for the Checks API (testing only)
//!
//! `MemoryCheckApi` hands out sequential check ids, records every call and
//! can be told to reject creation or the first N updates.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::checks::{ApiResult, CheckCompletion, ChecksApi, NewCheckRun};
use crate::domain::check::{CheckHandle, RepoCoordinates};
use crate::domain::error::RemoteApiError;

/// A call observed by [`MemoryCheckApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckCall {
    Create(NewCheckRun),
    Complete {
        repo: RepoCoordinates,
        handle: CheckHandle,
        completion: CheckCompletion,
    },
}

#[derive(Debug, Default)]
struct FakeState {
    next_id: u64,
    calls: Vec<CheckCall>,
    create_failure: Option<RemoteApiError>,
    update_failures: VecDeque<RemoteApiError>,
}

#[derive(Debug, Default)]
pub struct MemoryCheckApi {
    state: Mutex<FakeState>,
}

impl MemoryCheckApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every creation call with `err`.
    pub fn failing_create(err: RemoteApiError) -> Self {
        let api = Self::new();
        api.state.lock().unwrap().create_failure = Some(err);
        api
    }

    /// Reject the next update call with `err`. Queued failures are consumed
    /// in order.
    pub fn fail_next_update(self, err: RemoteApiError) -> Self {
        self.state.lock().unwrap().update_failures.push_back(err);
        self
    }

    pub fn calls(&self) -> Vec<CheckCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn create_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, CheckCall::Create(_)))
            .count()
    }

    pub fn update_count(&self) -> usize {
        self.completions().len()
    }

    /// Every completion attempt, including rejected ones, in call order.
    pub fn completions(&self) -> Vec<CheckCompletion> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                CheckCall::Complete { completion, .. } => Some(completion),
                CheckCall::Create(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl ChecksApi for MemoryCheckApi {
    async fn create_check_run(&self, check: &NewCheckRun) -> ApiResult<CheckHandle> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(CheckCall::Create(check.clone()));
        if let Some(err) = &state.create_failure {
            return Err(err.clone());
        }
        state.next_id += 1;
        Ok(CheckHandle(state.next_id))
    }

    async fn complete_check_run(
        &self,
        repo: &RepoCoordinates,
        handle: CheckHandle,
        completion: &CheckCompletion,
    ) -> ApiResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(CheckCall::Complete {
            repo: repo.clone(),
            handle,
            completion: completion.clone(),
        });
        match state.update_failures.pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
