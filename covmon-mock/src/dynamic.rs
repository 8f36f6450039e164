use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use covmon_core::{CovmonError, FieldMap, Query, QueryGateway, QueryKey, QueryParams};

/// Instruction for how a call should behave.
#[derive(Clone, Debug)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(CovmonError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

/// One call observed by the dynamic gateway.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutedQuery {
    /// Logical query.
    pub key: QueryKey,
    /// SQL after macro substitution.
    pub sql: String,
    /// Bind parameters.
    pub params: QueryParams,
}

#[derive(Default)]
struct InternalState {
    rules: HashMap<QueryKey, MockBehavior<Vec<FieldMap>>>,
    executed: Vec<ExecutedQuery>,
    close_calls: usize,
}

/// Controller handle used by tests to drive the dynamic gateway from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for a logical query.
    pub async fn set_behavior(&self, key: QueryKey, behavior: MockBehavior<Vec<FieldMap>>) {
        let mut guard = self.state.lock().await;
        guard.rules.insert(key, behavior);
    }

    /// Shorthand for `set_behavior(key, MockBehavior::Return(rows))`.
    pub async fn set_rows(&self, key: QueryKey, rows: Vec<FieldMap>) {
        self.set_behavior(key, MockBehavior::Return(rows)).await;
    }

    /// Every call made so far, in order.
    pub async fn executed(&self) -> Vec<ExecutedQuery> {
        let guard = self.state.lock().await;
        guard.executed.clone()
    }

    /// How many times `close` was called.
    pub async fn close_calls(&self) -> usize {
        let guard = self.state.lock().await;
        guard.close_calls
    }

    /// Clear all configured behaviors and call logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.rules.clear();
        guard.executed.clear();
        guard.close_calls = 0;
    }
}

/// A gateway that defers all behavior to an external controller.
///
/// Queries without a configured behavior return no rows.
pub struct DynamicMockGateway {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockGateway {
    /// Create a new dynamic gateway and its controller.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<dyn QueryGateway>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn QueryGateway>, controller)
    }
}

#[async_trait]
impl QueryGateway for DynamicMockGateway {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn select(
        &self,
        query: &Query,
        params: &QueryParams,
    ) -> Result<Vec<FieldMap>, CovmonError> {
        // Log and snapshot the behavior without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.executed.push(ExecutedQuery {
                key: query.key,
                sql: query.sql.clone(),
                params: params.clone(),
            });
            guard.rules.get(&query.key).cloned()
        };

        match behavior {
            Some(MockBehavior::Return(rows)) => Ok(rows),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Ok(Vec::new()),
        }
    }

    async fn close(&self) {
        let mut guard = self.state.lock().await;
        guard.close_calls += 1;
    }
}
