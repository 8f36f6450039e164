use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use covmon_core::{CovmonError, MailTransport, OutgoingMail, RecipientAddress};

use crate::dynamic::MockBehavior;

/// A message the mock transport was asked to send, and whether it "went out".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentMail {
    /// Message as handed to the transport.
    pub mail: OutgoingMail,
    /// False when a scripted failure was returned for it.
    pub accepted: bool,
}

#[derive(Default)]
struct InternalState {
    scripts: HashMap<RecipientAddress, VecDeque<MockBehavior<()>>>,
    log: Vec<SentMail>,
    close_calls: usize,
}

/// Controller handle used by tests to script the mock transport.
pub struct TransportController {
    state: Arc<Mutex<InternalState>>,
}

impl TransportController {
    /// Queue behaviors for successive sends to `to`.
    ///
    /// Each send pops one behavior; once the queue is empty sends succeed.
    pub async fn script(&self, to: &RecipientAddress, behaviors: Vec<MockBehavior<()>>) {
        let mut guard = self.state.lock().await;
        guard
            .scripts
            .entry(to.clone())
            .or_default()
            .extend(behaviors);
    }

    /// Make the next send to `to` fail with a relay error.
    pub async fn fail_next(&self, to: &RecipientAddress, msg: &str) {
        self.script(to, vec![MockBehavior::Fail(CovmonError::send(to.as_str(), msg))])
            .await;
    }

    /// Every send attempt so far, in order.
    pub async fn sent(&self) -> Vec<SentMail> {
        let guard = self.state.lock().await;
        guard.log.clone()
    }

    /// How many times `close` was called.
    pub async fn close_calls(&self) -> usize {
        let guard = self.state.lock().await;
        guard.close_calls
    }
}

/// Transport that records messages instead of sending them.
pub struct MockTransport {
    state: Arc<Mutex<InternalState>>,
}

impl MockTransport {
    /// Create a new mock transport and its controller.
    #[must_use]
    pub fn new_with_controller() -> (Arc<dyn MailTransport>, TransportController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = TransportController {
            state: Arc::clone(&state),
        };
        (Arc::new(Self { state }) as Arc<dyn MailTransport>, controller)
    }
}

#[async_trait]
impl MailTransport for MockTransport {
    fn name(&self) -> &'static str {
        "covmon-mock"
    }

    async fn send(&self, mail: &OutgoingMail) -> Result<(), CovmonError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            let next = guard
                .scripts
                .get_mut(&mail.to)
                .and_then(VecDeque::pop_front);
            guard.log.push(SentMail {
                mail: mail.clone(),
                accepted: !matches!(next, Some(MockBehavior::Fail(_))),
            });
            next
        };

        match behavior {
            None | Some(MockBehavior::Return(())) => Ok(()),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }

    async fn close(&self) {
        let mut guard = self.state.lock().await;
        guard.close_calls += 1;
    }
}
