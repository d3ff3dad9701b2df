use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::AskService;
use crate::error::{SessionError, ValidationError, REQUEST_FALLBACK_MESSAGE};
use crate::history::{HistoryLog, QueryRecord};
use crate::store::KeyValueStore;
use crate::suggestions::QUICK_QUESTIONS;

use super::state::{reduce, ActiveView, Event, Phase, SessionState};

pub struct SessionManager {
    state: SessionState,
    service: Arc<dyn AskService>,
    store: Box<dyn KeyValueStore>,
}

impl SessionManager {
    pub fn new(service: Arc<dyn AskService>, store: Box<dyn KeyValueStore>) -> Self {
        let mut manager = Self {
            state: SessionState::default(),
            service,
            store,
        };
        manager.load_history();
        manager
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn history(&self) -> &HistoryLog {
        &self.state.history
    }

    fn dispatch(&mut self, event: Event) {
        apply(&mut self.state, event);
    }

    pub fn load_history(&mut self) {
        self.state.history = HistoryLog::load(&*self.store);
        debug!(entries = self.state.history.len(), "loaded query history");
    }

    pub fn persist_history(&mut self) {
        if let Err(e) = self.state.history.save(&mut *self.store) {
            warn!(error = %e, "failed to persist query history");
        }
    }

    pub fn edit(&mut self, text: impl Into<String>) {
        self.dispatch(Event::Edit(text.into()));
    }

    pub fn switch_view(&mut self, view: ActiveView) {
        self.dispatch(Event::SwitchView(view));
    }

    pub async fn submit(&mut self, question: impl Into<String>) -> Result<QueryRecord, SessionError> {
        if !self.state.can_submit() {
            return Err(SessionError::Busy);
        }
        self.edit(question);
        self.submit_current().await
    }

    pub async fn submit_current(&mut self) -> Result<QueryRecord, SessionError> {
        if !self.state.can_submit() {
            return Err(SessionError::Busy);
        }

        self.dispatch(Event::Submit);
        if self.state.phase != Phase::Submitting {
            return Err(ValidationError::EmptyQuestion.into());
        }

        let question = self.state.current_query.clone();
        info!(chars = question.chars().count(), "submitting travel question");

        let service = Arc::clone(&self.service);
        let mut in_flight = InFlight {
            state: &mut self.state,
            resolved: false,
        };

        match service.ask(&question).await {
            Ok(response) => {
                let record = QueryRecord::new(question, response);
                in_flight.resolve(Event::Answered(record.clone()));
                drop(in_flight);
                self.persist_history();
                Ok(record)
            }
            Err(err) => {
                in_flight.resolve(Event::RequestFailed(err.user_message()));
                Err(err.into())
            }
        }
    }

    pub fn select_history_entry(&mut self, index: usize) -> bool {
        let Some(record) = self.state.history.get(index).cloned() else {
            return false;
        };
        self.dispatch(Event::SelectHistoryEntry(record));
        true
    }

    /// Pre-fills one of the quick questions without sending it.
    pub fn pick_quick_question(&mut self, index: usize) -> Option<&'static str> {
        let question = QUICK_QUESTIONS.get(index).copied()?;
        self.edit(question);
        self.switch_view(ActiveView::Ask);
        Some(question)
    }
}

fn apply(state: &mut SessionState, event: Event) {
    let current = std::mem::take(state);
    *state = reduce(current, event);
}

// Settles the session as failed if the submit future is dropped before the
// service answers.
struct InFlight<'a> {
    state: &'a mut SessionState,
    resolved: bool,
}

impl InFlight<'_> {
    fn resolve(&mut self, event: Event) {
        apply(self.state, event);
        self.resolved = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.resolved {
            warn!("travel question abandoned before the service answered");
            apply(
                self.state,
                Event::RequestFailed(REQUEST_FALLBACK_MESSAGE.to_string()),
            );
        }
    }
}
