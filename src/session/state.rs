use crate::error::VALIDATION_MESSAGE;
use crate::history::{HistoryLog, QueryRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Ask,
    History,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub current_query: String,
    pub current_response: String,
    pub loading: bool,
    pub error: Option<String>,
    pub active_view: ActiveView,
    pub phase: Phase,
    pub history: HistoryLog,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            current_query: String::new(),
            current_response: String::new(),
            loading: false,
            error: None,
            active_view: ActiveView::Ask,
            phase: Phase::Idle,
            history: HistoryLog::new(),
        }
    }
}

impl SessionState {
    pub fn can_submit(&self) -> bool {
        !self.loading
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Edit(String),
    Submit,
    Answered(QueryRecord),
    RequestFailed(String),
    SelectHistoryEntry(QueryRecord),
    SwitchView(ActiveView),
}

pub fn reduce(mut state: SessionState, event: Event) -> SessionState {
    match event {
        Event::Edit(text) => {
            state.current_query = text;
            if state.phase == Phase::Failed {
                state.phase = Phase::Idle;
            }
        }
        Event::Submit => {
            if !state.can_submit() {
                return state;
            }
            if state.current_query.trim().is_empty() {
                state.phase = Phase::Failed;
                state.error = Some(VALIDATION_MESSAGE.to_string());
            } else {
                state.phase = Phase::Submitting;
                state.loading = true;
                state.error = None;
            }
        }
        Event::Answered(record) => {
            if state.phase != Phase::Submitting {
                return state;
            }
            state.current_response = record.response.clone();
            state.history.prepend(record);
            state.loading = false;
            state.phase = Phase::Succeeded;
        }
        Event::RequestFailed(message) => {
            if state.phase != Phase::Submitting {
                return state;
            }
            state.error = Some(message);
            state.loading = false;
            state.phase = Phase::Failed;
        }
        Event::SelectHistoryEntry(record) => {
            state.current_query = record.query;
            state.current_response = record.response;
            state.active_view = ActiveView::Ask;
        }
        Event::SwitchView(view) => state.active_view = view,
    }
    state
}
