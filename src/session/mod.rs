mod manager;
mod state;

pub use manager::SessionManager;
pub use state::{reduce, ActiveView, Event, Phase, SessionState};
