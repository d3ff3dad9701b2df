pub mod api;
pub mod config;
pub mod error;
pub mod history;
pub mod render;
pub mod session;
pub mod store;
pub mod suggestions;
pub mod terminal;

pub use api::{AskService, HttpAskClient};
pub use config::AppConfig;
pub use error::{RequestError, SessionError, StoreError, ValidationError};
pub use history::{HistoryLog, QueryRecord};
pub use render::{render_response, ResponseLine};
pub use session::{ActiveView, Phase, SessionManager, SessionState};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
