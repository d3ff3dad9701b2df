mod client;
mod models;

pub use client::{AskService, HttpAskClient, DEFAULT_SERVICE_URL};
pub use models::{error_detail, AskRequest, AskResponse};
