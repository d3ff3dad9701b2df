use std::env;
use std::path::PathBuf;

use tokio::time::Duration;

use crate::api::DEFAULT_SERVICE_URL;

pub struct AppConfig {
    pub service_url: String,
    pub history_path: PathBuf,
    pub timeout: Option<Duration>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let service_url =
            lookup("TRAVEL_API_URL").unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());

        let history_path = lookup("TRAVEL_HISTORY_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_history_path);

        let timeout = lookup("TRAVEL_TIMEOUT_MS")
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis);

        Self {
            service_url,
            history_path,
            timeout,
        }
    }
}

fn default_history_path() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("travel-assistant").join("storage.json"),
        None => PathBuf::from("travel-assistant-storage.json"),
    }
}
