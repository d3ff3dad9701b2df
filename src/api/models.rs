use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct AskRequest<'a> {
    pub question: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct AskResponse {
    pub response: String,
    #[serde(default)]
    pub status: Option<String>,
}

// Accepts {"detail": ..}, {"error": {"detail": ..}} and {"error": ..}.
pub fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    let detail = value
        .get("detail")
        .or_else(|| value.get("error").and_then(|error| error.get("detail")))
        .or_else(|| value.get("error"))?;

    let message = detail.as_str()?.trim();
    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_top_level_detail() {
        assert_eq!(
            error_detail(r#"{"detail":"Question cannot be empty"}"#).as_deref(),
            Some("Question cannot be empty")
        );
    }

    #[test]
    fn reads_nested_error_detail() {
        assert_eq!(
            error_detail(r#"{"error":{"detail":"rate limited"}}"#).as_deref(),
            Some("rate limited")
        );
    }

    #[test]
    fn reads_plain_error_string() {
        assert_eq!(error_detail(r#"{"error":"Not found"}"#).as_deref(), Some("Not found"));
    }

    #[test]
    fn ignores_structured_or_missing_detail() {
        assert_eq!(error_detail(r#"{"detail":[{"loc":["body"]}]}"#), None);
        assert_eq!(error_detail(r#"{"status":"error"}"#), None);
        assert_eq!(error_detail("<html>bad gateway</html>"), None);
        assert_eq!(error_detail(r#"{"detail":"   "}"#), None);
    }

    #[test]
    fn serializes_question_payload() {
        let body = serde_json::to_string(&AskRequest { question: "Visa for Japan?" }).unwrap();
        assert_eq!(body, r#"{"question":"Visa for Japan?"}"#);
    }

    #[test]
    fn accepts_status_field_alongside_response() {
        let parsed: AskResponse =
            serde_json::from_str(r###"{"response":"## Visa","status":"success"}"###).unwrap();
        assert_eq!(parsed.response, "## Visa");
        assert_eq!(parsed.status.as_deref(), Some("success"));
    }
}
