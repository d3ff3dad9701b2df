use std::io::{self, Write};

use chrono::Local;
use owo_colors::OwoColorize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::error::SessionError;
use crate::history::HistoryLog;
use crate::render::{render_response, ResponseLine};
use crate::session::{ActiveView, SessionManager, SessionState};
use crate::suggestions::{QUICK_QUESTIONS, TRAVEL_TIPS};

const HELP: &str = "\
Type a travel question and press Enter to ask it.
  <empty line>  resend the current question
  /ask          show the current answer
  /history      list recent questions
  /open N       show history entry N
  /tips         travel tips and quick questions
  /quick N      load quick question N (press Enter to send)
  /help         this message
  /quit         exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ask(String),
    Resend,
    ShowAsk,
    ShowHistory,
    Open(usize),
    Tips,
    Quick(usize),
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Resend;
    }
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Command::Ask(line.trim_end_matches(['\r', '\n']).to_string());
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    match name {
        "ask" => Command::ShowAsk,
        "history" => Command::ShowHistory,
        "tips" => Command::Tips,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "open" => match one_based(arg) {
            Some(index) => Command::Open(index),
            None => Command::Invalid("usage: /open N".to_string()),
        },
        "quick" => match one_based(arg) {
            Some(index) => Command::Quick(index),
            None => Command::Invalid("usage: /quick N".to_string()),
        },
        other => Command::Invalid(format!("unknown command /{other}, try /help")),
    }
}

fn one_based(arg: Option<&str>) -> Option<usize> {
    arg?.parse::<usize>().ok()?.checked_sub(1)
}

pub fn render_ask_view(state: &SessionState, out: &mut impl Write) -> io::Result<()> {
    if let Some(error) = &state.error {
        writeln!(out, "{}", format!("! {error}").red())?;
    }
    if state.current_response.is_empty() {
        return Ok(());
    }
    for line in render_response(&state.current_response) {
        match line {
            ResponseLine::Heading(text) => writeln!(out, "{}", text.bold().cyan())?,
            ResponseLine::Body(text) => writeln!(out, "{text}")?,
        }
    }
    Ok(())
}

pub fn render_history_view(history: &HistoryLog, out: &mut impl Write) -> io::Result<()> {
    if history.is_empty() {
        return writeln!(out, "Your query history will appear here");
    }
    for (i, record) in history.records().iter().enumerate() {
        let when = record.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S");
        writeln!(out, "[{}] {} {}", i + 1, record.query, when.dimmed())?;
    }
    Ok(())
}

pub fn render_tips(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "Travel Tips".bold())?;
    for tip in TRAVEL_TIPS {
        writeln!(out, "  - {tip}")?;
    }
    writeln!(out, "{}", "Quick Questions".bold())?;
    for (i, question) in QUICK_QUESTIONS.iter().enumerate() {
        writeln!(out, "  [{}] {question}", i + 1)?;
    }
    Ok(())
}

fn render_active_view(session: &SessionManager, out: &mut impl Write) -> io::Result<()> {
    match session.state().active_view {
        ActiveView::Ask => render_ask_view(session.state(), out),
        ActiveView::History => render_history_view(session.history(), out),
    }
}

fn log_unanswered(err: &SessionError) {
    match err {
        SessionError::Busy => warn!("ignored submit while a question is in flight"),
        other => debug!(error = %other, "question not answered"),
    }
}

/// Reads commands from `input` until EOF or `/quit`.
pub async fn run<R, W>(session: &mut SessionManager, input: R, out: &mut W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{}", "Global Travel Assistant".bold())?;
    writeln!(out, "Ask about visas, vaccines and entry requirements. /help for commands.")?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            Command::Ask(question) => {
                writeln!(out, "{}", "Thinking...".dimmed())?;
                out.flush()?;
                session.switch_view(ActiveView::Ask);
                if let Err(err) = session.submit(question).await {
                    log_unanswered(&err);
                }
                render_ask_view(session.state(), out)?;
            }
            Command::Resend => {
                if !session.state().current_query.trim().is_empty() {
                    writeln!(out, "{}", "Thinking...".dimmed())?;
                    out.flush()?;
                }
                session.switch_view(ActiveView::Ask);
                if let Err(err) = session.submit_current().await {
                    log_unanswered(&err);
                }
                render_ask_view(session.state(), out)?;
            }
            Command::ShowAsk => {
                session.switch_view(ActiveView::Ask);
                render_active_view(session, out)?;
            }
            Command::ShowHistory => {
                session.switch_view(ActiveView::History);
                render_active_view(session, out)?;
            }
            Command::Open(index) => {
                if session.select_history_entry(index) {
                    writeln!(out, "{}", session.state().current_query.bold())?;
                    render_active_view(session, out)?;
                } else {
                    writeln!(out, "no history entry {}", index + 1)?;
                }
            }
            Command::Tips => render_tips(out)?,
            Command::Quick(index) => match session.pick_quick_question(index) {
                Some(question) => writeln!(out, "Loaded: {question} (press Enter to send)")?,
                None => writeln!(out, "no quick question {}", index + 1)?,
            },
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => break,
            Command::Invalid(message) => writeln!(out, "{message}")?,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AskService;
    use crate::error::RequestError;
    use crate::history::QueryRecord;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct EchoService;

    #[async_trait]
    impl AskService for EchoService {
        async fn ask(&self, question: &str) -> Result<String, RequestError> {
            Ok(format!("## Answer\nYou asked: {question}"))
        }
    }

    fn session() -> SessionManager {
        SessionManager::new(Arc::new(EchoService), Box::new(MemoryStore::new()))
    }

    #[test]
    fn parses_commands_and_questions() {
        assert_eq!(parse_command("Visa for Japan?"), Command::Ask("Visa for Japan?".into()));
        assert_eq!(parse_command("   "), Command::Resend);
        assert_eq!(parse_command("/history"), Command::ShowHistory);
        assert_eq!(parse_command(" /open 3 "), Command::Open(2));
        assert_eq!(parse_command("/quick 1"), Command::Quick(0));
        assert_eq!(parse_command("/exit"), Command::Quit);
    }

    #[test]
    fn rejects_bad_indices() {
        assert!(matches!(parse_command("/open"), Command::Invalid(_)));
        assert!(matches!(parse_command("/open 0"), Command::Invalid(_)));
        assert!(matches!(parse_command("/quick x"), Command::Invalid(_)));
        assert!(matches!(parse_command("/teleport"), Command::Invalid(_)));
    }

    #[test]
    fn ask_view_shows_error_banner_and_headings() {
        let state = SessionState {
            current_response: "## Visa\nBring passport".into(),
            error: Some("rate limited".into()),
            ..SessionState::default()
        };
        let mut out = Vec::new();
        render_ask_view(&state, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("rate limited"));
        assert!(text.contains("Visa"));
        assert!(!text.contains("## Visa"));
        assert!(text.find("Visa").unwrap() < text.find("Bring passport").unwrap());
    }

    #[test]
    fn history_view_lists_entries_or_placeholder() {
        let mut out = Vec::new();
        render_history_view(&HistoryLog::new(), &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("history will appear here"));

        let mut log = HistoryLog::new();
        log.prepend(QueryRecord::new("older", "a"));
        log.prepend(QueryRecord::new("newer", "b"));
        let mut out = Vec::new();
        render_history_view(&log, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[1] newer"));
        assert!(text.contains("[2] older"));
    }

    #[tokio::test]
    async fn scripted_session_asks_browses_and_reopens() {
        let mut session = session();
        let input: &[u8] = b"\nVisa for Japan?\n/history\n/open 1\n/quick 2\n\n/quit\nignored\n";
        let mut out = Vec::new();

        run(&mut session, input, &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Please enter a question"));
        assert!(text.contains("You asked: Visa for Japan?"));
        assert!(text.contains("[1] Visa for Japan?"));
        assert!(text.contains("Loaded: Vaccines needed for Brazil?"));
        assert!(text.contains("You asked: Vaccines needed for Brazil?"));
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history().get(0).unwrap().query, "Vaccines needed for Brazil?");
    }
}
