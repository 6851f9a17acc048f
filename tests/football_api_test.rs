//! Provider client behaviour on rate-limit responses

mod common;

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use football_league_api::error::ProviderError;

use common::premier_league;

/// In-memory sink for `tracing_subscriber::fmt`
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture_warnings() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    (logs, tracing::subscriber::set_default(subscriber))
}

#[tokio::test]
async fn rate_limit_is_logged_before_unreadable_reset_header_fails() {
    let (logs, _guard) = capture_warnings();
    let provider = premier_league().rate_limited("/teams/57", 1, "soon").start().await;

    let err = provider.client().fetch_squad(57).await.unwrap_err();

    assert!(matches!(err, ProviderError::InvalidRetryHeader { .. }));
    let output = logs.contents();
    assert!(output.contains("Rate limited by football API"));
    assert!(output.contains("You reached your request limit."));
    assert!(output.contains("x-requestcounter-reset"));
}

#[tokio::test]
async fn rate_limit_is_logged_before_waiting() {
    let (logs, _guard) = capture_warnings();
    let provider = premier_league().rate_limited("/competitions/PL", 1, "0").start().await;

    let competition = provider.client().fetch_competition("PL").await.unwrap();

    assert_eq!(competition.name, "Premier League");
    assert_eq!(provider.hits("/competitions/PL"), 2);
    assert!(logs.contents().contains("Rate limited by football API"));
}

#[tokio::test]
async fn league_code_is_escaped_as_one_path_segment() {
    let provider = premier_league().start().await;

    let err = provider.client().fetch_competition("../teams/57").await.unwrap_err();

    assert!(matches!(err, ProviderError::NotFound { .. }));
    assert_eq!(provider.hits("/teams/57"), 0);
}
