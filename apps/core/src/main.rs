// BizDesk core entry point
// Chat requests on stdin, JSON replies on stdout; `reminders <snapshot.json>` prints the reminder list.

use anyhow::{Context, Result};
use bizdesk_core::assistant::LocalAssistant;
use bizdesk_core::chat::{read_request_line, reply_line};
use bizdesk_core::config::AppConfig;
use bizdesk_core::reminders::{collect_reminders, load_snapshot};
use bizdesk_core::telemetry::init_tracing;
use chrono::Utc;
use tokio::io::{AsyncWriteExt, BufReader};
use tracing::info;
use uuid::Uuid;

async fn run_chat_loop() -> Result<()> {
    let assistant = LocalAssistant::new();
    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut buf = Vec::new();

    info!("Assistant ready, reading chat requests from stdin");

    while let Some(line) = read_request_line(&mut stdin, &mut buf)
        .await
        .context("reading stdin")?
    {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("chat", %request_id);
        let body = span.in_scope(|| reply_line(&assistant, &line))?;

        stdout.write_all(body.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    Ok(())
}

async fn run_reminders(path: &str, config: &AppConfig) -> Result<()> {
    let snapshot = load_snapshot(path)
        .await
        .with_context(|| format!("loading snapshot {}", path))?;
    let reminders = collect_reminders(&snapshot, Utc::now(), &config.reminder_windows());
    info!("{} reminders pending", reminders.len());

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(serde_json::to_string_pretty(&reminders)?.as_bytes())
        .await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    AppConfig::load_dotenv();
    let config = AppConfig::from_env()?;
    init_tracing(&config)?;

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("reminders") => {
            let path = args
                .next()
                .context("usage: bizdesk-core reminders <snapshot.json>")?;
            run_reminders(&path, &config).await
        }
        Some(other) => anyhow::bail!("unknown command '{}'", other),
        None => run_chat_loop().await,
    }
}
