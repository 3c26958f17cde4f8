// PhishGuard - command-line entry point

mod cli;

use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use phishguard::models::settings::SettingsUpdate;
use phishguard::services::{
    format_app_share, format_result_share, verification_links, HistoryCache, RejectReason,
    SessionState, SpamReport, SubmitOptions, SubmitOutcome,
};
use phishguard::{AnalysisResult, AppState, HistoryItem};

use cli::{AppsCommands, Cli, Commands, ConfigCommands, HistoryCommands, KeyCommands};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let state = match &cli.data_dir {
        Some(dir) => AppState::open(dir),
        None => AppState::open_default(),
    }
    .context("failed to open PhishGuard data directory")?;

    run(cli.command, &state).await
}

/// Logs go to stderr so that `--json` output stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run(command: Commands, state: &AppState) -> Result<()> {
    match command {
        Commands::Analyze {
            number,
            api_key,
            timeout,
            json,
        } => analyze(state, &number, api_key.as_deref(), timeout, json).await,

        Commands::History { action } => history(state, action).await,

        Commands::Share { id } => {
            let item = find_entry(state, &id).await?;
            let link = state.config().await.app_link;
            println!("{}", format_result_share(&item.result, &link));
            Ok(())
        }

        Commands::ShareApp => {
            let link = state.config().await.app_link;
            println!("{}", format_app_share(&link));
            Ok(())
        }

        Commands::Links { id } => {
            let item = find_entry(state, &id).await?;
            for link in verification_links(&item.result) {
                println!("{}: {}", link.label, link.url);
            }
            Ok(())
        }

        Commands::Key { action } => key(state, action),

        Commands::Config { action } => config(state, action).await,

        Commands::Apps { action } => apps(state, action).await,

        Commands::Report { number, kind } => {
            let report = SpamReport::new(&number, kind.into())?;
            tracing::info!(kind = %report.kind, "report acknowledged");
            println!("{}", report.receipt());
            Ok(())
        }
    }
}

async fn analyze(
    state: &AppState,
    number: &str,
    api_key: Option<&str>,
    timeout: Option<u64>,
    json: bool,
) -> Result<()> {
    let options = SubmitOptions {
        credential: api_key.map(str::to_string),
        timeout: timeout.map(Duration::from_secs),
    };
    let outcome = state.session().submit_with(number, &options).await;

    let session_state = match outcome {
        SubmitOutcome::Rejected(RejectReason::EmptyInput) => bail!("전화번호를 입력해주세요."),
        SubmitOutcome::Rejected(RejectReason::AlreadyInFlight) => {
            bail!("analysis already in progress")
        }
        SubmitOutcome::Completed(session_state) => session_state,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&session_state)?);
    }
    match session_state {
        SessionState::Success(result) => {
            if !json {
                print_result(&result);
            }
            Ok(())
        }
        SessionState::Error { message, .. } => bail!(message),
        SessionState::Idle | SessionState::Loading => {
            bail!("analysis finished in an unexpected state")
        }
    }
}

async fn history(state: &AppState, action: HistoryCommands) -> Result<()> {
    match action {
        HistoryCommands::List { limit, json } => {
            let history = state.history().lock().await;
            let items = &history.items()[..limit.unwrap_or(usize::MAX).min(history.len())];
            if json {
                println!("{}", serde_json::to_string_pretty(items)?);
            } else if items.is_empty() {
                println!("최근 검색 기록이 없습니다.");
            } else {
                for item in items {
                    print_history_line(item);
                }
            }
        }
        HistoryCommands::Show { id } => {
            let item = find_entry(state, &id).await?;
            state.session().load_from_history(&item).await;
            if let SessionState::Success(result) = state.session().state().await {
                print_result(&result);
            }
        }
        HistoryCommands::Delete { id } => {
            if !state.history().lock().await.delete(&id)? {
                bail!("no history entry with id {}", id);
            }
            println!("삭제되었습니다.");
        }
        HistoryCommands::Clear => {
            let removed = state.history().lock().await.clear()?;
            println!("{}개의 기록을 삭제했습니다.", removed);
        }
    }
    Ok(())
}

fn key(state: &AppState, action: KeyCommands) -> Result<()> {
    let credentials = state.credentials();
    match action {
        KeyCommands::Set { key } => {
            credentials.set(&key)?;
            println!("API Key가 저장되었습니다.");
        }
        KeyCommands::Clear => {
            credentials.clear()?;
            println!("저장된 API Key를 삭제했습니다.");
        }
        KeyCommands::Status => {
            if credentials.has_key() {
                println!("personal key: saved");
            } else if phishguard_llm::default_key_from_env().is_some() {
                println!("personal key: none (using default key from environment)");
            } else {
                println!("personal key: none (no default key configured)");
            }
        }
    }
    Ok(())
}

async fn config(state: &AppState, action: ConfigCommands) -> Result<()> {
    let mut service = state.config_service().write().await;
    let update = match action {
        ConfigCommands::Show => {
            println!("{}", serde_json::to_string_pretty(service.get_config())?);
            println!("# {}", service.path().display());
            return Ok(());
        }
        ConfigCommands::Reset => {
            service.reset()?;
            println!("설정이 초기화되었습니다.");
            return Ok(());
        }
        ConfigCommands::SetModel { model } => SettingsUpdate {
            model: Some(model),
            ..Default::default()
        },
        ConfigCommands::SetLink { link } => SettingsUpdate {
            app_link: Some(link),
            ..Default::default()
        },
    };
    let updated = service.update_config(update)?;
    println!("{}", serde_json::to_string_pretty(&updated)?);
    Ok(())
}

async fn apps(state: &AppState, action: AppsCommands) -> Result<()> {
    let mut catalog = state.catalog().lock().await;
    match action {
        AppsCommands::List => {
            if catalog.list().is_empty() {
                println!("등록된 앱이 없습니다.");
            }
            for app in catalog.list() {
                println!("[{}] {} - {}", app.id, app.title, app.description);
            }
        }
        AppsCommands::Add {
            password,
            title,
            description,
        } => {
            let token = state.admin().login(&password)?;
            let app = catalog.add(&token, &title, &description)?;
            println!("추가되었습니다: [{}] {}", app.id, app.title);
        }
        AppsCommands::Delete { password, id } => {
            let token = state.admin().login(&password)?;
            catalog.delete(&token, &id)?;
            println!("삭제되었습니다.");
        }
        AppsCommands::Clear { password } => {
            let token = state.admin().login(&password)?;
            catalog.clear(&token)?;
            println!("모든 앱을 삭제했습니다.");
        }
    }
    Ok(())
}

/// `latest` or an exact history id.
async fn find_entry(state: &AppState, id: &str) -> Result<HistoryItem> {
    let history = state.history().lock().await;
    lookup(&history, id)
        .cloned()
        .ok_or_else(|| anyhow!("no history entry matching {:?}", id))
}

fn lookup<'a>(history: &'a HistoryCache, id: &str) -> Option<&'a HistoryItem> {
    if id == "latest" {
        history.latest()
    } else {
        history.get(id)
    }
}

fn print_result(result: &AnalysisResult) {
    let tier = result.tier();
    println!("{} ({}점)", tier.headline(), result.risk_score);
    println!("{}", result.normalized_number);
    println!("{}", result.category);
    println!();
    println!("요약");
    for line in &result.summary {
        println!("  - {}", line);
    }
    println!();
    println!("상세 분석");
    for line in &result.details {
        println!("  - {}", line);
    }
    println!();
    println!("대응 가이드: {}", result.action_guide);
    println!("{}", result.closing_message);
}

fn print_history_line(item: &HistoryItem) {
    let when = chrono::DateTime::from_timestamp_millis(item.timestamp)
        .map(|t| {
            t.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{}  {}  {}  {:>3}점  {}",
        item.id,
        when,
        item.result.normalized_number,
        item.result.risk_score,
        item.tier().headline()
    );
}
