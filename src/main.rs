// ============================================================================
// salesgraph - Widget terminal "Units sold"
// ============================================================================
// Joue le rôle de l'hôte du widget :
// - affiche le placeholder dès le démarrage, puis l'aperçu du provider
// - un worker demande une timeline au provider, puis dort jusqu'à l'instant
//   de rafraîchissement qu'elle annonce (ou jusqu'à un 'r')
// - la boucle principale dessine le dernier snapshot reçu
//
// CONCEPTS RUST CLÉS :
// 1. Worker thread + runtime tokio dédié pour le fetch
// 2. mpsc channels dans les deux sens (commandes / résultats)
// 3. recv_timeout : attente d'une commande OU de l'échéance
// ============================================================================

use std::io;
use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info, warn};

use salesgraph::api::SalesClient;
use salesgraph::app::App;
use salesgraph::config::WidgetConfig;
use salesgraph::host::{apply_result, handle_event, run_refresh_worker, AppCommand, AppResult};
use salesgraph::provider::TimelineProvider;
use salesgraph::ui::{events::EventHandler, render};

// ============================================================================
// Initialisation du logging
// ============================================================================
// Le TUI occupe stdout : les logs partent dans un fichier avec rotation
// quotidienne.
// ============================================================================

/// Répertoire des logs : ~/.local/share/salesgraph/logs, sinon ./logs
fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("salesgraph").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

/// Initialise tracing vers un fichier journalier
///
/// # Utilisation
/// ```bash
/// tail -f ~/.local/share/salesgraph/logs/salesgraph.log.*
/// RUST_LOG=salesgraph=trace cargo run
/// ```
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "salesgraph.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "salesgraph=debug,info".into()),
        )
        .try_init()
        .context("Échec de l'initialisation du subscriber tracing")?;

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée
// ============================================================================

fn main() -> Result<()> {
    init_logging().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!("salesgraph starting up");

    let config = WidgetConfig::default();
    let client = SalesClient::new(&config).context("Échec de la création du client HTTP")?;
    info!(url = %client.url(), "Sales client ready");

    let provider = TimelineProvider::new(client, config);

    // Le placeholder s'affiche avant toute I/O
    let mut app = App::new(provider.placeholder());

    let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();

    info!("Spawning refresh worker");
    std::thread::spawn(move || run_refresh_worker(provider, command_rx, result_tx));

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let events = EventHandler::new();
    let result = run(&mut terminal, &mut app, &events, &command_tx, &result_rx);

    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event Loop
// ============================================================================
// À chaque itération : résultats du worker → rendu → clavier
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
    command_tx: &mpsc::Sender<AppCommand>,
    result_rx: &mpsc::Receiver<AppResult>,
) -> Result<()> {
    while app.is_running() {
        // 0. RÉSULTATS : vide le channel sans bloquer
        loop {
            match result_rx.try_recv() {
                Ok(result) => apply_result(app, result),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    warn!("Refresh worker disconnected");
                    app.stop_loading();
                    break;
                }
            }
        }

        // 1. RENDER
        terminal.draw(|frame| render(frame, app))?;

        // 2. INPUT
        match events.next() {
            Ok(event) => handle_event(app, event, command_tx),
            Err(e) => debug!(error = %e, "Failed to read terminal event"),
        }
    }

    Ok(())
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Échec de l'activation du raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| e.into())
}

/// Toujours appelé avant de quitter, même si run() a échoué
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
