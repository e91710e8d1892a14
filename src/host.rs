// ============================================================================
// Host - Pilotage du widget par le terminal
// ============================================================================
// Colle entre la boucle UI (qui possède App) et le worker (qui possède le
// provider). Les deux côtés ne se parlent que par deux channels mpsc :
//
//   UI  ──AppCommand──▶  worker   (ForceRefresh)
//   UI  ◀──AppResult───  worker   (aperçu, début de fetch, timeline)
//
// CONCEPTS RUST CLÉS :
// 1. Ownership : le provider est déplacé dans le worker, App reste à l'UI
// 2. recv_timeout : attente d'une commande OU de l'échéance de la timeline
// 3. Drop d'un Sender = signal d'arrêt pour l'autre côté
// ============================================================================

use std::sync::mpsc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::api::SalesSource;
use crate::app::App;
use crate::models::{Snapshot, Timeline};
use crate::provider::TimelineProvider;
use crate::ui::events::{is_escape_event, is_quit_event, is_refresh_event, Event};

// ============================================================================
// Messages entre la boucle UI et le worker
// ============================================================================

/// Commandes envoyées au worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Rafraîchir tout de suite sans attendre l'échéance
    ForceRefresh,
}

/// Résultats renvoyés par le worker
#[derive(Debug)]
pub enum AppResult {
    /// Aperçu rendu par `snapshot()` avant le premier fetch
    PreviewReady(Snapshot),

    /// Un fetch vient de démarrer
    RefreshStarted,

    /// Nouvelle timeline prête (données fraîches ou snapshot réémis)
    TimelineReady(Timeline),
}

// ============================================================================
// Worker de rafraîchissement
// ============================================================================
// Un seul worker → au plus un fetch en cours.
// Bloquant : à lancer dans un thread dédié, il crée son propre runtime tokio.
// ============================================================================

/// Boucle du worker : aperçu, puis timeline → attente → timeline ...
///
/// S'arrête quand la boucle UI lâche l'un des deux channels.
///
/// # Arguments
/// * `provider` - Provider déplacé dans le worker
/// * `command_rx` - Commandes de la boucle UI
/// * `result_tx` - Résultats vers la boucle UI
pub fn run_refresh_worker<S: SalesSource>(
    mut provider: TimelineProvider<S>,
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
) {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "Failed to create tokio runtime, worker exiting");
            return;
        }
    };

    let preview = runtime.block_on(provider.snapshot());
    if result_tx.send(AppResult::PreviewReady(preview)).is_err() {
        return;
    }

    loop {
        if result_tx.send(AppResult::RefreshStarted).is_err() {
            break;
        }

        let timeline = runtime.block_on(provider.timeline());
        let next_refresh = timeline.next_refresh();

        if result_tx.send(AppResult::TimelineReady(timeline)).is_err() {
            break;
        }

        // Attente jusqu'à l'échéance, interrompue par une commande
        let wait = (next_refresh - Utc::now())
            .to_std()
            .unwrap_or(Duration::ZERO);
        debug!(wait_ms = wait.as_millis() as u64, %next_refresh, "Worker sleeping until next refresh");

        match command_rx.recv_timeout(wait) {
            Ok(AppCommand::ForceRefresh) => info!("Forced refresh requested"),
            Err(mpsc::RecvTimeoutError::Timeout) => debug!("Scheduled refresh due"),
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    info!("Refresh worker exiting (channel closed)");
}

// ============================================================================
// Côté UI
// ============================================================================

/// Applique un message du worker à l'état
pub fn apply_result(app: &mut App, result: AppResult) {
    match result {
        AppResult::PreviewReady(snapshot) => app.apply_preview(snapshot),
        AppResult::RefreshStarted => app.start_loading(),
        AppResult::TimelineReady(timeline) => {
            info!(next_refresh = %timeline.next_refresh(), "Applying new timeline");
            app.apply_timeline(timeline);
        }
    }
}

/// Applique un événement clavier à l'état
///
/// - 'q' deux fois : quitter, toute autre touche annule la confirmation
/// - 'r' : ForceRefresh, ignoré tant qu'un fetch est en cours
pub fn handle_event(app: &mut App, event: Event, command_tx: &mpsc::Sender<AppCommand>) {
    match event {
        Event::Key(_) if is_quit_event(&event) => {
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
        }

        Event::Key(_) if is_escape_event(&event) => {
            app.cancel_quit();
        }

        Event::Key(_) if is_refresh_event(&event) => {
            app.cancel_quit();
            if app.is_loading_data() {
                debug!("Refresh already in flight, ignoring");
            } else if command_tx.send(AppCommand::ForceRefresh).is_ok() {
                // Marqué tout de suite : un second 'r' avant RefreshStarted
                // ne doit pas empiler une autre commande
                app.start_loading();
            } else {
                warn!("Refresh worker is gone, cannot refresh");
            }
        }

        Event::Key(_) => app.cancel_quit(),

        Event::Tick => {}
    }
}

// ============================================================================
// Tests
// ============================================================================
