// ============================================================================
// Structure : App
// ============================================================================
// État du widget côté hôte : snapshot affiché, prochain rafraîchissement,
// indicateur de chargement, confirmation de sortie.
//
// PATTERN : "Application State"
// - Le rendu lit App, les événements et le worker le modifient
// - Le snapshot est remplacé en bloc à chaque timeline reçue
// ============================================================================

use chrono::{DateTime, Utc};

use crate::models::{Snapshot, Timeline};

/// État principal du widget
pub struct App {
    /// false quand l'utilisateur a confirmé la sortie
    pub running: bool,

    /// Snapshot actuellement affiché (placeholder au démarrage)
    pub snapshot: Snapshot,

    /// Prochain rafraîchissement annoncé par la dernière timeline
    pub next_refresh: Option<DateTime<Utc>>,

    /// Un fetch est en cours dans le worker
    pub is_loading: bool,

    /// Two-step quit : première pression de 'q' → true
    pub confirm_quit: bool,
}

impl App {
    /// Crée l'état initial à partir du placeholder du provider
    pub fn new(placeholder: Snapshot) -> Self {
        Self {
            running: true,
            snapshot: placeholder,
            next_refresh: None,
            is_loading: false,
            confirm_quit: false,
        }
    }

    /// Remplace le snapshot affiché par l'entrée de la timeline
    ///
    /// CONCEPT RUST : Ownership
    /// - La timeline est consommée, son snapshot est déplacé dans App
    /// - L'ancien snapshot est droppé : aucun historique
    pub fn apply_timeline(&mut self, timeline: Timeline) {
        self.next_refresh = Some(timeline.next_refresh());
        if let Some(snapshot) = timeline.into_current() {
            self.snapshot = snapshot;
        }
        self.is_loading = false;
    }

    /// Affiche l'aperçu du provider tant qu'aucune timeline n'est arrivée
    pub fn apply_preview(&mut self, snapshot: Snapshot) {
        if self.next_refresh.is_none() {
            self.snapshot = snapshot;
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    pub fn start_loading(&mut self) {
        self.is_loading = true;
    }

    pub fn stop_loading(&mut self) {
        self.is_loading = false;
    }

    pub fn is_loading_data(&self) -> bool {
        self.is_loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Batch, DataPoint};
    use chrono::Duration;

    fn placeholder() -> Snapshot {
        Snapshot::new(Utc::now(), Batch::placeholder(6))
    }

    #[test]
    fn test_app_creation() {
        let app = App::new(placeholder());
        assert!(app.is_running());
        assert!(app.snapshot.is_placeholder());
        assert!(app.next_refresh.is_none());
        assert!(!app.is_loading_data());
    }

    #[test]
    fn test_apply_timeline_replaces_snapshot() {
        let mut app = App::new(placeholder());
        app.start_loading();

        let now = Utc::now();
        let batch = Batch::live(vec![DataPoint::new(1_700_000_000_000.0, 5)]);
        let next = now + Duration::minutes(15);
        app.apply_timeline(Timeline::single(Snapshot::new(now, batch.clone()), next));

        assert_eq!(app.snapshot.batch, batch);
        assert_eq!(app.next_refresh, Some(next));
        assert!(!app.is_loading_data());
    }

    #[test]
    fn test_preview_only_before_first_timeline() {
        let mut app = App::new(placeholder());
        let preview = Snapshot::new(Utc::now(), Batch::placeholder(3));
        app.apply_preview(preview.clone());
        assert_eq!(app.snapshot, preview);

        let now = Utc::now();
        let batch = Batch::live(vec![DataPoint::new(1_700_000_000_000.0, 5)]);
        app.apply_timeline(Timeline::single(Snapshot::new(now, batch.clone()), now));
        app.apply_preview(placeholder());
        assert_eq!(app.snapshot.batch, batch);
    }

    #[test]
    fn test_two_step_quit() {
        let mut app = App::new(placeholder());

        app.request_quit();
        assert!(app.is_awaiting_quit_confirmation());
        assert!(app.is_running());

        app.cancel_quit();
        assert!(!app.is_awaiting_quit_confirmation());

        app.quit();
        assert!(!app.is_running());
    }
}
