// ============================================================================
// Gestion des événements
// ============================================================================
// Lit le clavier avec un timeout et produit des ticks réguliers
//
// CONCEPTS RUST :
// 1. Enums avec variants : Key(KeyEvent) ou Tick
// 2. Polling avec timeout : la boucle reste réactive aux résultats du worker
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};

/// Délai max d'attente d'une touche avant de rendre un Tick
const POLL_TIMEOUT: Duration = Duration::from_millis(250);

/// Événements du widget
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Aucun événement pendant POLL_TIMEOUT
    Tick,
}

/// Gestionnaire d'événements (sans état)
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    /// Lit le prochain événement, ou Tick après POLL_TIMEOUT
    ///
    /// CONCEPT : Filtre sur KeyEventKind
    /// Certains OS envoient Press ET Release, on ne garde que Press.
    pub fn next(&self) -> Result<Event> {
        if !event::poll(POLL_TIMEOUT)? {
            return Ok(Event::Tick);
        }

        match event::read()? {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
            // Release, resize, souris : ignorés
            _ => Ok(Event::Tick),
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Helpers : identifier les touches
// ============================================================================

/// 'q' : quitter (avec confirmation)
pub fn is_quit_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
    } else {
        false
    }
}

/// 'r' : forcer un rafraîchissement
pub fn is_refresh_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
    } else {
        false
    }
}

/// Échap
pub fn is_escape_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Esc)
    } else {
        false
    }
}
