// ============================================================================
// Widget - Rendu du graphique des ventes
// ============================================================================
// Dessine le widget complet :
//
//   ┌──────────────────────────────┐
//   │          Units sold          │  header : titre + séparateur
//   │ ──────────────────────────── │
//   │  5    10                     │  valeur au-dessus de chaque barre
//   │      ███                     │
//   │ ███  ███                     │  barres (hauteur ∝ units / max)
//   │Nov 14 Nov 15                 │  date sous chaque barre
//   │ Updated 14:05 · Next 14:20   │  footer
//   └──────────────────────────────┘
//
// La géométrie des barres vient de ui::bars, ce module ne fait que dessiner.
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::bars::{layout_bars, Bar, BarSlot, PLACEHOLDER_COLOR};

/// Titre affiché en haut du widget
const TITLE: &str = "Units sold";

/// Format des heures dans le footer
const TIME_FORMAT: &str = "%H:%M UTC";

/// Dessine le widget dans toute la surface du terminal
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Titre + séparateur
            Constraint::Min(0),    // Barres
            Constraint::Length(2), // Footer
        ])
        .split(frame.size());

    render_header(frame, chunks[0]);
    render_bars(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);
}

/// Titre centré en gras, puis une ligne de séparation
fn render_header(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(Span::styled(
            "─".repeat(area.width as usize),
            Style::default().fg(Color::Gray),
        )),
    ];

    frame.render_widget(Paragraph::new(text), area);
}

// ============================================================================
// Barres
// ============================================================================

/// Une colonne par point : valeur, barre, date
///
/// CONCEPT RATATUI : Layout horizontal avec Ratio
/// - Ratio(1, n) : n colonnes de même largeur
/// - Chaque colonne est ensuite découpée verticalement
fn render_bars(frame: &mut Frame, app: &App, area: Rect) {
    let batch = &app.snapshot.batch;

    if batch.is_empty() {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "No data",
            Style::default().fg(Color::Gray),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    // Une ligne pour la valeur, une pour la date
    let available_height = area.height.saturating_sub(2);
    let slots = layout_bars(batch, available_height);

    let count = slots.len() as u32;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, count); slots.len()])
        .split(area);

    for (slot, column) in slots.iter().zip(columns.iter()) {
        match slot {
            BarSlot::Placeholder => render_placeholder_block(frame, *column),
            BarSlot::Bar(bar) => render_bar(frame, bar, *column),
        }
    }
}

/// Espace d'une colonne une fois retirée une marge horizontale
fn padded(column: Rect) -> Rect {
    if column.width <= 2 {
        return column;
    }

    Rect {
        x: column.x + 1,
        width: column.width - 2,
        ..column
    }
}

/// Bloc gris de chargement : pas de valeur, pas de date
fn render_placeholder_block(frame: &mut Frame, column: Rect) {
    let area = padded(column);
    let block = Block::default().style(Style::default().bg(PLACEHOLDER_COLOR));
    frame.render_widget(block, area);
}

/// Valeur en haut, barre alignée en bas, date tout en bas
fn render_bar(frame: &mut Frame, bar: &Bar, column: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Valeur
            Constraint::Min(0),    // Barre
            Constraint::Length(1), // Date
        ])
        .split(column);

    let value = Paragraph::new(Line::from(Span::styled(
        bar.units.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(value, rows[0]);

    let bar_zone = rows[1];
    let height = bar.height.min(bar_zone.height);
    if height > 0 {
        let area = Rect {
            y: bar_zone.y + bar_zone.height - height,
            height,
            ..padded(bar_zone)
        };
        frame.render_widget(Block::default().style(Style::default().bg(bar.color)), area);
    }

    let label = Paragraph::new(Line::from(Span::styled(
        bar.label.as_str(),
        Style::default().fg(Color::Gray),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(label, rows[2]);
}

// ============================================================================
// Footer
// ============================================================================

/// Heure du snapshot, prochain rafraîchissement, état, raccourcis
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::Gray));

    let line = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled(
                "Press ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[q]",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                " again to quit, any other key to cancel",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(status_spans(app))
    };

    let paragraph = Paragraph::new(line)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Morceaux de texte du footer hors confirmation de sortie
fn status_spans(app: &App) -> Vec<Span<'static>> {
    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();

    if app.is_loading_data() {
        spans.push(Span::styled("Refreshing…", Style::default().fg(Color::Cyan)));
    } else if app.snapshot.is_placeholder() && !app.snapshot.stale {
        spans.push(Span::styled("Loading…", Style::default().fg(Color::Gray)));
    } else {
        spans.push(Span::raw(format!(
            "Updated {}",
            app.snapshot.as_of.format(TIME_FORMAT)
        )));
    }

    if let Some(next) = app.next_refresh {
        spans.push(Span::raw(format!("  Next {}", next.format(TIME_FORMAT))));
    }

    if app.snapshot.stale {
        spans.push(Span::styled(
            "  ⚠ stale",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    spans.push(Span::raw("  "));
    spans.push(Span::styled("[r]", key_style));
    spans.push(Span::raw(" Refresh  "));
    spans.push(Span::styled("[q]", key_style));
    spans.push(Span::raw(" Quit"));

    spans
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Batch, DataPoint, Snapshot, Timeline};
    use chrono::{Duration, Utc};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn draw(app: &App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn text(buffer: &Buffer) -> String {
        let width = buffer.area.width as usize;
        buffer
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect::<Vec<_>>()
            .chunks(width)
            .map(|row| row.concat())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn live_app() -> App {
        let mut app = App::new(Snapshot::new(Utc::now(), Batch::placeholder(6)));
        let now = Utc::now();
        let batch = Batch::live(vec![
            DataPoint::new(1_700_000_000_000.0, 5),
            DataPoint::new(1_700_086_400_000.0, 10),
        ]);
        app.apply_timeline(Timeline::single(
            Snapshot::new(now, batch),
            now + Duration::minutes(15),
        ));
        app
    }

    #[test]
    fn test_render_live_batch() {
        let buffer = draw(&live_app(), 80, 16);
        let text = text(&buffer);

        assert!(text.contains("Units sold"));
        assert!(text.contains("Nov 14"));
        assert!(text.contains("Nov 15"));
        assert!(text.contains("10"));
        assert!(text.contains("Next"));
        assert!(buffer.content.iter().any(|cell| cell.bg == Color::Red));
        assert!(buffer.content.iter().any(|cell| cell.bg == Color::Yellow));
    }

    #[test]
    fn test_render_placeholder_has_no_labels() {
        let app = App::new(Snapshot::new(Utc::now(), Batch::placeholder(6)));
        let buffer = draw(&app, 60, 16);
        let text = text(&buffer);

        assert!(text.contains("Units sold"));
        assert!(!text.contains("Nov"));
        assert!(buffer.content.iter().any(|cell| cell.bg == PLACEHOLDER_COLOR));
        assert!(buffer.content.iter().all(|cell| cell.bg != Color::Red));
    }

    #[test]
    fn test_render_stale_marker() {
        let mut app = live_app();
        app.snapshot = app.snapshot.clone().into_stale();
        let text = text(&draw(&app, 80, 16));
        assert!(text.contains("stale"));
    }

    #[test]
    fn test_render_quit_confirmation() {
        let mut app = live_app();
        app.request_quit();
        let text = text(&draw(&app, 80, 16));
        assert!(text.contains("again to quit"));
    }

    #[test]
    fn test_render_tiny_terminal_does_not_panic() {
        draw(&live_app(), 4, 3);
        draw(&App::new(Snapshot::new(Utc::now(), Batch::live(Vec::new()))), 10, 5);
    }
}
