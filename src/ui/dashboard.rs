// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Dessine l'interface TUI en utilisant les widgets de ratatui
//
//   ┌ header : titre, total, statut ───────────────────────────────┐
//   ├ formulaire ──────┬ camembert ─────────────────┬ légende ─────┤
//   ├ liste ───────────┤                            │              │
//   └ footer : raccourcis, confirmation ou prompt de chemin ───────┘
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Layout : découpage de l'espace en zones
// 3. List + ListState : liste avec curseur
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::{App, Focus, Screen, StatusLevel};
use crate::ui::keymap::Keymap;
use crate::ui::legend::render_legend;
use crate::ui::pie_chart::render_pie_chart;

/// Largeur de la colonne légende
const LEGEND_WIDTH: u16 = 28;

/// Dessine l'interface complète
///
/// # Arguments
/// * `frame` - Surface de dessin ratatui
/// * `app` - État de l'application (lecture seule)
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, app, chunks[0]);
    render_body(frame, app, chunks[1]);

    match app.current_screen {
        Screen::Form => render_footer(frame, app, chunks[2]),
        Screen::PathPrompt(_) => render_input_footer(frame, app, chunks[2]),
    }
}

/// Crée le layout principal (header, content, footer)
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header : 3 lignes
            Constraint::Min(0),    // Content : tout le reste
            Constraint::Length(3), // Footer : 3 lignes
        ])
        .split(area)
        .to_vec()
}

// ============================================================================
// Header : titre, total et statut
// ============================================================================

/// Dessine le header
///
/// Priorité d'affichage : chargement en cours, puis dernier statut,
/// puis résumé de la liste.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" LazyExpense ")
        .title_alignment(Alignment::Center);

    let line = if let Some(message) = app.loading_message.as_ref().filter(|_| app.is_loading) {
        Line::from(Span::styled(
            format!("⏳ {}", message),
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(status) = &app.status {
        let color = match status.level {
            StatusLevel::Info => Color::Green,
            StatusLevel::Error => Color::Red,
        };
        Line::from(Span::styled(
            status.text.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
    } else {
        // Montants importés trop grands : pas de total affichable
        let total = match app.entries.total() {
            Some(total) => Span::styled(
                format!("${}", total),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            None => Span::styled("unavailable", Style::default().fg(Color::Red)),
        };
        Line::from(vec![
            Span::raw(format!("{} entries", app.entries.len())),
            Span::raw("  |  Total: "),
            total,
        ])
    };

    let paragraph = Paragraph::new(line)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Contenu : formulaire + liste | camembert | légende
// ============================================================================

fn render_body(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Min(20),
            Constraint::Length(LEGEND_WIDTH),
        ])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(columns[0]);

    render_form(frame, app, left[0]);
    render_entries(frame, app, left[1]);
    render_pie_chart(frame, app, columns[1]);
    render_legend(frame, columns[2]);
}

/// Style du libellé d'un champ (jaune quand il a le focus)
fn label_style(app: &App, focus: Focus) -> Style {
    if app.focus == focus && app.current_screen == Screen::Form {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    }
}

/// Curseur affiché à la fin du champ actif
fn cursor(app: &App, focus: Focus) -> Span<'static> {
    if app.focus == focus && app.current_screen == Screen::Form {
        Span::styled("█", Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK))
    } else {
        Span::raw("")
    }
}

/// Dessine le formulaire (montant, date, catégorie)
fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" ✏ Nouvelle dépense ");

    // Date invalide : champ sur fond rouge
    let date_style = if app.form.date_invalid {
        Style::default().fg(Color::White).bg(Color::Red)
    } else {
        Style::default().fg(Color::White)
    };

    let category_style = if app.form.category.is_some() {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Amount:             ", label_style(app, Focus::Amount)),
            Span::raw(app.form.amount.clone()),
            cursor(app, Focus::Amount),
        ]),
        Line::from(vec![
            Span::styled("Date (MM/DD/YYYY):  ", label_style(app, Focus::Date)),
            Span::styled(app.form.date.clone(), date_style),
            cursor(app, Focus::Date),
        ]),
        Line::from(vec![
            Span::styled("Category:           ", label_style(app, Focus::Category)),
            Span::styled(format!("◀ {} ▶", app.form.category_label()), category_style),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Dessine la liste des dépenses
///
/// CONCEPT RATATUI : List + ListState
/// - ListState garde l'index sélectionné et fait défiler la liste
/// - Les lignes marquées (sélection multiple) sont préfixées par ●
fn render_entries(frame: &mut Frame, app: &App, area: Rect) {
    let border_color = if app.focus == Focus::Entries {
        Color::Yellow
    } else {
        Color::Cyan
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" 📋 Dépenses ({}) ", app.entries.len()));

    if app.entries.is_empty() {
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("Aucune dépense", Style::default().fg(Color::Gray))),
        ])
        .block(block)
        .alignment(Alignment::Center);

        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let marker = if app.marked.contains(&index) { "● " } else { "  " };
            let item = ListItem::new(format!("{}{}", marker, entry));
            if app.marked.contains(&index) {
                item.style(Style::default().bg(Color::DarkGray))
            } else {
                item
            }
        })
        .collect();

    let highlight = if app.focus == Focus::Entries {
        Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let list = List::new(items).block(block).highlight_style(highlight);
    let mut state = ListState::default().with_selected(Some(app.selected_index));

    frame.render_stateful_widget(list, area, &mut state);
}

// ============================================================================
// Footer : raccourcis ou confirmation
// ============================================================================

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let shortcuts = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled(
                "⚠  Appuyez sur ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[^Q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let spans: Vec<Span> = Keymap::hints()
            .iter()
            .flat_map(|hint| {
                [
                    Span::styled(hint.keys, key_style),
                    Span::raw(format!(" {}  ", hint.label)),
                ]
            })
            .collect();
        Line::from(spans)
    };

    let paragraph = Paragraph::new(shortcuts)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Prompt de chemin (import / export)
// ============================================================================

/// Dessine le footer en mode prompt avec la ligne de saisie
fn render_input_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" [Enter] Confirm  [ESC] Cancel ");

    let input_line = Line::from(vec![
        Span::styled(
            app.input_prompt.as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.input_buffer.as_str(), Style::default().fg(Color::White)),
        Span::styled(
            "█",
            Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK),
        ),
    ]);

    let paragraph = Paragraph::new(input_line)
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Entry;
    use ratatui::{backend::TestBackend, Terminal};
    use rust_decimal::Decimal;

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 30)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_render_empty_app() {
        let screen = draw(&App::new());
        assert!(screen.contains("LazyExpense"));
        assert!(screen.contains("Aucune dépense"));
        assert!(screen.contains("Select Category"));
        assert!(screen.contains("Miscellaneous"));
    }

    #[test]
    fn test_render_entries_and_prompt() {
        let mut app = App::with_entries(vec![Entry::new(Decimal::new(1250, 2), "04/21/2024", "Food")]);
        let screen = draw(&app);
        assert!(screen.contains("Amount: $12.50, Date: 04/21/2024, Category: Food"));

        app.begin_file_prompt(crate::storage::FileOperation::Export);
        let screen = draw(&app);
        assert!(screen.contains("Export CSV file: expenses.csv"));
    }

    #[test]
    fn test_render_survives_overflowing_imports() {
        let data = "79228162514264337593543950335,01/01/2024,Food\n\
                    79228162514264337593543950335,01/01/2024,Fun\n";
        let report = crate::storage::read_entries(data.as_bytes()).unwrap();
        assert!(report.is_clean());

        let app = App::with_entries(report.entries);
        let screen = draw(&app);
        assert!(screen.contains("Total: unavailable"));
        assert!(screen.contains("2 entries"));
    }

    #[test]
    fn test_render_mixed_sign_imports() {
        let data = "79228162514264337593543950335,01/01/2024,Food\n\
                    -79228162514264337593543950335,01/01/2024,Fun\n\
                    0.5,01/01/2024,Gifts\n";
        let report = crate::storage::read_entries(data.as_bytes()).unwrap();
        assert_eq!(report.entries.len(), 3);

        let app = App::with_entries(report.entries);
        let screen = draw(&app);
        assert!(screen.contains("Total: $0.5"));
    }
}
