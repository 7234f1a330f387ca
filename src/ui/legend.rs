// ============================================================================
// Légende du camembert
// ============================================================================
// Une ligne par catégorie de la table de couleurs, que la catégorie ait
// des dépenses ou non
// ============================================================================

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::breakdown::{legend, LegendRow};

/// Pavé de couleur devant chaque libellé
const SWATCH: &str = "██";

/// Dessine la légende
pub fn render_legend(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Légende ");

    let lines: Vec<Line> = legend().iter().map(legend_line).collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn legend_line(row: &LegendRow) -> Line<'static> {
    Line::from(vec![
        Span::styled(SWATCH, Style::default().fg(Color::from(row.color))),
        Span::raw(" "),
        Span::raw(row.label),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn test_legend_line_uses_table_color() {
        let row = LegendRow {
            label: "Food",
            color: Category::Food.color().unwrap(),
        };
        let line = legend_line(&row);

        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[0].style.fg, Some(Color::Rgb(0x99, 0xff, 0x99)));
        assert_eq!(line.spans[2].content, "Food");
    }
}
