// ============================================================================
// Pie Chart - Rendu du camembert des dépenses
// ============================================================================
// Peint les parts calculées par breakdown::PieChart sur un canvas braille
//
// CONCEPTS RUST :
// 1. Trait Shape : on implémente notre propre forme pour le Canvas
// 2. Lifetimes : PieShape emprunte le PieChart le temps du rendu
// 3. f64::atan2 : angle d'un point autour du centre
//
// CONCEPTS RATATUI :
// 1. Canvas widget : dessin libre en coordonnées "monde"
// 2. Painter : convertit les coordonnées monde en points de la grille
// 3. Marker::Braille : 2x4 points par cellule
// ============================================================================

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{
        canvas::{Canvas, Circle, Painter, Shape},
        Block, Borders,
    },
    Frame,
};

use crate::app::App;
use crate::breakdown::PieChart;

/// Rayon du disque en coordonnées monde
const RADIUS: f64 = 1.0;

/// Marge autour du disque (10% du rayon)
const MARGIN: f64 = 1.1;

// ============================================================================
// Forme : disque découpé en parts
// ============================================================================

/// Disque rempli, chaque point prend la couleur de la part qui le couvre
struct PieShape<'a> {
    chart: &'a PieChart,
    radius: f64,
    /// Pas d'échantillonnage horizontal (monde)
    step_x: f64,
    /// Pas d'échantillonnage vertical (monde)
    step_y: f64,
}

impl Shape for PieShape<'_> {
    fn draw(&self, painter: &mut Painter) {
        if self.step_x <= 0.0 || self.step_y <= 0.0 {
            return;
        }

        let r2 = self.radius * self.radius;
        let mut y = -self.radius;
        while y <= self.radius {
            let mut x = -self.radius;
            while x <= self.radius {
                if x * x + y * y <= r2 {
                    // Angle anti-horaire depuis 3 heures (y vers le haut)
                    let angle = y.atan2(x).to_degrees();
                    if let (Some(rgb), Some((px, py))) =
                        (self.chart.color_at(angle), painter.get_point(x, y))
                    {
                        painter.paint(px, py, Color::from(rgb));
                    }
                }
                x += self.step_x;
            }
            y += self.step_y;
        }
    }
}

// ============================================================================
// Fonction principale de rendu
// ============================================================================

/// Dessine le camembert de la liste courante
///
/// Les bornes du canvas sont recalculées à chaque frame à partir de la
/// taille de la zone : le disque reste rond après un redimensionnement.
pub fn render_pie_chart(frame: &mut Frame, app: &App, area: Rect) {
    let chart = PieChart::from_entries(&app.entries);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" 🥧 Répartition ");

    let inner = block.inner(area);
    let (x_bounds, y_bounds) = world_bounds(inner);

    // Pas plus fin que la grille braille pour ne laisser aucun trou
    let step_x = (x_bounds[1] - x_bounds[0]) / (f64::from(inner.width.max(1)) * 2.0) / 2.0;
    let step_y = (y_bounds[1] - y_bounds[0]) / (f64::from(inner.height.max(1)) * 4.0) / 2.0;

    let shape = PieShape {
        chart: &chart,
        radius: RADIUS,
        step_x,
        step_y,
    };

    let canvas = Canvas::default()
        .block(block)
        .marker(symbols::Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            ctx.draw(&shape);
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: RADIUS,
                color: Color::Gray,
            });
        });

    frame.render_widget(canvas, area);
}

/// Bornes monde [x_min, x_max] et [y_min, y_max] pour une zone donnée
///
/// Une cellule de terminal est environ deux fois plus haute que large :
/// l'axe x est élargi de width / (2 * height) pour garder un disque rond.
fn world_bounds(area: Rect) -> ([f64; 2], [f64; 2]) {
    let half_height = RADIUS * MARGIN;
    if area.width == 0 || area.height == 0 {
        return ([-half_height, half_height], [-half_height, half_height]);
    }

    let aspect = f64::from(area.width) / (2.0 * f64::from(area.height));
    // Zone étroite : c'est la largeur qui limite le disque
    let (half_width, half_height) = if aspect >= 1.0 {
        (half_height * aspect, half_height)
    } else {
        (half_height, half_height / aspect)
    };

    ([-half_width, half_width], [-half_height, half_height])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_bounds_keep_circle_round() {
        // 80x20 cellules : aspect 2, x élargi
        let (x, y) = world_bounds(Rect::new(0, 0, 80, 20));
        assert!((x[1] - 2.2).abs() < 1e-9);
        assert!((y[1] - 1.1).abs() < 1e-9);

        // Zone haute et étroite : y élargi
        let (x, y) = world_bounds(Rect::new(0, 0, 20, 20));
        assert!((x[1] - 1.1).abs() < 1e-9);
        assert!((y[1] - 2.2).abs() < 1e-9);
    }

    #[test]
    fn test_world_bounds_on_empty_area() {
        let (x, y) = world_bounds(Rect::new(0, 0, 0, 0));
        assert_eq!(x, [-1.1, 1.1]);
        assert_eq!(y, [-1.1, 1.1]);
    }
}
