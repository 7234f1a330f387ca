// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod dashboard; // Rendu de l'interface principale
pub mod events;    // Lecture des événements terminal
pub mod keymap;    // Table touche -> action
pub mod legend;    // Légende des catégories
pub mod pie_chart; // Camembert des dépenses

use ratatui::style::Color;

use crate::models::Rgb;

// Re-exports pour simplifier les imports
pub use dashboard::render;
pub use events::{Event, EventHandler};
pub use keymap::{Action, Keymap};

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }
}
