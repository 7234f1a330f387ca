// ============================================================================
// Keymap : table touche -> action
// ============================================================================
// Toutes les associations clavier sont enregistrées une seule fois au
// démarrage dans une table. L'App ne voit jamais de KeyEvent, seulement
// des Action.
//
// CONCEPTS RUST :
// 1. HashMap avec clé tuple : (KeyCode, KeyModifiers)
// 2. Enum Copy : une Action se passe par valeur
// ============================================================================

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Actions de l'application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quitter (confirmation en deux temps)
    Quit,
    /// Quitter immédiatement
    ForceQuit,
    /// Annuler le prompt ou la confirmation en cours
    Cancel,
    NextField,
    PreviousField,
    /// Ajouter la dépense, ou valider le prompt
    Submit,
    DeleteLast,
    Undo,
    Import,
    Export,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    /// Caractère saisi dans le champ actif
    Input(char),
    None,
}

/// Une ligne d'aide affichée dans le footer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHint {
    pub keys: &'static str,
    pub label: &'static str,
}

/// Table des raccourcis
pub struct Keymap {
    bindings: HashMap<(KeyCode, KeyModifiers), Action>,
}

impl Keymap {
    /// Construit la table des raccourcis par défaut
    pub fn new() -> Self {
        let ctrl = KeyModifiers::CONTROL;
        let none = KeyModifiers::NONE;

        let table = [
            ((KeyCode::Char('c'), ctrl), Action::ForceQuit),
            ((KeyCode::Char('q'), ctrl), Action::Quit),
            ((KeyCode::Char('d'), ctrl), Action::DeleteLast),
            ((KeyCode::Char('z'), ctrl), Action::Undo),
            ((KeyCode::Char('o'), ctrl), Action::Import),
            ((KeyCode::Char('s'), ctrl), Action::Export),
            ((KeyCode::Esc, none), Action::Cancel),
            ((KeyCode::Tab, none), Action::NextField),
            ((KeyCode::BackTab, none), Action::PreviousField),
            ((KeyCode::Enter, none), Action::Submit),
            ((KeyCode::Backspace, none), Action::Backspace),
            ((KeyCode::Up, none), Action::Up),
            ((KeyCode::Down, none), Action::Down),
            ((KeyCode::Left, none), Action::Left),
            ((KeyCode::Right, none), Action::Right),
        ];

        Self {
            bindings: table.into_iter().collect(),
        }
    }

    /// Traduit un événement clavier en action
    ///
    /// - Recherche exacte dans la table
    /// - Puis sans SHIFT (Shift+Tab arrive comme BackTab + SHIFT)
    /// - Sinon un caractère sans Ctrl/Alt devient Input(c)
    pub fn resolve(&self, key: KeyEvent) -> Action {
        if let Some(action) = self.bindings.get(&(key.code, key.modifiers)) {
            return *action;
        }

        let without_shift = key.modifiers.difference(KeyModifiers::SHIFT);
        if let Some(action) = self.bindings.get(&(key.code, without_shift)) {
            if !matches!(key.code, KeyCode::Char(_)) {
                return *action;
            }
        }

        match key.code {
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Action::Input(c)
            }
            _ => Action::None,
        }
    }

    /// Raccourcis affichés dans le footer
    pub fn hints() -> &'static [KeyHint] {
        &[
            KeyHint { keys: "[Tab]", label: "Field" },
            KeyHint { keys: "[Enter]", label: "Add" },
            KeyHint { keys: "[^D]", label: "Delete Last" },
            KeyHint { keys: "[^Z]", label: "Undo" },
            KeyHint { keys: "[^O]", label: "Import" },
            KeyHint { keys: "[^S]", label: "Export" },
            KeyHint { keys: "[^Q]", label: "Quit" },
        ]
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_control_chords() {
        let keymap = Keymap::new();
        assert_eq!(keymap.resolve(key(KeyCode::Char('d'), KeyModifiers::CONTROL)), Action::DeleteLast);
        assert_eq!(keymap.resolve(key(KeyCode::Char('o'), KeyModifiers::CONTROL)), Action::Import);
        assert_eq!(keymap.resolve(key(KeyCode::Char('s'), KeyModifiers::CONTROL)), Action::Export);
        assert_eq!(keymap.resolve(key(KeyCode::Char('z'), KeyModifiers::CONTROL)), Action::Undo);
        assert_eq!(keymap.resolve(key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Action::ForceQuit);
    }

    #[test]
    fn test_plain_characters_are_input() {
        let keymap = Keymap::new();
        assert_eq!(keymap.resolve(key(KeyCode::Char('d'), KeyModifiers::NONE)), Action::Input('d'));
        assert_eq!(keymap.resolve(key(KeyCode::Char('D'), KeyModifiers::SHIFT)), Action::Input('D'));
        assert_eq!(keymap.resolve(key(KeyCode::Char('/'), KeyModifiers::NONE)), Action::Input('/'));
        assert_eq!(keymap.resolve(key(KeyCode::Char('x'), KeyModifiers::ALT)), Action::None);
    }

    #[test]
    fn test_back_tab_with_shift() {
        let keymap = Keymap::new();
        assert_eq!(keymap.resolve(key(KeyCode::BackTab, KeyModifiers::SHIFT)), Action::PreviousField);
        assert_eq!(keymap.resolve(key(KeyCode::Tab, KeyModifiers::NONE)), Action::NextField);
        assert_eq!(keymap.resolve(key(KeyCode::Enter, KeyModifiers::NONE)), Action::Submit);
        assert_eq!(keymap.resolve(key(KeyCode::F(5), KeyModifiers::NONE)), Action::None);
    }
}
