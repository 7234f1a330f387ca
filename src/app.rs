// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Ownership : l'App appartient à l'event loop, le worker n'y touche pas
//
// PATTERN : Cette structure suit le pattern "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Toutes les modifications passent par handle_action()
// - Garantit la cohérence de l'état
// ============================================================================

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::Local;
use tracing::{debug, error, info, warn};

use crate::config::Settings;
use crate::errors::EntryError;
use crate::models::{Category, Entry, EntryList};
use crate::storage::{FileOperation, IoCommand, IoResult};
use crate::ui::keymap::Action;
use crate::validation::{parse_amount, validate_amount, validate_date};

/// Format de date du formulaire
pub const DATE_FORMAT: &str = "%m/%d/%Y";

// ============================================================================
// Enums : Screen et Focus
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Un seul écran actif à la fois
// - Le compilateur force à gérer tous les cas (exhaustivité)
// ============================================================================

/// Écrans de l'application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Formulaire, liste, graphique et légende
    Form,

    /// Saisie du chemin d'un fichier CSV (remplace la boîte de dialogue)
    /// - Enter valide, ESC annule
    PathPrompt(FileOperation),
}

/// Widget qui reçoit la saisie clavier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Amount,
    Date,
    Category,
    Entries,
}

impl Focus {
    /// Widget suivant (Tab)
    pub fn next(&self) -> Self {
        match self {
            Focus::Amount => Focus::Date,
            Focus::Date => Focus::Category,
            Focus::Category => Focus::Entries,
            Focus::Entries => Focus::Amount,
        }
    }

    /// Widget précédent (Shift+Tab)
    pub fn previous(&self) -> Self {
        match self {
            Focus::Amount => Focus::Entries,
            Focus::Date => Focus::Amount,
            Focus::Category => Focus::Date,
            Focus::Entries => Focus::Category,
        }
    }
}

/// Niveau d'un message de statut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// Message affiché dans le footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

/// Contenu du formulaire de saisie
///
/// Le formulaire n'est jamais vidé : ni après un ajout, ni après une erreur.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    /// Texte du montant (toujours valide pour validate_amount)
    pub amount: String,

    /// Texte de la date (peut être invalide, voir date_invalid)
    pub date: String,

    /// Catégorie choisie (None = "Select Category")
    pub category: Option<Category>,

    /// Vrai quand la date ne respecte pas MM/DD/YYYY (champ en rouge)
    pub date_invalid: bool,
}

impl EntryForm {
    /// Libellé affiché dans le sélecteur de catégorie
    pub fn category_label(&self) -> &'static str {
        self.category
            .map(|category| category.label())
            .unwrap_or("Select Category")
    }
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Dépenses de la session
    pub entries: EntryList,

    /// Formulaire de saisie
    pub form: EntryForm,

    /// Widget actif
    pub focus: Focus,

    /// Ligne sous le curseur dans la liste des dépenses
    pub selected_index: usize,

    /// Lignes sélectionnées (sélection multiple avec Espace)
    pub marked: BTreeSet<usize>,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    /// Buffer de saisie du prompt de chemin
    pub input_buffer: String,

    /// Prompt affiché pendant la saisie du chemin
    pub input_prompt: String,

    /// Dernier message de statut (succès ou erreur)
    pub status: Option<StatusMessage>,

    /// Indique si le worker est en train de lire ou d'écrire un fichier
    pub is_loading: bool,

    /// Message de chargement optionnel
    pub loading_message: Option<String>,

    /// Indique si l'utilisateur a demandé à quitter (attend confirmation)
    /// CONCEPT : Two-step quit pour éviter les sorties accidentelles
    pub confirm_quit: bool,

    /// Chemin proposé par défaut dans le prompt d'import/export
    default_csv_path: PathBuf,
}

impl App {
    /// Crée une nouvelle instance de App avec une liste vide
    pub fn new() -> Self {
        Self {
            running: true,
            entries: EntryList::new(),
            form: EntryForm::default(),
            focus: Focus::Amount,
            selected_index: 0,
            marked: BTreeSet::new(),
            current_screen: Screen::Form,
            input_buffer: String::new(),
            input_prompt: String::new(),
            status: None,
            is_loading: false,
            loading_message: None,
            confirm_quit: false,
            default_csv_path: PathBuf::from("expenses.csv"),
        }
    }

    /// Crée une App à partir de la configuration
    ///
    /// Le champ date est pré-rempli avec la date du jour.
    pub fn with_settings(settings: &Settings) -> Self {
        let mut app = Self::new();
        app.default_csv_path = settings.default_csv_path.clone();
        app.form.date = Local::now().format(DATE_FORMAT).to_string();
        app
    }

    /// Crée une App avec une liste préchargée
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        let mut app = Self::new();
        app.entries = EntryList::from(entries);
        app
    }

    // ========================================================================
    // Cycle de vie
    // ========================================================================

    /// Quitte l'application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Vérifie si l'application doit continuer
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Demande la confirmation de quitter
    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    /// Annule la demande de quit
    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    /// Vérifie si on attend la confirmation de quit
    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    // ========================================================================
    // Messages de statut
    // ========================================================================

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            level: StatusLevel::Info,
            text: text.into(),
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            level: StatusLevel::Error,
            text: text.into(),
        });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    // ========================================================================
    // Saisie du formulaire
    // ========================================================================

    /// Tape un caractère dans le champ actif
    ///
    /// CONCEPT : Validation à la frappe
    /// - Montant : la frappe est refusée si le texte devient invalide
    /// - Date : la frappe est acceptée, le champ est marqué si invalide
    pub fn type_char(&mut self, c: char) {
        match self.focus {
            Focus::Amount => {
                let mut candidate = self.form.amount.clone();
                candidate.push(c);
                if validate_amount(&candidate) {
                    self.form.amount = candidate;
                } else {
                    debug!(rejected = %candidate, "Amount keystroke rejected");
                }
            }
            Focus::Date => {
                self.form.date.push(c);
                self.revalidate_date();
            }
            Focus::Category if c == ' ' => self.next_category(),
            Focus::Entries if c == ' ' => self.toggle_mark(),
            Focus::Category | Focus::Entries => {}
        }
    }

    /// Efface le dernier caractère du champ actif
    pub fn backspace(&mut self) {
        match self.focus {
            Focus::Amount => {
                let mut candidate = self.form.amount.clone();
                candidate.pop();
                if validate_amount(&candidate) {
                    self.form.amount = candidate;
                }
            }
            Focus::Date => {
                self.form.date.pop();
                self.revalidate_date();
            }
            Focus::Category => self.form.category = None,
            Focus::Entries => {}
        }
    }

    fn revalidate_date(&mut self) {
        self.form.date_invalid = !validate_date(&self.form.date);
    }

    pub fn next_category(&mut self) {
        self.form.category = Category::next(self.form.category);
    }

    pub fn previous_category(&mut self) {
        self.form.category = Category::previous(self.form.category);
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    // ========================================================================
    // Opérations sur la liste
    // ========================================================================

    /// Valide le formulaire et ajoute la dépense en fin de liste
    ///
    /// Ordre des vérifications : montant, date, puis champs manquants.
    /// En cas d'erreur, le formulaire n'est pas modifié (sauf le marquage
    /// de la date).
    pub fn submit_entry(&mut self) -> Result<Entry, EntryError> {
        if !validate_amount(&self.form.amount) {
            return Err(EntryError::InvalidAmount);
        }

        self.revalidate_date();
        if self.form.date_invalid {
            return Err(EntryError::InvalidDate);
        }

        let (Some(amount), Some(category)) = (parse_amount(&self.form.amount), self.form.category)
        else {
            return Err(EntryError::MissingFields);
        };

        let entry = Entry::new(amount, self.form.date.clone(), category.label());
        self.entries.push(entry.clone());
        Ok(entry)
    }

    /// Ajoute la dépense et rapporte le résultat dans le statut
    fn add_entry(&mut self) {
        match self.submit_entry() {
            Ok(entry) => {
                info!(amount = %entry.amount, date = %entry.date, category = %entry.category, "Entry added");
                self.set_info("Data saved successfully.");
            }
            Err(e) => {
                warn!(error = %e, "Entry rejected");
                self.set_error(e.to_string());
            }
        }
    }

    /// Retire la dernière dépense
    ///
    /// Liste vide : rien ne change, le statut l'indique.
    pub fn delete_last(&mut self) -> Option<Entry> {
        match self.entries.pop_last() {
            Some(entry) => {
                info!(amount = %entry.amount, category = %entry.category, "Last entry deleted");
                self.clamp_selection();
                self.set_info("Last entry deleted successfully.");
                Some(entry)
            }
            None => {
                info!("Delete requested on empty list");
                self.set_info("No entries to delete.");
                None
            }
        }
    }

    /// Annule le dernier ajout (même effet que Delete Last)
    pub fn undo(&mut self) -> Option<Entry> {
        debug!("Undo requested");
        self.delete_last()
    }

    /// Garde le curseur et la sélection dans les bornes de la liste
    fn clamp_selection(&mut self) {
        let len = self.entries.len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
        self.marked.retain(|index| *index < len);
    }

    // ========================================================================
    // Navigation dans la liste
    // ========================================================================

    /// Navigue vers le haut
    pub fn navigate_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Navigue vers le bas (saturating_sub gère la liste vide)
    pub fn navigate_down(&mut self) {
        let max_index = self.entries.len().saturating_sub(1);
        self.selected_index = (self.selected_index + 1).min(max_index);
    }

    /// Ajoute ou retire la ligne courante de la sélection
    pub fn toggle_mark(&mut self) {
        if self.selected_index >= self.entries.len() {
            return;
        }
        if !self.marked.remove(&self.selected_index) {
            self.marked.insert(self.selected_index);
        }
    }

    // ========================================================================
    // Import / Export
    // ========================================================================

    /// Ouvre le prompt de chemin pour un import ou un export
    pub fn begin_file_prompt(&mut self, operation: FileOperation) {
        if self.is_loading {
            self.set_error("A file operation is already in progress.");
            return;
        }
        self.current_screen = Screen::PathPrompt(operation);
        self.input_prompt = format!("{} CSV file: ", operation.label());
        self.input_buffer = self.default_csv_path.display().to_string();
    }

    /// Annule le prompt et retourne au formulaire
    pub fn cancel_input(&mut self) {
        self.current_screen = Screen::Form;
        self.input_buffer.clear();
        self.input_prompt.clear();
    }

    /// Valide le chemin saisi et prépare la commande pour le worker
    pub fn submit_input(&mut self) -> Option<IoCommand> {
        let Screen::PathPrompt(operation) = self.current_screen else {
            return None;
        };

        let path = self.input_buffer.trim().to_string();
        self.cancel_input();

        if path.is_empty() {
            debug!("Empty path, ignoring");
            self.set_error("No file selected.");
            return None;
        }

        let path = PathBuf::from(path);
        info!(operation = operation.label(), path = %path.display(), "File operation requested");
        self.start_loading(Some(format!("{} {}...", operation.label(), path.display())));

        Some(match operation {
            FileOperation::Import => IoCommand::Import { path },
            FileOperation::Export => IoCommand::Export {
                path,
                entries: self.entries.snapshot(),
            },
        })
    }

    /// Démarre le chargement avec un message optionnel
    pub fn start_loading(&mut self, message: Option<String>) {
        self.is_loading = true;
        self.loading_message = message;
    }

    /// Termine le chargement
    pub fn stop_loading(&mut self) {
        self.is_loading = false;
        self.loading_message = None;
    }

    /// Applique le résultat d'une opération du worker
    ///
    /// Appelé uniquement depuis le thread de l'event loop.
    pub fn apply_io_result(&mut self, result: IoResult) {
        self.stop_loading();

        match result {
            IoResult::Imported { path, report } => {
                let accepted = report.entries.len();
                self.entries.extend(report.entries);
                if self.entries.total().is_none() {
                    warn!(path = %path.display(), "Imported amounts overflow the list total, chart falls back to a full circle");
                }

                match report.rejected.first() {
                    None => {
                        info!(path = %path.display(), accepted, "Entries imported");
                        self.set_info(format!("CSV file imported successfully. ({} entries)", accepted));
                    }
                    Some(first) => {
                        warn!(path = %path.display(), accepted, rejected = report.rejected.len(), "Entries imported with skipped rows");
                        self.set_error(format!(
                            "Imported {} entries, skipped {} malformed rows (line {}: {})",
                            accepted,
                            report.rejected.len(),
                            first.line,
                            first.reason
                        ));
                    }
                }
            }
            IoResult::Exported { path, count } => {
                info!(path = %path.display(), count, "Entries exported");
                self.set_info(format!("Data exported successfully. ({} entries to {})", count, path.display()));
            }
            IoResult::Failed { path, operation, error } => {
                error!(path = %path.display(), operation = operation.label(), error = %error, "File operation failed");
                self.set_error(format!("{} failed: {}", operation.label(), error));
            }
        }
    }

    // ========================================================================
    // Dispatch des actions
    // ========================================================================

    /// Applique une action à l'état
    ///
    /// CONCEPT : Table d'actions
    /// - Le Keymap traduit les touches en Action une fois pour toutes
    /// - Cette fonction est le seul point d'entrée des modifications
    /// - Retourne une commande à envoyer au worker si besoin
    pub fn handle_action(&mut self, action: Action) -> Option<IoCommand> {
        if action == Action::ForceQuit {
            info!("User forced quit");
            self.quit();
            return None;
        }

        if let Screen::PathPrompt(_) = self.current_screen {
            return self.handle_prompt_action(action);
        }

        if action == Action::Quit {
            if self.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                self.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                self.request_quit();
            }
            return None;
        }

        // Toute autre touche annule la confirmation de quit
        if action != Action::None {
            self.cancel_quit();
        }

        match action {
            Action::Submit => self.add_entry(),
            Action::DeleteLast => {
                self.delete_last();
            }
            Action::Undo => {
                self.undo();
            }
            Action::Import => self.begin_file_prompt(FileOperation::Import),
            Action::Export => self.begin_file_prompt(FileOperation::Export),
            Action::Cancel => self.clear_status(),
            Action::NextField => self.focus_next(),
            Action::PreviousField => self.focus_previous(),
            Action::Backspace => self.backspace(),
            Action::Input(c) => self.type_char(c),
            Action::Up | Action::Left if self.focus == Focus::Category => self.previous_category(),
            Action::Down | Action::Right if self.focus == Focus::Category => self.next_category(),
            Action::Up if self.focus == Focus::Entries => self.navigate_up(),
            Action::Down if self.focus == Focus::Entries => self.navigate_down(),
            _ => {}
        }

        None
    }

    /// Actions pendant la saisie d'un chemin
    fn handle_prompt_action(&mut self, action: Action) -> Option<IoCommand> {
        match action {
            Action::Cancel => {
                info!("User cancelled file prompt");
                self.cancel_input();
                None
            }
            Action::Submit => self.submit_input(),
            Action::Backspace => {
                self.input_buffer.pop();
                None
            }
            Action::Input(c) => {
                self.input_buffer.push(c);
                None
            }
            _ => None,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
