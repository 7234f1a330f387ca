// ============================================================================
// Configuration de l'application
// ============================================================================
// Emplacements par défaut : logs et fichier CSV proposé à l'import/export
//
// Les logs vont dans le répertoire de données de la plateforme :
// - Linux/WSL : ~/.local/share/lazyexpense/logs/lazyexpense.log
// - macOS : ~/Library/Application Support/lazyexpense/logs/lazyexpense.log
// - Windows : C:\Users\<user>\AppData\Local\lazyexpense\logs\lazyexpense.log
// ============================================================================

use std::path::PathBuf;

/// Nom de l'application (répertoire de données)
pub const APP_NAME: &str = "lazyexpense";

/// Paramètres de l'application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Répertoire des fichiers de log
    pub log_dir: PathBuf,

    /// Préfixe des fichiers de log (rotation quotidienne)
    pub log_file_name: String,

    /// Filtre utilisé quand RUST_LOG n'est pas défini
    pub default_log_filter: String,

    /// Chemin proposé dans le prompt d'import/export
    pub default_csv_path: PathBuf,
}

impl Settings {
    /// Paramètres par défaut pour la plateforme courante
    ///
    /// Sans répertoire de données connu, les logs vont dans ./logs
    pub fn load() -> Self {
        let log_dir = dirs::data_local_dir()
            .map(|dir| dir.join(APP_NAME).join("logs"))
            .unwrap_or_else(|| PathBuf::from("./logs"));

        Self::with_log_dir(log_dir)
    }

    /// Paramètres par défaut avec un répertoire de logs donné
    pub fn with_log_dir(log_dir: PathBuf) -> Self {
        Self {
            log_dir,
            log_file_name: format!("{}.log", APP_NAME),
            default_log_filter: format!("{}=debug,info", APP_NAME),
            default_csv_path: PathBuf::from("expenses.csv"),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::with_log_dir(PathBuf::from("/tmp/logs"));
        assert_eq!(settings.log_file_name, "lazyexpense.log");
        assert_eq!(settings.default_log_filter, "lazyexpense=debug,info");
        assert_eq!(settings.default_csv_path, PathBuf::from("expenses.csv"));
    }

    #[test]
    fn test_log_dir_is_app_scoped() {
        let settings = Settings::load();
        assert!(settings.log_dir.ends_with("logs"));
    }
}
