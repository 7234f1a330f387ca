// ============================================================================
// Background Worker : import / export CSV hors du thread UI
// ============================================================================
// CONCEPT RUST : Command pattern avec channels
// - L'event loop envoie des IoCommand au worker
// - Le worker fait les lectures/écritures disque
// - Il renvoie des IoResult que seul le thread UI applique à l'état
// ============================================================================

use std::path::PathBuf;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use tracing::{error, info};

use crate::models::Entry;
use crate::storage::csv_file::{export_file, import_file, ImportReport};

/// Opération sur fichier demandée par l'utilisateur
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOperation {
    Import,
    Export,
}

impl FileOperation {
    /// Libellé pour l'affichage et les logs
    pub fn label(&self) -> &'static str {
        match self {
            FileOperation::Import => "Import",
            FileOperation::Export => "Export",
        }
    }
}

/// Commandes envoyées au worker thread
#[derive(Debug, Clone)]
pub enum IoCommand {
    /// Lire un fichier CSV
    Import { path: PathBuf },

    /// Écrire une copie de la liste dans un fichier CSV
    /// CONCEPT : Snapshot
    /// - Le worker reçoit sa propre copie des dépenses
    /// - L'état de l'UI n'est jamais partagé entre threads
    Export { path: PathBuf, entries: Vec<Entry> },
}

impl IoCommand {
    pub fn operation(&self) -> FileOperation {
        match self {
            IoCommand::Import { .. } => FileOperation::Import,
            IoCommand::Export { .. } => FileOperation::Export,
        }
    }
}

/// Résultats renvoyés par le worker thread
#[derive(Debug)]
pub enum IoResult {
    /// Fichier lu (les lignes écartées sont dans le rapport)
    Imported { path: PathBuf, report: ImportReport },

    /// Fichier écrit
    Exported { path: PathBuf, count: usize },

    /// Échec d'I/O : l'application continue
    Failed {
        path: PathBuf,
        operation: FileOperation,
        error: String,
    },
}

/// Exécute une commande de manière synchrone
///
/// Utilisé par le worker ; exposé pour pouvoir tester sans thread.
pub fn execute(command: IoCommand) -> IoResult {
    match command {
        IoCommand::Import { path } => match import_file(&path) {
            Ok(report) => IoResult::Imported { path, report },
            Err(e) => {
                error!(path = %path.display(), error = ?e, "CSV import failed");
                IoResult::Failed {
                    path,
                    operation: FileOperation::Import,
                    error: format!("{:#}", e),
                }
            }
        },
        IoCommand::Export { path, entries } => match export_file(&path, &entries) {
            Ok(count) => IoResult::Exported { path, count },
            Err(e) => {
                error!(path = %path.display(), error = ?e, "CSV export failed");
                IoResult::Failed {
                    path,
                    operation: FileOperation::Export,
                    error: format!("{:#}", e),
                }
            }
        },
    }
}

/// Lance le worker thread
///
/// # Arguments
/// * `command_rx` - Receiver pour recevoir les commandes
/// * `result_tx` - Sender pour envoyer les résultats
///
/// Le thread s'arrête quand le channel de commandes est fermé.
pub fn spawn_io_worker(
    command_rx: mpsc::Receiver<IoCommand>,
    result_tx: mpsc::Sender<IoResult>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(command) = command_rx.recv() {
            info!(operation = command.operation().label(), "Worker received command");

            if result_tx.send(execute(command)).is_err() {
                info!("Worker thread exiting (result channel closed)");
                return;
            }
        }

        info!("Worker thread exiting (channel closed)");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_worker_export_then_import() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let entries = vec![
            Entry::new(Decimal::new(1999, 2), "05/01/2024", "Utilities"),
            Entry::new(Decimal::from(7), "05/02/2024", "Fun"),
        ];

        let (command_tx, command_rx) = mpsc::channel();
        let (result_tx, result_rx) = mpsc::channel();
        let handle = spawn_io_worker(command_rx, result_tx);

        command_tx
            .send(IoCommand::Export { path: path.clone(), entries: entries.clone() })
            .unwrap();
        match result_rx.recv().unwrap() {
            IoResult::Exported { count, .. } => assert_eq!(count, 2),
            other => panic!("unexpected result: {other:?}"),
        }

        command_tx.send(IoCommand::Import { path: path.clone() }).unwrap();
        match result_rx.recv().unwrap() {
            IoResult::Imported { report, .. } => assert_eq!(report.entries, entries),
            other => panic!("unexpected result: {other:?}"),
        }

        drop(command_tx);
        handle.join().unwrap();
    }

    #[test]
    fn test_failed_import_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");

        match execute(IoCommand::Import { path: path.clone() }) {
            IoResult::Failed { path: failed, operation, error } => {
                assert_eq!(failed, path);
                assert_eq!(operation, FileOperation::Import);
                assert!(error.contains("nope.csv"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
