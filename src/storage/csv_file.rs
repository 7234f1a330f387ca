// ============================================================================
// Stockage : import / export CSV
// ============================================================================
// Lit et écrit la liste des dépenses au format CSV
//
// Format : une ligne par dépense, champs amount,date,category,
// pas de ligne d'en-tête, "\n" après chaque ligne.
//
// CONCEPTS RUST :
// 1. Generics sur io::Read / io::Write : testable sans fichier
// 2. Serde : une ligne CSV <-> CsvRow
// 3. anyhow::Context : message d'erreur avec le chemin du fichier
// ============================================================================

use std::fs::File;
use std::io;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::models::Entry;

/// Nombre de champs d'une ligne
const FIELD_COUNT: usize = 3;

/// Une ligne du fichier, telle qu'écrite sur disque
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    amount: String,
    date: String,
    category: String,
}

impl From<&Entry> for CsvRow {
    fn from(entry: &Entry) -> Self {
        Self {
            amount: entry.amount.to_string(),
            date: entry.date.clone(),
            category: entry.category.clone(),
        }
    }
}

// ============================================================================
// Rapport d'import
// ============================================================================

/// Ligne écartée pendant l'import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// Numéro de ligne dans le fichier (à partir de 1)
    pub line: u64,
    /// Raison du rejet
    pub reason: String,
}

/// Résultat d'un import : lignes acceptées (dans l'ordre) et lignes écartées
///
/// CONCEPT : Politique d'import explicite
/// - La date et la catégorie sont reprises telles quelles (non validées)
/// - Le montant doit être un nombre décimal, sinon la ligne est écartée
/// - Une ligne qui n'a pas exactement 3 champs est écartée
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub entries: Vec<Entry>,
    pub rejected: Vec<RejectedRow>,
}

impl ImportReport {
    /// Vrai si aucune ligne n'a été écartée
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

// ============================================================================
// Lecture
// ============================================================================

/// Lit des dépenses depuis n'importe quelle source CSV
///
/// Les erreurs d'I/O et d'encodage interrompent tout l'import ;
/// les lignes mal formées sont seulement écartées.
pub fn read_entries<R: io::Read>(source: R) -> Result<ImportReport> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);

    let mut report = ImportReport::default();

    for result in reader.records() {
        let record = result.context("Échec de la lecture d'une ligne CSV")?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() != FIELD_COUNT {
            warn!(line, fields = record.len(), "Rejecting CSV row with wrong field count");
            report.rejected.push(RejectedRow {
                line,
                reason: format!("expected {} fields, found {}", FIELD_COUNT, record.len()),
            });
            continue;
        }

        let row: CsvRow = match record.deserialize(None) {
            Ok(row) => row,
            Err(e) => {
                warn!(line, error = %e, "Rejecting undecodable CSV row");
                report.rejected.push(RejectedRow {
                    line,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        match Decimal::from_str(row.amount.trim()) {
            Ok(amount) => report.entries.push(Entry::new(amount, row.date, row.category)),
            Err(_) => {
                warn!(line, amount = %row.amount, "Rejecting CSV row with non-numeric amount");
                report.rejected.push(RejectedRow {
                    line,
                    reason: format!("invalid amount {:?}", row.amount),
                });
            }
        }
    }

    debug!(
        accepted = report.entries.len(),
        rejected = report.rejected.len(),
        "Finished reading CSV entries"
    );

    Ok(report)
}

/// Importe un fichier CSV
#[instrument(skip(path), fields(path = %path.display()))]
pub fn import_file(path: &Path) -> Result<ImportReport> {
    let file = File::open(path)
        .with_context(|| format!("Impossible d'ouvrir {}", path.display()))?;

    let report = read_entries(file)
        .with_context(|| format!("Fichier CSV illisible : {}", path.display()))?;

    info!(
        accepted = report.entries.len(),
        rejected = report.rejected.len(),
        "CSV file imported"
    );

    Ok(report)
}

// ============================================================================
// Écriture
// ============================================================================

/// Écrit les dépenses dans l'ordre, sans en-tête
pub fn write_entries<W: io::Write>(sink: W, entries: &[Entry]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(sink);

    for entry in entries {
        writer
            .serialize(CsvRow::from(entry))
            .context("Échec de l'écriture d'une ligne CSV")?;
    }

    writer.flush().context("Échec de l'écriture du fichier CSV")?;
    Ok(())
}

/// Exporte la liste dans un fichier CSV (écrase le fichier existant)
///
/// Retourne le nombre de lignes écrites.
#[instrument(skip(path, entries), fields(path = %path.display(), count = entries.len()))]
pub fn export_file(path: &Path, entries: &[Entry]) -> Result<usize> {
    let file = File::create(path)
        .with_context(|| format!("Impossible de créer {}", path.display()))?;

    write_entries(file, entries)
        .with_context(|| format!("Export interrompu : {}", path.display()))?;

    info!("CSV file exported");
    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entries() -> Vec<Entry> {
        vec![
            Entry::new(Decimal::new(10000, 2), "01/01/2024", "Food"),
            Entry::new(Decimal::new(45, 1), "02/30/2024", "Medical & Healthcare"),
            Entry::new(Decimal::from(1200), "03/01/2024", r"Savings\Investment"),
            Entry::new(Decimal::new(999, 2), "03/02/2024", "Fun, mostly"),
        ]
    }

    #[test]
    fn test_write_has_no_header_and_newline_per_row() {
        let mut buffer = Vec::new();
        write_entries(&mut buffer, &sample_entries()[..2]).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "100.00,01/01/2024,Food\n4.5,02/30/2024,Medical & Healthcare\n"
        );
    }

    #[test]
    fn test_write_quotes_only_when_needed() {
        let mut buffer = Vec::new();
        write_entries(&mut buffer, &sample_entries()[3..]).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "9.99,03/02/2024,\"Fun, mostly\"\n");
    }

    #[test]
    fn test_export_then_import_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("expenses.csv");
        let entries = sample_entries();

        let written = export_file(&path, &entries).unwrap();
        assert_eq!(written, entries.len());

        let report = import_file(&path).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.entries, entries);
        // L'échelle décimale est conservée ("100.00" reste "100.00")
        assert_eq!(report.entries[0].amount.to_string(), "100.00");
    }

    #[test]
    fn test_import_keeps_unvalidated_fields() {
        let data = "-5,2024-01-01,Groceries\n12.345,13/45/2024,Food\n";
        let report = read_entries(data.as_bytes()).unwrap();

        assert!(report.is_clean());
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.entries[0].amount, Decimal::from(-5));
        assert_eq!(report.entries[0].date, "2024-01-01");
        assert_eq!(report.entries[0].category, "Groceries");
        assert_eq!(report.entries[1].amount, Decimal::new(12345, 3));
    }

    #[test]
    fn test_import_rejects_malformed_rows() {
        let data = "10,01/01/2024,Food\nabc,01/02/2024,Fun\n5,01/03/2024\n7,01/04/2024,Fun,extra\n20,01/05/2024,Housing\n";
        let report = read_entries(data.as_bytes()).unwrap();

        let categories: Vec<&str> = report.entries.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(categories, vec!["Food", "Housing"]);

        let lines: Vec<u64> = report.rejected.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![2, 3, 4]);
        assert!(report.rejected[0].reason.contains("invalid amount"));
    }

    #[test]
    fn test_import_skips_blank_lines() {
        let data = "10,01/01/2024,Food\n\n20,01/02/2024,Fun\n";
        let report = read_entries(data.as_bytes()).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.entries.len(), 2);
    }

    #[test]
    fn test_import_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = import_file(&dir.path().join("missing.csv"));
        assert!(result.is_err());
    }
}
