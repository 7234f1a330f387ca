// ============================================================================
// LazyExpense - Suivi des dépenses dans le terminal
// ============================================================================
// Formulaire de saisie, liste des dépenses, camembert par catégorie
// Import / export CSV dans un worker thread
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle infinie qui gère événements et rendering
// 3. Channels : l'UI et le worker ne partagent aucun état
// ============================================================================

use std::io;
use std::sync::mpsc;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use lazyexpense::app::App;
use lazyexpense::config::Settings;
use lazyexpense::storage::{spawn_io_worker, IoCommand, IoResult};
use lazyexpense::ui::{render, Event, EventHandler, Keymap};

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier à la place
// - Rotation quotidienne automatique des logs
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// # Utilisation
/// ```bash
/// # Voir les logs en temps réel
/// tail -f ~/.local/share/lazyexpense/logs/lazyexpense.log
///
/// # Contrôler le niveau de log
/// RUST_LOG=lazyexpense=trace cargo run
/// ```
fn init_logging(settings: &Settings) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    std::fs::create_dir_all(&settings.log_dir)
        .context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(
        Rotation::DAILY,
        settings.log_dir.clone(),
        settings.log_file_name.as_str(),
    );

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true)
                .with_thread_ids(true) // Distingue l'UI du worker
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.default_log_filter.as_str().into()),
        )
        .try_init()
        .context("Échec de l'initialisation du subscriber")?;

    info!(log_dir = %settings.log_dir.display(), "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    let settings = Settings::load();

    // Si init échoue, on affiche l'erreur et continue quand même
    init_logging(&settings).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {:#}", e);
        eprintln!("   Continuing without logging...");
    });

    info!("LazyExpense starting up");

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    // L'App appartient à l'event loop : pas d'Arc<Mutex<>>
    let mut app = App::with_settings(&settings);
    let keymap = Keymap::new();

    // CONCEPT RUST : mpsc channels
    // - command_tx/rx : l'event loop envoie les commandes au worker
    // - result_tx/rx : le worker renvoie les résultats
    let (command_tx, command_rx) = mpsc::channel::<IoCommand>();
    let (result_tx, result_rx) = mpsc::channel::<IoResult>();

    info!("Spawning background worker thread");
    let worker = spawn_io_worker(command_rx, result_tx);

    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &keymap, &events, &command_tx, &result_rx);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    // Ferme le channel : le worker termine l'opération en cours puis s'arrête
    drop(command_tx);
    if worker.join().is_err() {
        error!("Worker thread panicked");
    }

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// À chaque itération :
//   0. Appliquer les résultats du worker
//   1. Dessiner l'interface
//   2. Traduire l'événement en Action et l'appliquer
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    keymap: &Keymap,
    events: &EventHandler,
    command_tx: &mpsc::Sender<IoCommand>,
    result_rx: &mpsc::Receiver<IoResult>,
) -> Result<()> {
    while app.is_running() {
        // ========================================
        // 0. RÉSULTATS : Traite les résultats du worker
        // ========================================
        // CONCEPT : Non-blocking receive avec try_recv
        loop {
            match result_rx.try_recv() {
                Ok(result) => app.apply_io_result(result),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    if app.is_loading {
                        error!("Worker thread disconnected!");
                        app.stop_loading();
                        app.set_error("File worker stopped unexpectedly.");
                    }
                    break;
                }
            }
        }

        // ========================================
        // 1. RENDER : Dessine l'interface
        // ========================================
        terminal.draw(|frame| render(frame, &*app))?;

        // ========================================
        // 2. INPUT : Traite les événements
        // ========================================
        match events.next() {
            Ok(Event::Key(key)) => {
                let action = keymap.resolve(key);
                debug!(?action, "Key resolved");

                if let Some(command) = app.handle_action(action) {
                    if let Err(e) = command_tx.send(command) {
                        error!(error = %e, "Failed to send command to worker");
                        app.stop_loading();
                        app.set_error("File worker is not running.");
                    }
                }
            }
            Ok(Event::Resize(width, height)) => {
                // Le rendu suivant recalcule le layout
                debug!(width, height, "Terminal resized");
            }
            Ok(Event::Tick) => {}
            Err(e) => {
                error!(error = ?e, "Failed to read terminal event");
            }
        }
    }

    Ok(())
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================
// IMPORTANT : Toujours restaurer le terminal avant de quitter !
// ============================================================================

/// Configure le terminal en mode TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    // Alternate screen : l'écran précédent est restauré en sortie
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    terminal.show_cursor()?;

    Ok(())
}
