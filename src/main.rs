// spojen: client/backend integration walkthrough in the terminal

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use spojen::backend::Backend;
use spojen::config::Config;
use spojen::logging;
use spojen::ui::App;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().skip(1).any(|a| a == "-h" || a == "--help") {
        let program_name = args.first().map(|s| s.as_str()).unwrap_or("spojen");
        eprintln!("Usage: {} [config.toml]", program_name);
        eprintln!();
        eprintln!("Without an argument, spojen.toml in the working directory is read if present.");
        eprintln!("FIREBASE_* and SPOJEN_LOG environment variables override the file.");
        return Ok(());
    }

    let config_path = args.get(1).map(PathBuf::from);
    let config = Config::load(config_path.as_deref()).context("Failed to load configuration")?;

    match logging::init(&config.log) {
        Ok(Some(path)) => eprintln!("Logging to {}", path.display()),
        Ok(None) => {}
        Err(e) => eprintln!("Warning: logging disabled: {}", e),
    }

    let backend = Backend::connect(&config);
    if let Some(reason) = backend.setup_reason() {
        eprintln!("Setup required: {}", reason);
    }

    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(terminal_backend)?;

    let mut app = App::new(backend);
    let res = app.run(&mut terminal);
    drop(app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("Terminal UI failed")?;
    log::info!("Exited cleanly");
    Ok(())
}
