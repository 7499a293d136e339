//! movieDB terminal browser
//!
//! ```sh
//! TMDB_API_KEY=... cargo run -p moviedb
//!
//! # drop superseded search responses, log to a file
//! cargo run -p moviedb -- --stale-guard --log-file moviedb.log
//! ```

use std::io;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use moviedb::config::Args;
use moviedb::controller::ViewController;
use moviedb::logging;
use moviedb::runtime::Runtime;
use moviedb::state::ViewState;
use moviedb::store::{view_store, TracingMiddleware};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.log_file.as_deref())?;

    let client = args.client().context("failed to build TMDB client")?;
    tracing::info!(
        base_url = %client.base_url(),
        stale_policy = ?args.stale_policy(),
        "starting"
    );

    let store = view_store(
        ViewState::new(args.stale_policy()),
        TracingMiddleware::default(),
    );
    let mut controller = ViewController::with_store(store, client);
    controller.initialize();
    let mut runtime = Runtime::new(controller, args.tick_interval());

    // ===== Terminal setup =====
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        let _ = disable_raw_mode();
        return Err(e).context("failed to enter alternate screen");
    }
    let mut terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            return Err(e).context("failed to create terminal");
        }
    };

    let result = runtime.run(&mut terminal).await;

    // ===== Cleanup =====
    let restored = restore(&mut terminal);
    result.context("event loop failed")?;
    restored.context("failed to restore terminal")?;
    Ok(())
}

fn restore(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()
}
