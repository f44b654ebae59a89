// Terminal lifecycle and key loop
use crate::application::fault_service::FaultService;
use crate::application::SharedState;
use crate::presentation::ui;
use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Duration;

/// Repaint cadence of the terminal, independent of the poll cadence.
const FRAME_TIMEOUT: Duration = Duration::from_millis(100);

/// Restores the terminal even when the draw loop panics.
struct TerminalRestore;

impl Drop for TerminalRestore {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Put the terminal into raw alternate-screen mode and run the dashboard
/// until a quit key. Returns with the terminal restored.
pub async fn run(state: SharedState, faults: FaultService) -> anyhow::Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let _restore = TerminalRestore;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    run_loop(&mut terminal, state, faults).await
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: SharedState,
    faults: FaultService,
) -> anyhow::Result<()> {
    loop {
        {
            let snapshot = state.lock().await;
            terminal.draw(|f| ui::draw(f, &snapshot))?;
        }

        if event::poll(FRAME_TIMEOUT)? {
            if let Event::Key(key) = event::read()? {
                // Ignore repeat/release events.
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('e') => spawn_toggle(&faults, true),
                    KeyCode::Char('d') => spawn_toggle(&faults, false),
                    _ => {}
                }
            }
        }
    }
}

/// Fire-and-forget: the toggle publishes its outcome through the shared
/// state, so the key loop never waits on the network.
fn spawn_toggle(faults: &FaultService, enabled: bool) {
    let faults = faults.clone();
    tokio::spawn(async move {
        faults.set_fault(enabled).await;
    });
}
