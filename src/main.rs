use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::SetTitle;
use ratatui::DefaultTerminal;

use imhotep_login::app::App;
use imhotep_login::auth::SqliteVerifier;
use imhotep_login::config::AppConfig;
use imhotep_login::telemetry;
use imhotep_login::ui::WINDOW_TITLE;

const TICK_RATE: Duration = Duration::from_millis(100);

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init(&config.log)?;

    tracing::info!(
        database = %config.database.path.display(),
        connect_timeout_secs = config.database.connect_timeout_secs,
        "starting login window"
    );

    let verifier = Arc::new(SqliteVerifier::new(&config.database));
    let mut app = App::new(config, verifier);

    let mut terminal = ratatui::try_init().context("failed to initialize terminal")?;
    if let Err(err) = execute!(stdout(), SetTitle(WINDOW_TITLE)) {
        tracing::debug!(error = %err, "terminal does not support window titles");
    }

    let result = run(&mut terminal, &mut app);
    ratatui::restore();

    match &result {
        Ok(()) => tracing::info!("login window closed"),
        Err(err) => tracing::error!(error = %err, "login window crashed"),
    }
    result
}

fn run(terminal: &mut DefaultTerminal, app: &mut App) -> anyhow::Result<()> {
    while !app.should_quit {
        app.on_tick();
        terminal.draw(|frame| app.render(frame))?;

        if !event::poll(TICK_RATE)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            app.handle_key_event(key);
        }
    }
    Ok(())
}
