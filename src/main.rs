//! Madani Estimation scorekeeper (default binary).
//!
//! Restores the last session, then runs a render/read-key loop until the
//! user quits. Rendering goes through the framebuffer-based renderer.

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use madani_estimation::app::{App, Flow};
use madani_estimation::config::AppConfig;
use madani_estimation::core::GameSession;
use madani_estimation::logging::init_logging;
use madani_estimation::store::SessionStore;
use madani_estimation::term::{FrameBuffer, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    if let Err(e) = init_logging(&config.log_path, config.log_level) {
        eprintln!("logging disabled: {e:#}");
    }
    log::info!("starting with {:?}", config);

    let app = if config.persist {
        let store = SessionStore::new(&config.state_path);
        App::new(store.load_or_default(), Some(store))
    } else {
        App::new(GameSession::new(), None)
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, app);

    // Always try to restore terminal state.
    let _ = term.exit();
    log::info!("exiting");
    result
}

fn run(term: &mut TerminalRenderer, mut app: App) -> Result<()> {
    let mut fb = FrameBuffer::new(0, 0);
    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        app.render_into(Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if app.handle_key(key) == Flow::Quit {
                    return Ok(());
                }
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}
