pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{AppContext, Result};
use crate::pipeline::{self, ViewKind};

use self::app::{TuiApp, PAGE_SIZE};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let mut tui_app = TuiApp::new();
    let event_handler = EventHandler::new(ctx.config.ui.tick_rate());

    loop {
        if tui_app.needs_load() {
            let view = tui_app.active_view;
            load_view(terminal, &mut tui_app, &ctx, view).await?;
        }

        terminal.draw(|frame| layout::render(frame, &tui_app))?;

        match event_handler.next()? {
            AppEvent::Key(key) => match Action::from(key) {
                Action::Quit => {
                    tui_app.should_quit = true;
                }
                Action::ScrollUp => {
                    tui_app.scroll_up(1);
                }
                Action::ScrollDown => {
                    tui_app.scroll_down(1);
                }
                Action::PrevPage => {
                    tui_app.scroll_up(PAGE_SIZE);
                }
                Action::NextPage => {
                    tui_app.scroll_down(PAGE_SIZE);
                }
                Action::NextView => {
                    tui_app.next_view();
                }
                Action::PrevView => {
                    tui_app.prev_view();
                }
                Action::Show(view) => {
                    tui_app.show(view);
                }
                Action::Refresh => {
                    let view = tui_app.active_view;
                    load_view(terminal, &mut tui_app, &ctx, view).await?;
                }
                Action::None => {}
            },
            AppEvent::Tick => {}
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Run a view's pipeline to completion. Input is not read while it runs, so
/// refreshes never overlap.
async fn load_view(
    terminal: &mut Tui,
    tui_app: &mut TuiApp,
    ctx: &AppContext,
    view: ViewKind,
) -> Result<()> {
    tui_app.begin_load(view);
    terminal.draw(|frame| layout::render(frame, &*tui_app))?;

    let result = pipeline::run(view, ctx.source.clone()).await;
    if let Err(ref e) = result {
        tracing::info!("{} did not load: {}", view, e);
    }
    tui_app.finish_load(view, result);
    Ok(())
}
