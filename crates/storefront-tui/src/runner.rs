// TUI event loop and terminal management
use crate::{App, Effect};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use storefront_core::{Action, CatalogService, Debouncer, FilterAction};
use tokio::sync::mpsc;
use tracing::debug;

// How long to wait for a key before checking the channels again
const TICK: Duration = Duration::from_millis(50);

pub async fn run_tui(mut app: App, service: CatalogService, debounce: Duration) -> anyhow::Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let mut debouncer = Debouncer::<String>::new(debounce);

    // Kick off the initial fetches before the first frame
    service.spawn_products(&mut app.store, action_tx.clone());
    service.spawn_categories(&mut app.store, action_tx.clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(
        &mut terminal,
        &mut app,
        &service,
        &mut debouncer,
        &action_tx,
        &mut action_rx,
    )
    .await;

    // Restore terminal even if the loop bailed out
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    service: &CatalogService,
    debouncer: &mut Debouncer<String>,
    action_tx: &mpsc::UnboundedSender<Action>,
    action_rx: &mut mpsc::UnboundedReceiver<Action>,
) -> anyhow::Result<()> {
    loop {
        // Completed fetches
        while let Ok(action) = action_rx.try_recv() {
            app.apply(action);
        }

        commit_searches(app, debouncer);

        terminal.draw(|f| crate::ui::render(f, app))?;

        if !event::poll(TICK)? {
            // Let spawned fetches and the debounce timer make progress
            tokio::task::yield_now().await;
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            let effect = app.handle_key(key);
            forward_search(&effect, debouncer);
            match effect {
                Effect::None | Effect::Search(_) | Effect::CancelSearch => {}
                Effect::Quit => break,
                Effect::FetchProduct(id) => {
                    service.spawn_product(&mut app.store, id, action_tx.clone());
                }
                Effect::ReloadProducts => {
                    service.spawn_products(&mut app.store, action_tx.clone());
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Apply search text that sat still long enough
fn commit_searches(app: &mut App, debouncer: &mut Debouncer<String>) {
    while let Some(query) = debouncer.try_recv() {
        debug!("Committing search query {:?}", query);
        app.apply(FilterAction::SetSearchQuery(query));
    }
}

/// Route the search side of a key's effect to the debouncer
fn forward_search(effect: &Effect, debouncer: &mut Debouncer<String>) {
    match effect {
        Effect::Search(text) => debouncer.push(text.clone()),
        Effect::CancelSearch => debouncer.cancel(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use storefront_core::{CatalogAction, Product};
    use tokio::time::sleep;

    const DELAY: Duration = Duration::from_millis(300);

    fn product(id: u64, title: &str) -> Product {
        Product {
            id,
            title: title.to_string(),
            price: 10.0,
            category: "electronics".to_string(),
            image: String::new(),
            description: String::new(),
            rating: None,
        }
    }

    fn loaded_app() -> App {
        let mut app = App::new();
        app.apply(CatalogAction::ProductsLoaded(Ok(vec![
            product(1, "Laptop"),
            product(2, "Phone"),
        ])));
        app
    }

    fn press(app: &mut App, debouncer: &mut Debouncer<String>, code: KeyCode) {
        let effect = app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
        forward_search(&effect, debouncer);
    }

    fn type_text(app: &mut App, debouncer: &mut Debouncer<String>, text: &str) {
        for c in text.chars() {
            press(app, debouncer, KeyCode::Char(c));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_quiet_search_is_committed() {
        let mut app = loaded_app();
        let mut debouncer = Debouncer::new(DELAY);

        press(&mut app, &mut debouncer, KeyCode::Char('/'));
        type_text(&mut app, &mut debouncer, "lap");
        commit_searches(&mut app, &mut debouncer);
        assert_eq!(app.store.filters().search_query(), "");

        sleep(DELAY + Duration::from_millis(10)).await;
        commit_searches(&mut app, &mut debouncer);
        assert_eq!(app.store.filters().search_query(), "lap");
        assert_eq!(app.store.visible_products().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_wins_over_search_that_fired_before_it() {
        let mut app = loaded_app();
        let mut debouncer = Debouncer::new(DELAY);

        press(&mut app, &mut debouncer, KeyCode::Char('/'));
        type_text(&mut app, &mut debouncer, "zz");
        press(&mut app, &mut debouncer, KeyCode::Esc);

        // Timer fires while the loop is still waiting on the next key
        sleep(DELAY + Duration::from_millis(10)).await;
        press(&mut app, &mut debouncer, KeyCode::Char('x'));
        commit_searches(&mut app, &mut debouncer);

        assert_eq!(app.search_input, "");
        assert_eq!(app.store.filters().search_query(), "");
        assert_eq!(app.store.visible_products().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_then_late_timer_keeps_entered_query() {
        let mut app = loaded_app();
        let mut debouncer = Debouncer::new(DELAY);

        press(&mut app, &mut debouncer, KeyCode::Char('/'));
        type_text(&mut app, &mut debouncer, "pho");
        press(&mut app, &mut debouncer, KeyCode::Enter);

        sleep(DELAY * 2).await;
        commit_searches(&mut app, &mut debouncer);
        assert_eq!(app.store.filters().search_query(), "pho");
        assert_eq!(app.store.visible_products().len(), 1);
    }
}
