use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use cinescout_client::{ClientResult, Config, MovieService};
use cinescout_core::PreferenceRecord;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

pub mod landing;
pub mod preferences;
pub mod results;

#[cfg(test)]
mod testing;

use preferences::{PreferenceScreen, ScreenAction};
use results::{ResultsAction, ResultsScreen};

const TICK: Duration = Duration::from_millis(100);

/// Which view the TUI is currently displaying.
#[derive(Debug)]
pub enum View {
    Landing,
    Preferences(PreferenceScreen),
    Results(ResultsScreen),
}

impl View {
    fn name(&self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::Preferences(_) => "preferences",
            Self::Results(_) => "results",
        }
    }
}

/// Option lists fetched when the preferences view opens. `visit` ties a
/// result to the preferences visit that asked for it.
#[derive(Debug)]
enum CatalogEvent {
    Genres {
        visit: u64,
        result: ClientResult<Vec<String>>,
    },
    Languages {
        visit: u64,
        result: ClientResult<Vec<String>>,
    },
}

/// Root application state: the view switch plus what outlives a view.
#[derive(Debug)]
pub struct App {
    pub view: View,
    service: Arc<dyn MovieService>,
    image_base_url: String,
    min_loading: Duration,
    /// Last submitted preferences. Kept across views, never reused to
    /// prefill a new form.
    pub last_preferences: Option<PreferenceRecord>,
    visit: u64,
    catalog_tx: UnboundedSender<CatalogEvent>,
    catalog_rx: UnboundedReceiver<CatalogEvent>,
    pub should_quit: bool,
}

impl App {
    pub fn new(service: Arc<dyn MovieService>, config: &Config) -> Self {
        let (catalog_tx, catalog_rx) = mpsc::unbounded_channel();
        Self {
            view: View::Landing,
            service,
            image_base_url: config.image_base_url.clone(),
            min_loading: config.min_loading(),
            last_preferences: None,
            visit: 0,
            catalog_tx,
            catalog_rx,
            should_quit: false,
        }
    }

    /// Open a fresh preference form and fetch its option lists.
    fn open_preferences(&mut self) {
        self.visit += 1;
        let visit = self.visit;
        log::info!("Opening preferences (visit {})", visit);

        let service = Arc::clone(&self.service);
        let tx = self.catalog_tx.clone();
        tokio::spawn(async move {
            let genres = service.available_genres().await;
            if tx.send(CatalogEvent::Genres { visit, result: genres }).is_err() {
                log::debug!("App closed before genres arrived");
            }
        });

        let service = Arc::clone(&self.service);
        let tx = self.catalog_tx.clone();
        tokio::spawn(async move {
            let languages = service.available_languages().await;
            if tx.send(CatalogEvent::Languages { visit, result: languages }).is_err() {
                log::debug!("App closed before languages arrived");
            }
        });

        self.view = View::Preferences(PreferenceScreen::new());
    }

    fn open_results(&mut self, record: PreferenceRecord) {
        self.last_preferences = Some(record.clone());
        let mut screen = ResultsScreen::new(Arc::clone(&self.service), record, self.min_loading);
        screen.activate();
        self.view = View::Results(screen);
    }

    /// Apply finished background work. Called once per frame.
    pub fn tick(&mut self) {
        while let Ok(event) = self.catalog_rx.try_recv() {
            self.apply_catalog(event);
        }
        if let View::Results(screen) = &mut self.view {
            screen.activate();
            screen.pump();
        }
    }

    fn apply_catalog(&mut self, event: CatalogEvent) {
        let View::Preferences(screen) = &mut self.view else {
            return;
        };
        match event {
            CatalogEvent::Genres { visit, result } if visit == self.visit => {
                screen.set_genres(result);
            }
            CatalogEvent::Languages { visit, result } if visit == self.visit => {
                screen.set_languages(result);
            }
            _ => log::debug!("Discarding option list from an earlier visit"),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        let previous = self.view.name();
        match &mut self.view {
            View::Landing => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.open_preferences(),
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                _ => {}
            },
            View::Preferences(screen) => match screen.handle_key(key) {
                ScreenAction::None => {}
                ScreenAction::Leave => self.view = View::Landing,
                ScreenAction::Quit => self.should_quit = true,
                ScreenAction::Submit(record) => self.open_results(record),
            },
            View::Results(screen) => match screen.handle_key(key) {
                ResultsAction::None => {}
                ResultsAction::Refine => self.open_preferences(),
                ResultsAction::Home => self.view = View::Landing,
                ResultsAction::Quit => self.should_quit = true,
            },
        }
        if previous != self.view.name() {
            log::debug!("View changed: {} -> {}", previous, self.view.name());
        }
    }

    pub fn render(&self, frame: &mut Frame, now: Instant) {
        match &self.view {
            View::Landing => landing::render(frame),
            View::Preferences(screen) => preferences::render(frame, screen),
            View::Results(screen) => results::render(frame, screen, &self.image_base_url, now),
        }
    }
}

/// Draw the shared error notice along the bottom of `area`.
pub fn render_error_notice(frame: &mut Frame, area: Rect, dismiss_hint: &str) {
    let height = 3.min(area.height);
    let notice_area = Rect {
        x: area.x + 2.min(area.width),
        y: area.y + area.height.saturating_sub(height + 1),
        width: area.width.saturating_sub(4),
        height,
    };
    let notice = Paragraph::new(Line::from(vec![
        Span::raw(cinescout_client::session::ERROR_NOTICE),
        Span::styled(
            format!("  [{}]", dismiss_hint),
            Style::default().add_modifier(Modifier::UNDERLINED),
        ),
    ]))
    .style(Style::default().fg(Color::White).bg(Color::Red))
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(Clear, notice_area);
    frame.render_widget(notice, notice_area);
}

/// Run the wizard TUI.
///
/// Sets up the terminal, runs the main event loop, and restores the terminal
/// on exit (including on error). Must be called from within a tokio runtime.
pub fn run_tui(service: Arc<dyn MovieService>, config: &Config) -> Result<()> {
    let app = App::new(service, config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the event loop, capturing any error so we can restore the terminal
    let result = run_event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> Result<()> {
    loop {
        app.tick();
        let now = Instant::now();
        terminal.draw(|frame| app.render(frame, now))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testing::{key, press_all, settle, FakeService};

    fn app(service: &Arc<FakeService>) -> App {
        let service: Arc<dyn MovieService> = Arc::clone(service) as Arc<dyn MovieService>;
        let config = Config {
            min_loading_ms: 0,
            ..Config::default()
        };
        App::new(service, &config)
    }

    #[tokio::test]
    async fn test_starts_on_landing() {
        let service = Arc::new(FakeService::new());
        let app = app(&service);
        assert!(matches!(app.view, View::Landing));
        assert!(app.last_preferences.is_none());
    }

    #[tokio::test]
    async fn test_get_started_loads_option_lists() {
        let service = Arc::new(FakeService::new());
        let mut app = app(&service);

        app.handle_key(key(KeyCode::Enter));
        settle(&mut app).await;

        let View::Preferences(screen) = &app.view else {
            panic!("expected preferences view");
        };
        assert_eq!(screen.genres().len(), 3);
        assert_eq!(screen.languages().len(), 2);
        assert!(!screen.error_visible());
    }

    #[tokio::test]
    async fn test_catalog_failure_shows_notice() {
        let service = Arc::new(FakeService::failing_catalog());
        let mut app = app(&service);

        app.handle_key(key(KeyCode::Enter));
        settle(&mut app).await;

        let View::Preferences(screen) = &app.view else {
            panic!("expected preferences view");
        };
        assert_eq!(screen.genres().len(), 19);
        assert!(screen.languages().is_empty());
        assert!(screen.error_visible());
    }

    #[tokio::test]
    async fn test_full_flow_reaches_results() {
        let service = Arc::new(FakeService::new());
        let mut app = app(&service);

        app.handle_key(key(KeyCode::Enter));
        settle(&mut app).await;
        // Genre, mood, era: select first option and continue. Language
        // selection advances on its own. Notes: submit.
        press_all(
            &mut app,
            &[
                KeyCode::Char(' '),
                KeyCode::Enter,
                KeyCode::Char(' '),
                KeyCode::Enter,
                KeyCode::Char(' '),
                KeyCode::Enter,
                KeyCode::Char(' '),
                KeyCode::Enter,
            ],
        );
        settle(&mut app).await;

        let View::Results(screen) = &app.view else {
            panic!("expected results view, got {}", app.view.name());
        };
        assert_eq!(screen.session().movies().len(), 2);

        let sent = service.last_recommendation().unwrap();
        assert_eq!(sent.genres, vec!["action"]);
        assert_eq!(sent.mood, "dark");
        assert_eq!(sent.era, "silent");
        assert_eq!(sent.language, "en");
        assert_eq!(service.recommendation_calls(), 1);

        let last = app.last_preferences.as_ref().unwrap();
        assert_eq!(last.genres, vec!["Action"]);
    }

    #[tokio::test]
    async fn test_refine_starts_fresh_form() {
        let service = Arc::new(FakeService::new());
        let mut app = app(&service);
        app.open_results(testing::complete_preferences());
        settle(&mut app).await;

        app.handle_key(key(KeyCode::Char('r')));
        settle(&mut app).await;

        let View::Preferences(screen) = &app.view else {
            panic!("expected preferences view");
        };
        assert_eq!(screen.form().record(), &PreferenceRecord::new());
        assert!(app.last_preferences.is_some());
    }

    #[tokio::test]
    async fn test_go_home_keeps_last_preferences() {
        let service = Arc::new(FakeService::new());
        let mut app = app(&service);
        app.open_results(testing::complete_preferences());
        settle(&mut app).await;

        app.handle_key(key(KeyCode::Char('h')));
        assert!(matches!(app.view, View::Landing));
        assert_eq!(app.last_preferences, Some(testing::complete_preferences()));
    }

    #[tokio::test]
    async fn test_results_ticks_issue_one_request() {
        let service = Arc::new(FakeService::new());
        let mut app = app(&service);
        app.open_results(testing::complete_preferences());
        for _ in 0..5 {
            app.tick();
        }
        settle(&mut app).await;
        for _ in 0..5 {
            app.tick();
        }
        assert_eq!(service.recommendation_calls(), 1);
    }

    #[tokio::test]
    async fn test_esc_on_first_step_returns_to_landing() {
        let service = Arc::new(FakeService::new());
        let mut app = app(&service);
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Esc));
        assert!(matches!(app.view, View::Landing));
    }

    #[tokio::test]
    async fn test_stale_option_lists_are_ignored() {
        let service = Arc::new(FakeService::new());
        let mut app = app(&service);

        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Esc));
        app.handle_key(key(KeyCode::Enter));
        settle(&mut app).await;

        let View::Preferences(screen) = &app.view else {
            panic!("expected preferences view");
        };
        assert_eq!(screen.genres().len(), 3);
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_anywhere() {
        let service = Arc::new(FakeService::new());
        let mut app = app(&service);
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
