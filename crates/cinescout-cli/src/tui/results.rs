use std::sync::Arc;
use std::time::{Duration, Instant};

use cinescout_client::{MovieService, ResultsSession, SummaryState};
use cinescout_core::catalog::find_era;
use cinescout_core::model::language::display_name;
use cinescout_core::{Movie, PreferenceRecord};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

/// What the root page should do after a key press on the results view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsAction {
    None,
    Refine,
    Home,
    Quit,
}

/// The results view: a [`ResultsSession`] plus the highlighted card.
#[derive(Debug)]
pub struct ResultsScreen {
    session: ResultsSession,
    selected: usize,
}

impl ResultsScreen {
    pub fn new(
        service: Arc<dyn MovieService>,
        preferences: PreferenceRecord,
        min_loading: Duration,
    ) -> Self {
        Self {
            session: ResultsSession::new(service, preferences, min_loading),
            selected: 0,
        }
    }

    pub fn session(&self) -> &ResultsSession {
        &self.session
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn activate(&mut self) -> bool {
        self.session.activate()
    }

    pub fn pump(&mut self) -> bool {
        let changed = self.session.pump();
        let count = self.session.movies().len();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
        changed
    }

    fn toggle_description(&mut self) {
        let Some(movie) = self.session.movies().get(self.selected) else {
            return;
        };
        if self.session.is_expanded(movie) {
            self.session.collapse();
        } else {
            self.session.describe(self.selected);
        }
    }

    /// Card keys are ignored while the loading panel is up.
    pub fn handle_key(&mut self, key: KeyEvent) -> ResultsAction {
        match key.code {
            KeyCode::Char('q') => return ResultsAction::Quit,
            KeyCode::Char('r') => return ResultsAction::Refine,
            KeyCode::Char('h') => return ResultsAction::Home,
            KeyCode::Char('x') => self.session.dismiss_error(),
            _ if self.session.is_loading(Instant::now()) => {}
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected + 1 < self.session.movies().len() {
                    self.selected += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char('d') => self.toggle_description(),
            KeyCode::Char('c') | KeyCode::Esc => self.session.collapse(),
            _ => {}
        }
        ResultsAction::None
    }
}

/// Render the results view.
pub fn render(frame: &mut Frame, screen: &ResultsScreen, image_base_url: &str, now: Instant) {
    let area = frame.area();
    let session = screen.session();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Header
            Constraint::Min(6),    // Cards
            Constraint::Length(1), // Help
        ])
        .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "Your Perfect Matches",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Based on your preferences, we think you'll love these films",
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            preference_summary(session.preferences()),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    if session.is_loading(now) {
        render_loading(frame, session.loading_message(now), chunks[1]);
    } else if session.movies().is_empty() {
        let empty = Paragraph::new(
            "No movies to show. Press r to refine your selection or h to go home.",
        )
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, chunks[1]);
    } else {
        render_cards(frame, screen, image_base_url, chunks[1]);
    }

    let help = Paragraph::new(
        "  \u{2191}/k Up  \u{2193}/j Down  Enter AI introduction  c Collapse  r Refine Selection  h Go Home  q Quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[2]);

    if session.error_visible() {
        super::render_error_notice(frame, area, "x Close");
    }
}

/// One-line recap of the submitted preferences, e.g.
/// `Drama, Romance · Romantic · Golden Age · English`.
fn preference_summary(record: &PreferenceRecord) -> String {
    let era = find_era(&record.era).map_or(record.era.as_str(), |era| era.name);
    let language = display_name(&record.language).unwrap_or(record.language.as_str());
    let mut parts = vec![record.genres.join(", "), record.mood.clone(), era.to_string()];
    parts.push(language.to_string());
    if !record.additional_notes.is_empty() {
        parts.push(format!("\"{}\"", record.additional_notes));
    }
    parts.join(" \u{b7} ")
}

fn render_loading(frame: &mut Frame, message: &str, area: Rect) {
    let loading = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Curating Movies",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(loading, area);
}

fn card(movie: &Movie) -> ListItem<'static> {
    ListItem::new(vec![
        Line::from(Span::styled(
            movie.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                format!("  {}", movie.year_label()),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(
                format!("  \u{2605} {}", movie.rating_label()),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(
                format!("  {} match", movie.confidence_label()),
                Style::default().fg(Color::Green),
            ),
        ]),
    ])
}

fn render_cards(frame: &mut Frame, screen: &ResultsScreen, image_base_url: &str, area: Rect) {
    let session = screen.session();
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let items: Vec<ListItem<'static>> = session.movies().iter().map(card).collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Recommendations"))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("\u{25B6} ");
    let mut state = ListState::default().with_selected(Some(screen.selected()));
    frame.render_stateful_widget(list, panes[0], &mut state);

    let Some(movie) = session.movies().get(screen.selected()) else {
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            movie.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(movie.year_label()),
    ];
    if let Some(genre) = &movie.genre {
        lines.push(Line::from(Span::styled(
            genre.clone(),
            Style::default().fg(Color::Gray),
        )));
    }
    if let Some(url) = movie.poster_url(image_base_url) {
        lines.push(Line::from(Span::styled(
            format!("Poster: {}", url),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));

    match session.summary_for(movie) {
        None => lines.push(Line::from(Span::styled(
            "Press Enter for an AI introduction to this film.",
            Style::default().fg(Color::DarkGray),
        ))),
        Some(state) => {
            lines.push(Line::from(Span::styled(
                "AI Introduction",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )));
            match state {
                SummaryState::Generating => lines.push(Line::from(Span::styled(
                    "Generating...",
                    Style::default().fg(Color::Gray),
                ))),
                SummaryState::Unavailable => lines.push(Line::from(Span::styled(
                    "No introduction available.",
                    Style::default().fg(Color::Gray),
                ))),
                SummaryState::Ready(description) => {
                    lines.push(Line::from(description.summary.clone()));
                    if !description.themes().is_empty() {
                        lines.push(Line::from(""));
                        lines.push(Line::from(Span::styled(
                            "Key Themes",
                            Style::default().add_modifier(Modifier::BOLD),
                        )));
                        lines.push(Line::from(description.themes().join("  \u{2022}  ")));
                    }
                }
            }
        }
    }

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(detail, panes[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::testing::{complete_preferences, key, render_to_text, FakeService};

    fn screen(service: FakeService, min_loading: Duration) -> ResultsScreen {
        let service: Arc<dyn MovieService> = Arc::new(service);
        ResultsScreen::new(service, complete_preferences(), min_loading)
    }

    async fn settle(screen: &mut ResultsScreen) {
        for _ in 0..10 {
            tokio::time::sleep(Duration::from_millis(5)).await;
            screen.pump();
        }
    }

    async fn loaded() -> ResultsScreen {
        let mut screen = screen(FakeService::new(), Duration::ZERO);
        screen.activate();
        settle(&mut screen).await;
        screen
    }

    #[tokio::test]
    async fn test_enter_expands_and_collapses_card() {
        let mut screen = loaded().await;
        screen.handle_key(key(KeyCode::Down));
        screen.handle_key(key(KeyCode::Enter));
        let movie = screen.session().movies()[1].clone();
        assert!(screen.session().is_expanded(&movie));

        settle(&mut screen).await;
        match screen.session().summary_for(&movie) {
            Some(SummaryState::Ready(description)) => {
                assert_eq!(description.summary, "Sunset Boulevard is a story about hope.");
            }
            other => panic!("expected ready summary, got {other:?}"),
        }

        screen.handle_key(key(KeyCode::Enter));
        assert!(screen.session().expanded_id().is_none());
    }

    #[tokio::test]
    async fn test_selection_stays_in_bounds() {
        let mut screen = loaded().await;
        for _ in 0..5 {
            screen.handle_key(key(KeyCode::Char('j')));
        }
        assert_eq!(screen.selected(), 1);
        for _ in 0..5 {
            screen.handle_key(key(KeyCode::Char('k')));
        }
        assert_eq!(screen.selected(), 0);
    }

    #[tokio::test]
    async fn test_card_keys_ignored_while_loading() {
        let mut screen = screen(FakeService::new(), Duration::from_secs(60));
        screen.activate();
        settle(&mut screen).await;
        assert_eq!(screen.session().movies().len(), 2);
        assert!(screen.session().is_loading(Instant::now()));

        screen.handle_key(key(KeyCode::Down));
        screen.handle_key(key(KeyCode::Enter));
        assert_eq!(screen.selected(), 0);
        assert!(screen.session().expanded_id().is_none());
        assert_eq!(screen.handle_key(key(KeyCode::Char('h'))), ResultsAction::Home);
    }

    #[test]
    fn test_preference_summary() {
        let mut record = complete_preferences();
        assert_eq!(
            preference_summary(&record),
            "Drama \u{b7} Romantic \u{b7} Golden Age \u{b7} English"
        );
        record.set_notes("no horror");
        assert!(preference_summary(&record).ends_with("\u{b7} \"no horror\""));
    }

    #[tokio::test]
    async fn test_navigation_actions() {
        let mut screen = loaded().await;
        assert_eq!(screen.handle_key(key(KeyCode::Char('r'))), ResultsAction::Refine);
        assert_eq!(screen.handle_key(key(KeyCode::Char('h'))), ResultsAction::Home);
        assert_eq!(screen.handle_key(key(KeyCode::Char('q'))), ResultsAction::Quit);
        assert_eq!(screen.handle_key(key(KeyCode::Esc)), ResultsAction::None);
    }

    #[tokio::test]
    async fn test_render_loading_state() {
        let mut screen = screen(FakeService::new(), Duration::from_secs(60));
        screen.activate();
        let text = render_to_text(100, 30, |frame| render(frame, &screen, "", Instant::now()));
        assert!(text.contains("Your Perfect Matches"));
        assert!(text.contains("Curating Movies"));
        assert!(text.contains("Golden Age"));
        assert!(text.contains("Analyzing your preferences..."));
    }

    #[tokio::test]
    async fn test_render_cards_and_introduction() {
        let mut screen = loaded().await;
        screen.handle_key(key(KeyCode::Enter));
        settle(&mut screen).await;

        let text = render_to_text(120, 30, |frame| {
            render(frame, &screen, "https://img.test/w500", Instant::now());
        });
        assert!(text.contains("Casablanca"));
        assert!(text.contains("Sunset Boulevard"));
        assert!(text.contains("93% match"));
        assert!(text.contains("AI Introduction"));
        assert!(text.contains("Key Themes"));
        assert!(text.contains("Redemption"));
    }

    #[tokio::test]
    async fn test_failed_recommendations_show_notice() {
        let mut screen = screen(FakeService::failing_recommendations(), Duration::ZERO);
        screen.activate();
        settle(&mut screen).await;

        assert!(screen.session().movies().is_empty());
        let text = render_to_text(120, 30, |frame| render(frame, &screen, "", Instant::now()));
        assert!(text.contains("No movies to show"));
        assert!(text.contains("Error while trying to generate movie recommendation"));

        screen.handle_key(key(KeyCode::Char('x')));
        assert!(!screen.session().error_visible());
    }
}
