use cinescout_client::ClientResult;
use cinescout_core::catalog::{all_genres, genre_options, GenreOption, ERAS, MOODS};
use cinescout_core::model::language::language_options;
use cinescout_core::{Advance, LanguageOption, PreferenceForm, PreferenceRecord, Step};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

const NOTES_PLACEHOLDER: &str = "For example: I enjoy movies with unexpected plot twists, specific \
actors or beautiful landscapes. I prefer avoiding excessive violence...";

const NOTES_HINT: &str = "This helps us better understand your preferences and provide more \
personalized recommendations.";

/// What the root page should do after a key press on the preferences view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAction {
    None,
    /// Back out of the first step, to the landing view.
    Leave,
    Quit,
    Submit(PreferenceRecord),
}

/// The preferences view: the form plus the per-step option lists and the
/// highlighted row on each step.
#[derive(Debug)]
pub struct PreferenceScreen {
    form: PreferenceForm,
    genres: Vec<GenreOption>,
    genres_loaded: bool,
    languages: Vec<LanguageOption>,
    languages_loaded: bool,
    cursor: [usize; 5],
    error_visible: bool,
}

impl PreferenceScreen {
    pub fn new() -> Self {
        Self {
            form: PreferenceForm::new(),
            genres: Vec::new(),
            genres_loaded: false,
            languages: Vec::new(),
            languages_loaded: false,
            cursor: [0; 5],
            error_visible: false,
        }
    }

    pub fn form(&self) -> &PreferenceForm {
        &self.form
    }

    pub fn genres(&self) -> &[GenreOption] {
        &self.genres
    }

    pub fn languages(&self) -> &[LanguageOption] {
        &self.languages
    }

    pub fn error_visible(&self) -> bool {
        self.error_visible
    }

    /// Highlighted row on the current step.
    pub fn cursor(&self) -> usize {
        self.cursor[self.slot()]
    }

    fn slot(&self) -> usize {
        usize::from(self.form.step().number() - 1)
    }

    /// Install the genre list. On failure the full built-in catalog is
    /// offered instead and the error notice is shown.
    pub fn set_genres(&mut self, result: ClientResult<Vec<String>>) {
        self.genres = match result {
            Ok(available) => genre_options(&available),
            Err(e) => {
                log::warn!("Falling back to built-in genres: {}", e);
                self.error_visible = true;
                all_genres()
            }
        };
        self.genres_loaded = true;
    }

    /// Install the language list. On failure the list stays empty and the
    /// error notice is shown.
    pub fn set_languages(&mut self, result: ClientResult<Vec<String>>) {
        match result {
            Ok(codes) => self.languages = language_options(&codes),
            Err(e) => {
                log::warn!("No languages available: {}", e);
                self.error_visible = true;
            }
        }
        self.languages_loaded = true;
    }

    fn option_count(&self, step: Step) -> usize {
        match step {
            Step::Genres => self.genres.len(),
            Step::Mood => MOODS.len(),
            Step::Era => ERAS.len(),
            Step::Language => self.languages.len(),
            Step::Notes => 0,
        }
    }

    fn move_cursor(&mut self, down: bool) {
        let count = self.option_count(self.form.step());
        let slot = self.slot();
        let cursor = &mut self.cursor[slot];
        if down {
            if *cursor + 1 < count {
                *cursor += 1;
            }
        } else {
            *cursor = cursor.saturating_sub(1);
        }
    }

    fn select_highlighted(&mut self) -> ScreenAction {
        let cursor = self.cursor();
        match self.form.step() {
            Step::Genres => {
                if let Some(genre) = self.genres.get(cursor) {
                    let name = genre.name.clone();
                    self.form.toggle_genre(&name);
                }
            }
            Step::Mood => {
                if let Some(mood) = MOODS.get(cursor) {
                    self.form.select_mood(mood.name);
                }
            }
            Step::Era => {
                if let Some(era) = ERAS.get(cursor) {
                    self.form.select_era(era.id);
                }
            }
            Step::Language => {
                if let Some(language) = self.languages.get(cursor) {
                    let id = language.id.clone();
                    return Self::action_for(self.form.select_language(&id));
                }
            }
            Step::Notes => {}
        }
        ScreenAction::None
    }

    fn action_for(advance: Advance) -> ScreenAction {
        match advance {
            Advance::Submitted(record) => ScreenAction::Submit(record),
            Advance::Moved(_) | Advance::Blocked(_) => ScreenAction::None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('x') {
            self.error_visible = false;
            return ScreenAction::None;
        }

        if self.form.step() == Step::Notes {
            match key.code {
                KeyCode::Char(c) if !ctrl => self.form.push_note_char(c),
                KeyCode::Backspace => self.form.pop_note_char(),
                KeyCode::Enter => return Self::action_for(self.form.next()),
                KeyCode::Esc => {
                    self.form.back();
                }
                _ => {}
            }
            return ScreenAction::None;
        }

        match key.code {
            KeyCode::Char('q') => ScreenAction::Quit,
            KeyCode::Char('x') => {
                self.error_visible = false;
                ScreenAction::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_cursor(false);
                ScreenAction::None
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_cursor(true);
                ScreenAction::None
            }
            KeyCode::Char(' ') => self.select_highlighted(),
            KeyCode::Enter => Self::action_for(self.form.next()),
            KeyCode::Esc | KeyCode::Backspace => {
                if self.form.back() {
                    ScreenAction::None
                } else {
                    ScreenAction::Leave
                }
            }
            _ => ScreenAction::None,
        }
    }
}

impl Default for PreferenceScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the preferences view.
pub fn render(frame: &mut Frame, screen: &PreferenceScreen) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(1), // Progress
            Constraint::Length(3), // Step heading
            Constraint::Min(5),    // Options
            Constraint::Length(3), // Buttons
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new("Tell us your preferences")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    render_progress(frame, screen.form(), chunks[1]);
    render_heading(frame, screen.form().step(), chunks[2]);

    match screen.form().step() {
        Step::Notes => render_notes(frame, screen, chunks[3]),
        step => render_options(frame, screen, step, chunks[3]),
    }

    render_buttons(frame, screen.form(), chunks[4]);
    render_help(frame, screen.form().step(), chunks[5]);

    if screen.error_visible() {
        let hint = if screen.form().step() == Step::Notes {
            "Ctrl-x Close"
        } else {
            "x Close"
        };
        super::render_error_notice(frame, area, hint);
    }
}

fn render_progress(frame: &mut Frame, form: &PreferenceForm, area: Rect) {
    let segment = usize::from(area.width.saturating_sub(10) / 5).max(1);
    let spans: Vec<Span<'_>> = Step::ALL
        .iter()
        .map(|step| {
            let style = if form.is_reached(*step) {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Span::styled(format!("{} ", "\u{2501}".repeat(segment)), style)
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn render_heading(frame: &mut Frame, step: Step, area: Rect) {
    let heading = Paragraph::new(vec![
        Line::from(vec![
            Span::raw(format!("{}  ", step.icon())),
            Span::styled(step.title(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  ({})", step), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(Span::styled(step.description(), Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(heading, area);
}

fn option_line(marker: &str, icon: &str, label: &str, detail: Option<&str>) -> Line<'static> {
    let mut spans = vec![
        Span::raw(format!(" {} {} ", marker, icon)),
        Span::raw(label.to_string()),
    ];
    if let Some(detail) = detail {
        spans.push(Span::styled(
            format!("  {}", detail),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

fn radio(selected: bool) -> &'static str {
    if selected {
        "(\u{2022})"
    } else {
        "( )"
    }
}

fn render_options(frame: &mut Frame, screen: &PreferenceScreen, step: Step, area: Rect) {
    let record = screen.form().record();
    let cursor = screen.cursor();

    let (items, hovered): (Vec<ListItem<'_>>, Option<String>) = match step {
        Step::Genres => (
            screen
                .genres()
                .iter()
                .map(|genre| {
                    let marker = if record.has_genre(&genre.name) { "[x]" } else { "[ ]" };
                    ListItem::new(option_line(marker, genre.icon, &genre.name, None))
                })
                .collect(),
            None,
        ),
        Step::Mood => (
            MOODS
                .iter()
                .map(|mood| {
                    let marker = radio(record.mood == mood.name);
                    ListItem::new(option_line(marker, mood.icon, mood.name, None))
                })
                .collect(),
            None,
        ),
        Step::Era => (
            ERAS.iter()
                .map(|era| {
                    let marker = radio(record.era == era.id);
                    ListItem::new(option_line(marker, era.icon, era.name, Some(era.years)))
                })
                .collect(),
            ERAS.get(cursor).map(|era| era.description.to_string()),
        ),
        Step::Language => (
            screen
                .languages()
                .iter()
                .map(|language| {
                    let marker = radio(record.language == language.id);
                    ListItem::new(option_line(marker, language.icon, &language.label, None))
                })
                .collect(),
            screen.languages().get(cursor).map(|l| l.description.clone()),
        ),
        Step::Notes => (Vec::new(), None),
    };

    let block = Block::default().borders(Borders::ALL);

    if items.is_empty() {
        let message = match step {
            Step::Genres if !screen.genres_loaded => "Loading genres...",
            Step::Language if !screen.languages_loaded => "Loading languages...",
            Step::Language => "No languages available. Press Esc to go back and try again later.",
            _ => "No options available.",
        };
        let placeholder = Paragraph::new(message)
            .style(Style::default().fg(Color::Yellow))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let (list_area, detail_area) = if hovered.is_some() {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);
        (parts[0], Some(parts[1]))
    } else {
        (area, None)
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));
    let mut state = ListState::default().with_selected(Some(cursor));
    frame.render_stateful_widget(list, list_area, &mut state);

    if let (Some(detail_area), Some(text)) = (detail_area, hovered) {
        let detail = Paragraph::new(format!("  {}", text)).style(Style::default().fg(Color::Gray));
        frame.render_widget(detail, detail_area);
    }
}

fn render_notes(frame: &mut Frame, screen: &PreferenceScreen, area: Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(area);

    let notes = &screen.form().record().additional_notes;
    let text = if notes.is_empty() {
        Paragraph::new(NOTES_PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(format!("{}\u{2588}", notes))
    };
    frame.render_widget(
        text.wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Notes")),
        parts[0],
    );

    let hint = Paragraph::new(NOTES_HINT)
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true });
    frame.render_widget(hint, parts[1]);
}

fn render_buttons(frame: &mut Frame, form: &PreferenceForm, area: Rect) {
    let enabled = Style::default().fg(Color::Black).bg(Color::White).add_modifier(Modifier::BOLD);
    let disabled = Style::default().fg(Color::DarkGray);

    let back_style = if form.can_go_back() { enabled } else { disabled };
    let next_style = if form.can_advance() && !form.is_finished() {
        enabled
    } else {
        disabled
    };
    let next_label = if form.step() == Step::Notes {
        " Find Movies "
    } else {
        " Continue "
    };

    let buttons = Paragraph::new(Line::from(vec![
        Span::styled(" Back ", back_style),
        Span::raw("    "),
        Span::styled(next_label, next_style),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(buttons, area);
}

fn render_help(frame: &mut Frame, step: Step, area: Rect) {
    let text = match step {
        Step::Genres => "  \u{2191}/k Up  \u{2193}/j Down  Space Toggle  Enter Continue  Esc Home  q Quit",
        Step::Language => "  \u{2191}/k Up  \u{2193}/j Down  Space Choose  Enter Continue  Esc Back  q Quit",
        Step::Notes => "  Type your notes  Enter Find Movies  Esc Back  Ctrl-c Quit",
        Step::Mood | Step::Era => {
            "  \u{2191}/k Up  \u{2193}/j Down  Space Select  Enter Continue  Esc Back  q Quit"
        }
    };
    let help = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::testing::{key, render_to_text};
    use cinescout_client::error::Operation;
    use cinescout_client::ClientError;

    fn loaded_screen() -> PreferenceScreen {
        let mut screen = PreferenceScreen::new();
        screen.set_genres(Ok(vec!["Action".to_string(), "Drama".to_string()]));
        screen.set_languages(Ok(vec!["en".to_string(), "ja".to_string()]));
        screen
    }

    fn failure(operation: Operation) -> ClientResult<Vec<String>> {
        Err(ClientError::Status {
            operation,
            status: 500,
        })
    }

    #[test]
    fn test_enter_blocked_until_genre_selected() {
        let mut screen = loaded_screen();
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), ScreenAction::None);
        assert_eq!(screen.form().step(), Step::Genres);

        screen.handle_key(key(KeyCode::Down));
        screen.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(screen.form().record().genres, vec!["Drama"]);

        screen.handle_key(key(KeyCode::Enter));
        assert_eq!(screen.form().step(), Step::Mood);
    }

    #[test]
    fn test_space_toggles_genre_off() {
        let mut screen = loaded_screen();
        screen.handle_key(key(KeyCode::Char(' ')));
        screen.handle_key(key(KeyCode::Char(' ')));
        assert!(screen.form().record().genres.is_empty());
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut screen = loaded_screen();
        for _ in 0..5 {
            screen.handle_key(key(KeyCode::Down));
        }
        assert_eq!(screen.cursor(), 1);
        for _ in 0..5 {
            screen.handle_key(key(KeyCode::Up));
        }
        assert_eq!(screen.cursor(), 0);
    }

    #[test]
    fn test_cursor_remembered_per_step() {
        let mut screen = loaded_screen();
        screen.handle_key(key(KeyCode::Down));
        screen.handle_key(key(KeyCode::Char(' ')));
        screen.handle_key(key(KeyCode::Enter));
        assert_eq!(screen.cursor(), 0);

        screen.handle_key(key(KeyCode::Esc));
        assert_eq!(screen.form().step(), Step::Genres);
        assert_eq!(screen.cursor(), 1);
    }

    #[test]
    fn test_language_selection_advances_to_notes() {
        let mut screen = loaded_screen();
        for code in [
            KeyCode::Char(' '),
            KeyCode::Enter,
            KeyCode::Char(' '),
            KeyCode::Enter,
            KeyCode::Char(' '),
            KeyCode::Enter,
            KeyCode::Down,
            KeyCode::Char(' '),
        ] {
            assert_eq!(screen.handle_key(key(code)), ScreenAction::None);
        }
        assert_eq!(screen.form().step(), Step::Notes);
        assert_eq!(screen.form().record().language, "ja");
    }

    #[test]
    fn test_notes_typing_and_submit() {
        let mut screen = loaded_screen();
        for code in [
            KeyCode::Char(' '),
            KeyCode::Enter,
            KeyCode::Char(' '),
            KeyCode::Enter,
            KeyCode::Char(' '),
            KeyCode::Enter,
            KeyCode::Char(' '),
        ] {
            screen.handle_key(key(code));
        }
        assert_eq!(screen.form().step(), Step::Notes);

        for c in "no qx".chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
        screen.handle_key(key(KeyCode::Backspace));
        assert_eq!(screen.form().record().additional_notes, "no q");

        match screen.handle_key(key(KeyCode::Enter)) {
            ScreenAction::Submit(record) => {
                assert_eq!(record.genres, vec!["Action"]);
                assert_eq!(record.mood, "Dark");
                assert_eq!(record.era, "silent");
                assert_eq!(record.language, "en");
                assert_eq!(record.additional_notes, "no q");
            }
            other => panic!("expected submit, got {other:?}"),
        }
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), ScreenAction::None);
        assert!(screen.form().is_finished());
    }

    #[test]
    fn test_esc_on_first_step_leaves() {
        let mut screen = loaded_screen();
        assert_eq!(screen.handle_key(key(KeyCode::Esc)), ScreenAction::Leave);
    }

    #[test]
    fn test_genre_failure_falls_back_to_catalog() {
        let mut screen = PreferenceScreen::new();
        screen.set_genres(failure(Operation::AvailableGenres));
        assert_eq!(screen.genres().len(), 19);
        assert!(screen.error_visible());

        screen.handle_key(key(KeyCode::Char('x')));
        assert!(!screen.error_visible());
    }

    #[test]
    fn test_language_failure_leaves_list_empty() {
        let mut screen = PreferenceScreen::new();
        screen.set_languages(failure(Operation::AvailableLanguages));
        assert!(screen.languages().is_empty());
        assert!(screen.error_visible());
    }

    #[test]
    fn test_render_genre_step() {
        let mut screen = loaded_screen();
        screen.handle_key(key(KeyCode::Char(' ')));
        let text = render_to_text(80, 24, |frame| render(frame, &screen));
        assert!(text.contains("Tell us your preferences"));
        assert!(text.contains("What genres interest you?"));
        assert!(text.contains("[x]"));
        assert!(text.contains("Drama"));
        assert!(text.contains("Continue"));
    }

    #[test]
    fn test_render_loading_placeholder() {
        let screen = PreferenceScreen::new();
        let text = render_to_text(80, 24, |frame| render(frame, &screen));
        assert!(text.contains("Loading genres..."));
    }

    #[test]
    fn test_render_error_notice() {
        let mut screen = PreferenceScreen::new();
        screen.set_genres(failure(Operation::AvailableGenres));
        let text = render_to_text(100, 30, |frame| render(frame, &screen));
        assert!(text.contains("Error while trying to generate movie recommendation"));
    }
}
