//! Test doubles shared by the TUI tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use cinescout_client::error::Operation;
use cinescout_client::{
    ClientError, ClientResult, DescriptionRequest, MovieService, RecommendationRequest,
};
use cinescout_core::{Movie, MovieDescription, PreferenceRecord};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

use super::App;

#[derive(Debug, Default)]
pub struct FakeService {
    pub fail_catalog: bool,
    pub fail_recommendations: bool,
    recommendations: AtomicUsize,
    last_recommendation: Mutex<Option<RecommendationRequest>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_catalog() -> Self {
        Self {
            fail_catalog: true,
            ..Self::default()
        }
    }

    pub fn failing_recommendations() -> Self {
        Self {
            fail_recommendations: true,
            ..Self::default()
        }
    }

    pub fn recommendation_calls(&self) -> usize {
        self.recommendations.load(Ordering::SeqCst)
    }

    pub fn last_recommendation(&self) -> Option<RecommendationRequest> {
        self.last_recommendation.lock().ok().and_then(|r| r.clone())
    }
}

#[async_trait]
impl MovieService for FakeService {
    async fn available_genres(&self) -> ClientResult<Vec<String>> {
        if self.fail_catalog {
            return Err(ClientError::Status {
                operation: Operation::AvailableGenres,
                status: 500,
            });
        }
        Ok(vec!["Drama".to_string(), "Action".to_string(), "Comedy".to_string()])
    }

    async fn available_languages(&self) -> ClientResult<Vec<String>> {
        if self.fail_catalog {
            return Err(ClientError::Status {
                operation: Operation::AvailableLanguages,
                status: 500,
            });
        }
        Ok(vec!["en".to_string(), "fr".to_string()])
    }

    async fn movie_description(
        &self,
        request: &DescriptionRequest,
    ) -> ClientResult<MovieDescription> {
        Ok(MovieDescription {
            genre: vec!["Redemption".to_string(), "Hope".to_string()],
            summary: format!("{} is a story about hope.", request.title),
        })
    }

    async fn movie_recommendation(
        &self,
        request: &RecommendationRequest,
    ) -> ClientResult<Vec<Movie>> {
        self.recommendations.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_recommendation.lock() {
            *last = Some(request.clone());
        }
        if self.fail_recommendations {
            return Err(ClientError::Status {
                operation: Operation::MovieRecommendation,
                status: 503,
            });
        }
        Ok(vec![
            Movie::new("Casablanca", 1942)
                .with_rating(8.5)
                .with_confidence(0.93)
                .with_poster("/casablanca.jpg")
                .with_duration("102 min"),
            Movie::new("Sunset Boulevard", 1950)
                .with_rating(8.4)
                .with_confidence(0.81),
        ])
    }
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn press_all(app: &mut App, codes: &[KeyCode]) {
    for code in codes {
        app.handle_key(key(*code));
    }
}

/// Let spawned requests finish and apply their outcomes.
pub async fn settle(app: &mut App) {
    for _ in 0..10 {
        tokio::time::sleep(Duration::from_millis(5)).await;
        app.tick();
    }
}

pub fn complete_preferences() -> PreferenceRecord {
    let mut record = PreferenceRecord::new();
    record.toggle_genre("Drama");
    record.set_mood("Romantic");
    record.set_era("golden");
    record.set_language("en");
    record
}

/// Render `draw` into an in-memory terminal and return its text, one line
/// per row.
pub fn render_to_text(width: u16, height: u16, draw: impl FnOnce(&mut ratatui::Frame)) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(draw).unwrap();
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}
