use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

const TAGLINE: &str = "Discover films tailored to your taste. Answer a few questions about \
what you enjoy and get AI-powered recommendations in seconds.";

/// Render the landing view.
pub fn render(frame: &mut Frame) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(3), // Title
            Constraint::Length(4), // Tagline
            Constraint::Length(3), // Get Started
            Constraint::Length(2), // Badges
            Constraint::Min(0),
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new("\u{1F3AC}  Movie Finder")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, centered(chunks[1], 40));

    let tagline = Paragraph::new(TAGLINE)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true });
    frame.render_widget(tagline, centered(chunks[2], 70));

    let start = Paragraph::new(Line::from(Span::styled(
        " Get Started \u{2192} ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(start, chunks[3]);

    let badges = Paragraph::new("\u{2714} No account required    \u{2714} Private & Free")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(badges, chunks[4]);

    let help = Paragraph::new("  Enter Get Started  q Quit").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[6]);
}

/// A horizontally centered slice of `area`, at most `width` columns wide.
fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
