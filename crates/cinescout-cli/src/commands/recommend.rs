use anyhow::{Context, Result};
use cinescout_client::{MovieService, RecommendationRequest};
use cinescout_core::model::movie::assign_ids;
use cinescout_core::{Movie, PreferenceRecord};

/// Build a preference record from command-line values.
pub fn preferences(
    genres: &[String],
    mood: String,
    era: String,
    language: String,
    notes: String,
) -> PreferenceRecord {
    let mut record = PreferenceRecord::new();
    for genre in genres {
        if !record.has_genre(genre) {
            record.toggle_genre(genre);
        }
    }
    record.set_mood(mood);
    record.set_era(era);
    record.set_language(language);
    record.set_notes(notes);
    record
}

/// Request recommendations for `record` and print them as a table.
pub async fn run_recommend(
    service: &dyn MovieService,
    record: &PreferenceRecord,
    image_base_url: &str,
) -> Result<()> {
    record.validate().context("Cannot request recommendations")?;

    let mut movies = service
        .movie_recommendation(&RecommendationRequest::from(record))
        .await
        .map_err(super::service_failure)?;
    assign_ids(&mut movies);

    print!("{}", format_movies(&movies, image_base_url));
    Ok(())
}

fn format_movies(movies: &[Movie], image_base_url: &str) -> String {
    if movies.is_empty() {
        return String::from("No movies matched these preferences.\n");
    }

    let width = movies
        .iter()
        .map(|m| m.title.chars().count())
        .max()
        .unwrap_or(0)
        .max(5);

    let mut out = format!(
        "{:<3} {:<width$}  {:<4}  {:>6}  {:>5}  {}\n",
        "#", "Title", "Year", "Rating", "Match", "Poster"
    );
    for (index, movie) in movies.iter().enumerate() {
        out.push_str(&format!(
            "{:<3} {:<width$}  {:<4}  {:>6}  {:>5}  {}\n",
            index + 1,
            movie.title,
            movie.year,
            movie.rating_label(),
            movie.confidence_label(),
            movie.poster_url(image_base_url).unwrap_or_default(),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferences_from_flags() {
        let record = preferences(
            &["Action".to_string(), "Action".to_string(), "Drama".to_string()],
            "Dark".to_string(),
            "golden".to_string(),
            "en".to_string(),
            String::new(),
        );
        assert_eq!(record.genres, vec!["Action", "Drama"]);
        assert!(record.is_submit_ready());
    }

    #[test]
    fn test_format_movies_table() {
        let movies = vec![
            Movie::new("Casablanca", 1942)
                .with_rating(8.5)
                .with_confidence(0.93)
                .with_poster("/c.jpg"),
            Movie::new("Up", 2009).with_rating(8.2).with_confidence(0.7),
        ];
        let text = format_movies(&movies, "https://img.test");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("#   Title"));
        assert!(lines[1].contains("Casablanca"));
        assert!(lines[1].contains("8.5"));
        assert!(lines[1].contains("93%"));
        assert!(lines[1].ends_with("https://img.test/c.jpg"));
        assert!(lines[2].contains("70%"));
    }

    #[test]
    fn test_format_empty_result() {
        assert_eq!(format_movies(&[], ""), "No movies matched these preferences.\n");
    }
}
