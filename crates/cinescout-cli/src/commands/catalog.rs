use anyhow::Result;
use cinescout_client::MovieService;
use cinescout_core::catalog::{genre_options, GenreOption};
use cinescout_core::model::language::language_options;
use cinescout_core::LanguageOption;

/// Print the genres the service offers.
pub async fn list_genres(service: &dyn MovieService) -> Result<()> {
    let genres = service.available_genres().await.map_err(super::service_failure)?;
    print!("{}", format_genres(&genre_options(&genres)));
    Ok(())
}

/// Print the languages the service offers.
pub async fn list_languages(service: &dyn MovieService) -> Result<()> {
    let codes = service.available_languages().await.map_err(super::service_failure)?;
    print!("{}", format_languages(&language_options(&codes)));
    Ok(())
}

fn format_genres(genres: &[GenreOption]) -> String {
    if genres.is_empty() {
        return String::from("No genres available.\n");
    }
    genres
        .iter()
        .map(|genre| format!("{}  {}\n", genre.icon, genre.name))
        .collect()
}

fn format_languages(languages: &[LanguageOption]) -> String {
    if languages.is_empty() {
        return String::from("No languages available.\n");
    }
    languages
        .iter()
        .map(|language| format!("{:<4} {}\n", language.id, language.label))
        .collect()
}
