/// A selectable genre on the genre step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreOption {
    pub name: String,
    pub icon: &'static str,
}

/// Glyph for genres the service offers but the catalog does not know.
const DEFAULT_ICON: &str = "\u{1F39E}";

/// Known genres and their glyphs, in display order.
const KNOWN_GENRES: &[(&str, &str)] = &[
    ("Action", "\u{26A1}"),
    ("Adventure", "\u{1F5FA}"),
    ("Animation", "\u{1F58C}"),
    ("Comedy", "\u{263A}"),
    ("Crime", "\u{1F6A8}"),
    ("Drama", "\u{1F3AD}"),
    ("Family", "\u{1F3E0}"),
    ("Fantasy", "\u{2728}"),
    ("History", "\u{231B}"),
    ("Horror", "\u{1F47B}"),
    ("Music", "\u{266B}"),
    ("Mystery", "\u{1F50D}"),
    ("Romance", "\u{2665}"),
    ("Documentary", "\u{1F514}"),
    ("Science Fiction", "\u{1F680}"),
    ("TV Movie", "\u{1F3C6}"),
    ("Thriller", "\u{1F525}"),
    ("War", "\u{1F6E1}"),
    ("Western", "\u{2600}"),
];

/// Every known genre, in catalog order.
#[must_use]
pub fn all_genres() -> Vec<GenreOption> {
    KNOWN_GENRES
        .iter()
        .map(|(name, icon)| GenreOption {
            name: (*name).to_string(),
            icon: *icon,
        })
        .collect()
}

/// Options for the genres offered by the service.
///
/// Known genres keep catalog order and glyphs; names are matched without
/// regard to case and reported in the service's spelling. Genres the catalog
/// does not know are appended in service order with a generic glyph.
#[must_use]
pub fn genre_options(available: &[String]) -> Vec<GenreOption> {
    let mut options: Vec<GenreOption> = KNOWN_GENRES
        .iter()
        .filter_map(|(name, icon)| {
            available
                .iter()
                .find(|a| a.trim().eq_ignore_ascii_case(name))
                .map(|a| GenreOption {
                    name: a.trim().to_string(),
                    icon: *icon,
                })
        })
        .collect();

    for name in available {
        let name = name.trim();
        if name.is_empty() || options.iter().any(|o| o.name.eq_ignore_ascii_case(name)) {
            continue;
        }
        options.push(GenreOption {
            name: name.to_string(),
            icon: DEFAULT_ICON,
        });
    }

    options
}
