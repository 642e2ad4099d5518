/// A selectable language on the language step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageOption {
    /// Language code as supplied by the service (e.g. `"en"`).
    pub id: String,
    /// Resolved English display name, or the code when unknown.
    pub label: String,
    pub description: String,
    pub icon: &'static str,
}

const LANGUAGE_ICON: &str = "\u{1F5E3}";

/// ISO 639-1 codes and their English names.
const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("bn", "Bangla"),
    ("ca", "Catalan"),
    ("cn", "Cantonese"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("fa", "Persian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("is", "Icelandic"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ka", "Georgian"),
    ("kn", "Kannada"),
    ("ko", "Korean"),
    ("ml", "Malayalam"),
    ("mr", "Marathi"),
    ("ms", "Malay"),
    ("nb", "Norwegian Bokm\u{e5}l"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pa", "Punjabi"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sr", "Serbian"),
    ("sv", "Swedish"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("th", "Thai"),
    ("tl", "Tagalog"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("vi", "Vietnamese"),
    ("xx", "No Language"),
    ("zh", "Chinese"),
];

/// English display name for a language code, if known.
#[must_use]
pub fn display_name(code: &str) -> Option<&'static str> {
    let code = code.trim().to_ascii_lowercase();
    LANGUAGE_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

impl LanguageOption {
    /// Build the option for a service-supplied language code.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        let label = display_name(code).map_or_else(|| code.to_string(), str::to_string);
        Self {
            id: code.to_string(),
            description: format!("Films originally produced in {}", label),
            label,
            icon: LANGUAGE_ICON,
        }
    }
}

/// Build language options for every code, preserving the service's order.
#[must_use]
pub fn language_options(codes: &[String]) -> Vec<LanguageOption> {
    codes.iter().map(|code| LanguageOption::from_code(code)).collect()
}
