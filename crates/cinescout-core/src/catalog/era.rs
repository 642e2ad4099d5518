/// A period of film history offered on the era step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EraOption {
    /// Value sent to the service (e.g. `"golden"`).
    pub id: &'static str,
    pub name: &'static str,
    pub years: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

pub const ERAS: &[EraOption] = &[
    EraOption {
        id: "silent",
        name: "Silent Era",
        years: "1895 - 1927",
        description: "Early cinema, pioneering filmmaking, and silent masterpieces",
        icon: "\u{1F3A5}",
    },
    EraOption {
        id: "golden",
        name: "Golden Age",
        years: "1927 - 1948",
        description: "Studio system era, classic Hollywood, and rise of the talkies",
        icon: "\u{2728}",
    },
    EraOption {
        id: "postwar",
        name: "Post-War Era",
        years: "1948 - 1965",
        description: "Fall of studio system, film noir, and international cinema",
        icon: "\u{1F31F}",
    },
    EraOption {
        id: "new",
        name: "New Hollywood",
        years: "1965 - 1983",
        description: "Auteur filmmaking, counterculture, and rise of blockbusters",
        icon: "\u{1F3AC}",
    },
    EraOption {
        id: "blockbuster",
        name: "Blockbuster Era",
        years: "1983 - 1999",
        description: "High-concept films, special effects, and franchise movies",
        icon: "\u{1F4AB}",
    },
    EraOption {
        id: "digital",
        name: "Digital Age",
        years: "2000 - 2010",
        description: "Digital filmmaking, streaming platforms, and global cinema",
        icon: "\u{1F3AF}",
    },
    EraOption {
        id: "streaming",
        name: "Streaming Era",
        years: "2010 - Now",
        description: "Service originals, direct-to-streaming releases, and platform wars",
        icon: "\u{1F4F1}",
    },
    EraOption {
        id: "any",
        name: "All Eras",
        years: "Any Time",
        description: "Films from all periods of cinema history",
        icon: "\u{1F3AA}",
    },
];

/// Look up an era by its service id.
#[must_use]
pub fn find_era(id: &str) -> Option<&'static EraOption> {
    ERAS.iter().find(|era| era.id == id)
}
