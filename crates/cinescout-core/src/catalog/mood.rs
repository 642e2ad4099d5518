/// A selectable mood on the mood step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodOption {
    pub name: &'static str,
    pub icon: &'static str,
}

pub const MOODS: &[MoodOption] = &[
    MoodOption { name: "Dark", icon: "\u{263E}" },
    MoodOption { name: "Emotional", icon: "\u{2661}" },
    MoodOption { name: "Humorous", icon: "\u{263A}" },
    MoodOption { name: "Inspiring", icon: "\u{2600}" },
    MoodOption { name: "Intense", icon: "\u{26A1}" },
    MoodOption { name: "Melancholic", icon: "\u{2601}" },
    MoodOption { name: "Mysterious", icon: "?" },
    MoodOption { name: "Relaxing", icon: "\u{231A}" },
    MoodOption { name: "Romantic", icon: "\u{2665}" },
    MoodOption { name: "Suspenseful", icon: "\u{2736}" },
    MoodOption { name: "Thought-provoking", icon: "\u{2606}" },
    MoodOption { name: "Uplifting", icon: "\u{2191}" },
];
