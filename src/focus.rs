use std::fmt;
use std::str::FromStr;

pub const COMMON_FOCUS_AREAS: [&str; 7] = [
    "Review",
    "Problem Sets",
    "Exam Prep",
    "Concept Mastery",
    "Reading",
    "Practice Exams",
    "Project Work",
];

pub const STUDY_TECHNIQUES: [&str; 5] = [
    "Try using spaced repetition for improving retention.",
    "Consider the Pomodoro technique for better focus during study sessions.",
    "Adding active recall through practice tests can improve memory retention.",
    "Review your notes within 24 hours of making them to solidify understanding.",
    "Try teaching the material to someone else to identify knowledge gaps.",
];

pub const REVIEW_SUBJECT: &str = "General Review";
pub const REVIEW_FOCUS: &str = "Weekly Summary";

/// How the student prefers to study; drives the style-specific focus labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LearningStyle {
    Visual,
    Auditory,
    Reading,
    Kinesthetic,
    /// Anything unrecognized; only the common focus areas apply.
    #[default]
    Unspecified,
}

impl LearningStyle {
    pub fn variants() -> &'static [(&'static str, &'static str)] {
        &[
            ("visual", "Diagrams, visual notes, mind maps and videos"),
            ("auditory", "Recordings, discussion and verbal repetition"),
            ("reading", "Textbooks, note-taking and written summaries"),
            ("kinesthetic", "Practice problems, labs and simulations"),
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LearningStyle::Visual => "visual",
            LearningStyle::Auditory => "auditory",
            LearningStyle::Reading => "reading",
            LearningStyle::Kinesthetic => "kinesthetic",
            LearningStyle::Unspecified => "unspecified",
        }
    }

    pub fn focus_areas(&self) -> &'static [&'static str] {
        match self {
            LearningStyle::Visual => &[
                "Diagrams & Charts",
                "Visual Notes",
                "Mind Maps",
                "Video Tutorials",
            ],
            LearningStyle::Auditory => &[
                "Lecture Recordings",
                "Discussion Groups",
                "Verbal Repetition",
                "Podcasts",
            ],
            LearningStyle::Reading => &[
                "Textbook Reading",
                "Note-Taking",
                "Written Summaries",
                "Practice Questions",
            ],
            LearningStyle::Kinesthetic => &[
                "Practice Problems",
                "Lab Work",
                "Case Studies",
                "Interactive Simulations",
            ],
            LearningStyle::Unspecified => &[],
        }
    }

    /// Style-specific labels followed by the common ones.
    pub fn all_focus_areas(&self) -> Vec<&'static str> {
        self.focus_areas()
            .iter()
            .chain(COMMON_FOCUS_AREAS.iter())
            .copied()
            .collect()
    }
}

impl FromStr for LearningStyle {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "visual" => LearningStyle::Visual,
            "auditory" => LearningStyle::Auditory,
            "reading" => LearningStyle::Reading,
            "kinesthetic" => LearningStyle::Kinesthetic,
            _ => LearningStyle::Unspecified,
        })
    }
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
