/// What a question is asking about. Computed once per question by [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Name,
    Intro,
    Email,
    Phone,
    Location,
    Experience { most_recent: bool, detailed: bool },
    Skills,
    Education,
    LanguagesSpoken,
    Projects { detailed: bool },
    /// No keyword rule fired; the engine falls back to fuzzy search.
    Unmatched,
}

const NAME: &[&str] = &["name"];
const INTRO: &[&str] = &["title", "who are you", "position"];
const EMAIL: &[&str] = &["email"];
const PHONE: &[&str] = &["phone", "number"];
const LOCATION: &[&str] = &["location", "where", "based"];
const EXPERIENCE: &[&str] = &["experience", "role", "job", "position"];
const SKILLS: &[&str] = &["skills", "stack", "tech", "technologies"];
const EDUCATION: &[&str] = &["education", "degree", "study", "university", "school"];
const LANGUAGES: &[&str] = &["speak", "language"];
const PROJECTS: &[&str] = &["project"];

const MOST_RECENT: &[&str] = &["last", "latest", "current"];
const DETAIL: &[&str] = &["detail", "more", "deep"];

type Rule = (&'static [&'static str], fn(&str) -> Intent);

/// Keyword rules in precedence order. Several triggers overlap ("position" is
/// both an intro and an experience trigger), so the order is load-bearing.
const RULES: &[Rule] = &[
    (NAME, |_| Intent::Name),
    (INTRO, |_| Intent::Intro),
    (EMAIL, |_| Intent::Email),
    (PHONE, |_| Intent::Phone),
    (LOCATION, |_| Intent::Location),
    (EXPERIENCE, |q| Intent::Experience {
        most_recent: contains_any(q, MOST_RECENT),
        detailed: contains_any(q, DETAIL),
    }),
    (SKILLS, |_| Intent::Skills),
    (EDUCATION, |_| Intent::Education),
    (LANGUAGES, |_| Intent::LanguagesSpoken),
    (PROJECTS, |q| Intent::Projects {
        detailed: contains_any(q, DETAIL),
    }),
];

/// Classifies an already lower-cased question. First matching rule wins.
pub fn classify(question: &str) -> Intent {
    RULES
        .iter()
        .find(|(triggers, _)| contains_any(question, triggers))
        .map(|(_, build)| build(question))
        .unwrap_or(Intent::Unmatched)
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}
