//! Question answering over the loaded resume.
//!
//! `answer` is total: every question gets exactly one text answer. Keyword
//! intents are tried first, then fuzzy search over project and highlight text,
//! then the profile summary.

use std::sync::Arc;

use tracing::debug;

use crate::models::resume::{ExperienceEntry, ProjectEntry, ResumeDocument};
use crate::qa::fuzzy::partial_ratio;
use crate::qa::intent::{classify, Intent};

/// A fuzzy match must score strictly above this (0 – 100) to be returned.
pub const FUZZY_THRESHOLD: f64 = 60.0;

/// Questions longer than this (in characters) skip fuzzy search. Window
/// scoring grows with the square of the shorter string.
pub const MAX_FUZZY_QUESTION_CHARS: usize = 512;

pub struct AnswerEngine {
    doc: Arc<ResumeDocument>,
    /// Projects first, then experience highlights, both in document order.
    corpus: Vec<String>,
}

impl AnswerEngine {
    pub fn new(doc: Arc<ResumeDocument>) -> Self {
        let corpus = build_corpus(&doc);
        Self { doc, corpus }
    }

    pub fn answer(&self, question: &str) -> String {
        let q = question.to_lowercase();
        let intent = classify(&q);
        debug!(?intent, "Classified question");

        let doc = self.doc.as_ref();
        match intent {
            Intent::Name => doc.profile.name.clone(),
            Intent::Intro => format!("{} — {}", doc.profile.title, doc.profile.summary),
            Intent::Email => format!("Email: {}", doc.contact.email),
            Intent::Phone => format!("Phone: {}", doc.contact.phone),
            Intent::Location => format!("Location: {}", doc.contact.location),
            Intent::Experience {
                most_recent,
                detailed,
            } => render_experience(doc, most_recent, detailed),
            Intent::Skills => render_skills(doc),
            Intent::Education => render_education(doc),
            Intent::LanguagesSpoken => {
                format!("Languages spoken: {}", doc.languages_spoken.join(", "))
            }
            Intent::Projects { detailed } => render_projects(&doc.projects, detailed),
            Intent::Unmatched => self
                .best_fuzzy_match(&q)
                .unwrap_or_else(|| doc.profile.summary.clone()),
        }
    }

    /// Highest-scoring corpus entry above [`FUZZY_THRESHOLD`]; earlier entries win ties.
    fn best_fuzzy_match(&self, q: &str) -> Option<String> {
        if q.chars().count() > MAX_FUZZY_QUESTION_CHARS {
            debug!("Question too long for fuzzy search");
            return None;
        }

        let mut best: Option<(&String, f64)> = None;
        for entry in &self.corpus {
            let score = partial_ratio(q, entry);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((entry, score));
            }
        }

        let (entry, score) = best?;
        debug!(score, "Best fuzzy match");
        (score > FUZZY_THRESHOLD).then(|| entry.clone())
    }
}

fn build_corpus(doc: &ResumeDocument) -> Vec<String> {
    let projects = doc
        .projects
        .iter()
        .map(|p| format!("{} | tech: {}", p.name, p.tech.join(", ")));
    let highlights = doc
        .experience
        .iter()
        .flat_map(|e| e.highlights.iter().cloned());
    projects.chain(highlights).collect()
}

fn render_experience(doc: &ResumeDocument, most_recent: bool, detailed: bool) -> String {
    if most_recent {
        return match doc.experience.first() {
            Some(latest) if detailed => detailed_experience(latest),
            Some(latest) => format!("{}.", latest.headline()),
            None => doc.profile.summary.clone(),
        };
    }

    let lines: Vec<String> = doc
        .experience
        .iter()
        .map(|e| {
            if detailed {
                detailed_experience(e)
            } else {
                e.headline()
            }
        })
        .collect();
    format!("Experience:\n{}", lines.join("\n"))
}

fn detailed_experience(entry: &ExperienceEntry) -> String {
    let highlights: String = entry
        .highlights
        .iter()
        .map(|h| format!("\n  - {h}"))
        .collect();
    format!("{}\nHighlights:{}", entry.headline(), highlights)
}

fn render_skills(doc: &ResumeDocument) -> String {
    doc.skills
        .iter()
        .map(|s| {
            format!(
                "Languages: {}. Frameworks: {}. Web: {}. Databases: {}. Tools: {}.",
                s.languages.join(", "),
                s.frameworks.join(", "),
                s.web.join(", "),
                s.databases.join(", "),
                s.tools.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_education(doc: &ResumeDocument) -> String {
    let lines: Vec<String> = doc
        .education
        .iter()
        .map(|ed| {
            format!(
                "{} at {} ({} – {}). Focus areas: {}.",
                ed.degree,
                ed.school,
                ed.start,
                ed.end,
                ed.focus.join(", ")
            )
        })
        .collect();
    format!("Education:\n{}", lines.join("\n"))
}

fn render_projects(projects: &[ProjectEntry], detailed: bool) -> String {
    let lines: Vec<String> = projects
        .iter()
        .map(|p| {
            let tech = p.tech.join(", ");
            if detailed {
                format!("{}\n  Tech: {}", p.name, tech)
            } else {
                format!("{} (Tech: {})", p.name, tech)
            }
        })
        .collect();
    format!("Projects:\n{}", lines.join("\n"))
}
