// Question answering over the resume document.
// Keyword intents first, fuzzy partial-ratio fallback second, profile summary last.

pub mod engine;
pub mod fuzzy;
pub mod intent;

pub use engine::AnswerEngine;
