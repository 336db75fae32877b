// Resume parsing: document text → structured record.
//
// The cascade tries AI extraction, then heuristic extraction, then falls back
// to an empty record. Both extractors feed their output through `sanitize`.

pub mod ai;
pub mod cascade;
pub mod document;
pub mod handlers;
pub mod heuristic;
pub mod prompts;
pub mod sanitize;
pub mod sections;
pub mod vocabulary;

pub use cascade::ResumeParser;
