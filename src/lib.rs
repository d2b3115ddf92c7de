//! The repurpose library loads a web page, extracts and splits its text and
//! asks an LLM model to turn it into social media content.

pub mod chunk;
pub mod config;
pub mod constants;
pub mod document;
pub mod fetch;
pub mod parse;
pub mod repurpose;

/// How the readable text of a fetched HTML page is obtained.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum TextBy {
    /// Readability extraction of the main article, rendered as markdown
    #[default]
    DomSmoothie,
    /// Markdown conversion of the whole (or selected) HTML
    FastHtml2Md,
}

impl std::str::FromStr for TextBy {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        [("dom_smoothie", Self::DomSmoothie), ("fast_html2md", Self::FastHtml2Md)]
            .into_iter()
            .find_map(|(name, text_by)| input.eq_ignore_ascii_case(name).then_some(text_by))
            .ok_or_else(|| {
                format!("Unknown extractor {input:?}, expected dom_smoothie or fast_html2md")
            })
    }
}

pub use chunk::{Chunk, Chunker};
pub use config::Config;
pub use document::Document;
pub use fetch::{ContentSource, WebLoader};
pub use parse::extract_document;
pub use repurpose::{RepurposeContext, Scope, run};
