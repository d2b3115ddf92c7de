use url::Url;

/// A fetched web page reduced to its readable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Where the page was loaded from.
    pub url: Url,
    /// The page title, if one could be found.
    pub title: Option<String>,
    /// The extracted text content.
    pub text: String,
}

impl Document {
    pub fn new(url: Url, title: Option<String>, text: String) -> Self {
        Self { url, title, text }
    }

    /// Returns the first `max_chars` characters of the text.
    pub fn head(&self, max_chars: usize) -> &str {
        match self.text.char_indices().nth(max_chars) {
            Some((offset, _)) => self.text.get(..offset).unwrap_or(&self.text),
            None => &self.text,
        }
    }

    /// Number of characters in the text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
