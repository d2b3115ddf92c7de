use async_trait::async_trait;
use llm::{
    chat::{ChatMessage, ChatProvider, ChatResponse, Tool},
    error::LLMError,
};
use repurpose::{ContentSource, Document};
use url::Url;

#[macro_export]
macro_rules! assert_responses {
    (
        $(
            $test_name:ident : response => $response:expr, result => $result:expr
        ),+ $(,)?
    ) => {
        $(
            #[tokio::test]
            async fn $test_name() {
                let model = StubLlmProvider::Fixed($response.to_owned());
                let context = repurpose::RepurposeContext {
                    model: &model,
                    prompt_template: None,
                };
                let result = repurpose::repurpose::repurpose_text("", "", &context)
                    .await
                    .expect("Expected successful processing.");

                assert_that(&result).is_equal_to($result.to_owned());
            }
        )+
    }
}

/// A model answering with canned text, its own prompt, or an error.
pub(crate) enum StubLlmProvider {
    Fixed(String),
    Echo,
    Failing,
}

#[derive(Debug)]
struct StringResponse(String);

impl ChatResponse for StringResponse {
    fn text(&self) -> Option<String> {
        Some(self.0.clone())
    }

    fn tool_calls(&self) -> Option<Vec<llm::ToolCall>> {
        None
    }

    fn thinking(&self) -> Option<String> {
        None
    }

    fn usage(&self) -> Option<llm::chat::Usage> {
        None
    }
}

impl std::fmt::Display for StringResponse {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[async_trait]
impl ChatProvider for StubLlmProvider {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError> {
        let text = match self {
            Self::Fixed(response) => response.clone(),
            Self::Echo => messages
                .iter()
                .map(|message| message.content.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Failing => {
                return Err(LLMError::ProviderError("model unavailable".to_owned()));
            }
        };

        Ok(Box::new(StringResponse(text)) as Box<dyn ChatResponse>)
    }

    async fn chat_with_tools(
        &self,
        messages: &[ChatMessage],
        _tools: Option<&[Tool]>,
    ) -> Result<Box<dyn ChatResponse>, LLMError> {
        self.chat(messages).await
    }
}

/// A loader serving a fixed document, or nothing.
pub(crate) struct StubSource {
    pub text: Option<String>,
}

impl StubSource {
    pub fn with_text(text: &str) -> Self {
        Self {
            text: Some(text.to_owned()),
        }
    }

    pub fn empty() -> Self {
        Self { text: None }
    }
}

#[async_trait]
impl ContentSource for StubSource {
    async fn load(&self, url: &Url) -> Option<Document> {
        self.text
            .clone()
            .map(|text| Document::new(url.clone(), None, text))
    }
}

pub(crate) fn page_url() -> Url {
    Url::parse("http://example.com/post").expect("Valid test URL")
}
