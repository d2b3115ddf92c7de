pub const MODEL_API_KEY_ENV_NAME: &str = "GROQ_API_KEY";

pub const USER_AGENT_ENV_NAME: &str = "USER_AGENT";

pub const DEFAULT_USER_AGENT: &str = "Repurpose Bot";

pub const DEFAULT_URL: &str = "https://lilianweng.github.io/posts/2023-06-23-agent/";

pub const DEFAULT_MODEL: &str = "groq://llama-3.3-70b-versatile";

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Number of leading characters sent to the model when not chunking.
pub const DEFAULT_MAX_CHARS: usize = 6000;

pub const DEFAULT_CHUNK_SIZE: usize = 4000;

pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

pub const RESULT_BANNER: &str = "--- YOUR REPURPOSED CONTENT ---";

pub(crate) const THINK_STRIPPER: &str = r"<think>[\s\S]*</think>\s*";

pub(crate) const DEFAULT_PROMPT_TEMPLATE: &str = r#"
You are an expert content repurposing AI. You are given a piece of text from a blog post.

Your task is to generate the following three items based on the content:

1.  **LinkedIn Post:** A professional post (under 250 words) that shares the main idea and ends with an engaging question. Include 3 relevant hashtags.
2.  **Tweet Thread:** A 3-tweet thread to share the content. Add a strong hook to the first tweet. Use emojis and hashtags.
3.  **Key Insights:** A 5-bullet-point summary of the key takeaways.

Here is the content:
"{text}"

YOUR RESPONSE (in markdown):
"#;
