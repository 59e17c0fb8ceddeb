//! Recommendation requester.
//!
//! Builds a single structured prompt from a completed profile, asks the
//! provider for a completion, and always produces user-facing text: provider
//! failures and empty completions degrade to a fixed fallback message so the
//! conversation can never get stuck waiting for a reply.

use crate::profile::ApplicantProfile;
use crate::{ChatMessage, GenerationConfig, LLMProvider, Role};
use tracing::{info, warn};

/// Fixed reply used whenever the generative service cannot produce text.
pub const FALLBACK_RECOMMENDATION: &str = "Sorry, I encountered an issue while generating your health insurance plan recommendation. Please try again later.";

const SYSTEM_PROMPT: &str = "You are a helpful assistant providing concise recommendations.";

/// Output budget for one recommendation.
const MAX_TOKENS: usize = 500;
/// Low randomness keeps recommendations consistent between runs.
const TEMPERATURE: f32 = 0.4;

/// Single-attempt recommendation requester.
///
/// No retry or backoff: one request, and on any failure the fallback text is
/// returned instead of an error.
pub struct RecommendationRequester<P> {
    provider: P,
    config: GenerationConfig,
}

impl<P: LLMProvider> RecommendationRequester<P> {
    /// Create a requester using the provider's default model.
    pub fn new(provider: P) -> Self {
        let config = GenerationConfig {
            model: provider.default_model().to_string(),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };
        Self { provider, config }
    }

    /// Override the model name.
    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.config.model = model;
        self
    }

    /// Request a recommendation for a completed profile.
    ///
    /// Returns trimmed completion text, or [`FALLBACK_RECOMMENDATION`] when
    /// the provider fails or returns nothing usable.
    pub async fn request(&self, profile: &ApplicantProfile) -> String {
        let messages = vec![
            ChatMessage {
                role: Role::System,
                content: SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: Role::User,
                content: build_prompt(profile),
            },
        ];

        match self.provider.chat(&messages, &self.config).await {
            Ok(response) => {
                let content = response.content.trim();
                if content.is_empty() {
                    warn!("Provider returned an empty completion, using fallback text");
                    FALLBACK_RECOMMENDATION.to_string()
                } else {
                    info!("Received recommendation ({} chars)", content.len());
                    content.to_string()
                }
            }
            Err(e) => {
                warn!("Recommendation request failed: {e}");
                FALLBACK_RECOMMENDATION.to_string()
            }
        }
    }
}

fn build_prompt(profile: &ApplicantProfile) -> String {
    format!(
        r#"User requires a detailed and structured health insurance plan recommendation.
Family size: {}
Household income (USD per month): {}
Gender: {}

Provide a response that includes:
1. A clear title: "Health Insurance Plan Recommendation:"
2. A step-by-step list with up to 10 actionable bullet points. Use bold headings for each point, followed by a brief, concise explanation.
3. A concluding paragraph summarizing the importance of selecting the right plan based on the user's details.

Ensure the response is well-formatted, complete, and fits within 500 tokens.
Strictly avoid using symbols like # or creating unstructured paragraphs.
Each bullet point must stand out clearly."#,
        profile.family_size, profile.income, profile.gender
    )
}
