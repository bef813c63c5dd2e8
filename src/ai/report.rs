use std::sync::Arc;

use crate::common::{GeneratorConfig, LlmError, LlmResult, ReportError};
use crate::metrics;
use crate::models::{GenerateRequest, GenerationResult, LengthBudget, ReportSpec};
use crate::templates::prompts::{report_prompts, Part};

use super::client::{ChatCompletion, ChatRequest};

/// Generates long-form reports, falling back through the configured models
/// until one produces text.
pub struct ReportGenerator {
    client: Arc<dyn ChatCompletion>,
    config: GeneratorConfig,
}

impl ReportGenerator {
    pub fn new(client: Arc<dyn ChatCompletion>, config: GeneratorConfig) -> Self {
        ReportGenerator { client, config }
    }

    pub fn models(&self) -> &[String] {
        &self.config.models
    }

    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerationResult, ReportError> {
        let spec = request.validate()?;
        self.generate_spec(&spec).await
    }

    /// Runs the fallback loop for an already validated request.
    pub async fn generate_spec(&self, spec: &ReportSpec) -> Result<GenerationResult, ReportError> {
        let budget = LengthBudget::for_pages(spec.pages);
        let mut last_error = None;

        for model in &self.config.models {
            tracing::info!(%model, pages = spec.pages, template = %spec.template, "Trying model");

            let attempt = self.attempt(model, spec, &budget).await;
            metrics::MODEL_ATTEMPTS
                .with_label_values(&[model.as_str(), metrics::outcome(&attempt)])
                .inc();

            match attempt {
                Ok(pitch) => return Ok(GenerationResult::new(pitch, model.as_str(), spec.pages)),
                Err(e) => {
                    tracing::warn!(%model, error = %e, "Model failed");
                    last_error = Some(e);
                }
            }
        }

        let err = match last_error {
            Some(e) => ReportError::AllModelsFailed(e),
            None => ReportError::NoModels,
        };
        tracing::error!(error = %err, "Report generation failed");
        Err(err)
    }

    /// One model's attempt: a single call, or two sequential halves for
    /// long reports.
    ///
    /// Only an empty final text fails the attempt; a split report keeps
    /// whichever half came back.
    async fn attempt(&self, model: &str, spec: &ReportSpec, budget: &LengthBudget) -> LlmResult<String> {
        let pitch = if budget.needs_split() {
            self.generate_halves(model, spec, budget).await?
        } else {
            self.call(model, spec, budget, Part::Whole).await?
        };

        let pitch = pitch.trim();
        if pitch.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(pitch.to_string())
    }

    async fn generate_halves(&self, model: &str, spec: &ReportSpec, budget: &LengthBudget) -> LlmResult<String> {
        let (first, second) = budget.halves();
        tracing::info!(
            %model,
            pages = spec.pages,
            first_pages = first.pages,
            second_pages = second.pages,
            "Long report, generating in two parts"
        );

        let part1 = self.call(model, spec, &first, Part::FirstHalf).await?;
        let part2 = self.call(model, spec, &second, Part::SecondHalf).await?;
        Ok(format!("{part1}\n\n{part2}"))
    }

    async fn call(&self, model: &str, spec: &ReportSpec, budget: &LengthBudget, part: Part) -> LlmResult<String> {
        let prompts = report_prompts(spec, budget, part);
        let request = ChatRequest::new(model, prompts.system, prompts.user)
            .max_tokens(budget.max_tokens)
            .temperature(self.config.temperature);

        self.client.complete(request).await
    }
}
