use std::num::NonZeroU32;
use std::sync::Arc;

use governor::{clock::DefaultClock, state::keyed::DashMapStateStore, Quota, RateLimiter};

use crate::ai::{ChatCompletion, OpenRouterClient, PromptEnhancer, ReportGenerator};
use crate::common::AppConfig;
use crate::generators::DocxGenerator;

pub type KeyedRateLimiter = Arc<RateLimiter<String, DashMapStateStore<String>, DefaultClock>>;

#[derive(Clone)]
pub struct ApiState {
    pub exporter: Arc<DocxGenerator>,
    pub enhancer: Arc<PromptEnhancer>,
    pub generator: Arc<ReportGenerator>,
    pub rate_limiter: KeyedRateLimiter,
    pub config: Arc<AppConfig>,
}

impl ApiState {
    /// State wired to OpenRouter, one client per application title.
    pub fn new(config: AppConfig) -> Self {
        let enhancer_client = OpenRouterClient::new(&config.llm, config.llm.enhancer_title.clone());
        let generator_client = OpenRouterClient::new(&config.llm, config.llm.generator_title.clone());

        Self::with_backends(config, Arc::new(enhancer_client), Arc::new(generator_client))
    }

    pub fn with_backends(
        config: AppConfig,
        enhancer_backend: Arc<dyn ChatCompletion>,
        generator_backend: Arc<dyn ChatCompletion>,
    ) -> Self {
        let enhancer = PromptEnhancer::new(enhancer_backend, config.enhancer.clone());
        let generator = ReportGenerator::new(generator_backend, config.generator.clone());

        ApiState {
            exporter: Arc::new(DocxGenerator::new()),
            enhancer: Arc::new(enhancer),
            generator: Arc::new(generator),
            rate_limiter: create_rate_limiter(&config),
            config: Arc::new(config),
        }
    }
}

fn create_rate_limiter(config: &AppConfig) -> KeyedRateLimiter {
    let per_minute = NonZeroU32::new(config.server.rate_limit_per_minute).unwrap_or(NonZeroU32::MIN);
    let burst = NonZeroU32::new(config.server.rate_limit_burst).unwrap_or(NonZeroU32::MIN);
    let quota = Quota::per_minute(per_minute).allow_burst(burst);

    Arc::new(RateLimiter::dashmap_with_clock(quota, &DefaultClock::default()))
}
