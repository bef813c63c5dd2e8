pub mod client;
pub mod enhancer;
pub mod report;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ChatCompletion, ChatMessage, ChatRequest, OpenRouterClient, Role};
pub use enhancer::PromptEnhancer;
pub use report::ReportGenerator;
