pub mod ai;
pub mod api;
pub mod common;
pub mod generators;
pub mod metrics;
pub mod models;
pub mod templates;

// Re-export commonly used types
pub use ai::{ChatCompletion, OpenRouterClient, PromptEnhancer, ReportGenerator};
pub use api::{configure_routes, ApiState};
pub use common::AppConfig;
pub use generators::DocxGenerator;
pub use models::{EnhanceRequest, ExportRequest, GenerateRequest, GenerationResult, Template};
