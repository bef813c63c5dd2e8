pub mod catalog;
pub mod prompts;

pub use catalog::{profile_for, Category, ExpertProfile, PROFILES};
pub use prompts::{Part, PromptPair};
