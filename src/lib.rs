pub mod cli;
pub mod config;
pub mod core;
pub mod listing;
pub mod llm_client;
pub mod proposal_service;
pub mod types;

pub use config::Settings;
pub use crate::core::{JobExtractor, QuestionExtractor};
pub use listing::ListingScanner;
pub use llm_client::LlmClient;
pub use proposal_service::ProposalService;
pub use types::{FreelancerProfile, JobRecord};
