// src/types/mod.rs
pub mod job_record;
pub mod profile;

pub use job_record::JobRecord;
pub use profile::{EntryLayout, FreelancerProfile};
