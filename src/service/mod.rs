//! String service: analysis, storage, and filtering behind one API shared by HTTP and MCP.

mod strings;
pub mod types;

pub use strings::{StringApi, StringService};
pub use types::{HealthSnapshot, ListOutcome, NaturalLanguageOutcome, ServiceError};
