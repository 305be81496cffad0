pub mod client;
pub mod error;
pub mod model;

pub use client::ProfilesApi;
pub use error::ProfilesError;
pub use model::{ClassSchedule, ProfilePatch, UserProfile, UserSummary};
