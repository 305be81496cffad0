pub mod client;
pub mod error;
pub mod model;

pub use client::HangoutsApi;
pub use error::HangoutsError;
pub use model::{
    Activity, Dashboard, HangoutSuggestion, NewSuggestion, ParticipantResponse, SuggestionDraft,
    SuggestionStatus, CREATED_BY_AI,
};
