//! Storage adapters for the suggestions repository port.

pub mod document;
pub mod entity;
pub mod memory;
pub mod migrations;
pub mod sea_orm_repo;

pub use memory::InMemorySuggestionsRepository;
pub use sea_orm_repo::SeaOrmSuggestionsRepository;
