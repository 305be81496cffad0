//! Storage adapters for the profiles repository port.

pub mod document;
pub mod entity;
pub mod memory;
pub mod migrations;
pub mod sea_orm_repo;

pub use memory::InMemoryProfilesRepository;
pub use sea_orm_repo::SeaOrmProfilesRepository;
