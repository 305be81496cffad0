pub mod catalog;
pub mod error;
pub mod generator;
pub mod lifecycle;
pub mod planner;
pub mod repo;
pub mod service;
