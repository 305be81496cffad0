pub mod generator;
pub mod storage;
