// src/process/mod.rs

pub mod group;
pub mod prefecture;
pub mod records;

pub use group::{group, GroupedRecords};
pub use records::{PostalRecord, Records};
