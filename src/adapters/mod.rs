// Adapters layer: concrete implementations for external systems (food database, filesystem).

pub mod storage;
pub mod usda;
