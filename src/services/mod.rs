//! Long-running services composed from portal operations.

pub mod harvest;
