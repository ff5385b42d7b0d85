// src/services/mod.rs

pub mod registry;

pub use registry::{RegistryError, SessionRegistry};
