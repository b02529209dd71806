//! buslink Application Orchestration Layer
//!
//! This crate contains the setup use cases: the orchestrator that drives the
//! account provisioning flow and the device identifier resolver.

pub mod usecases;

pub use usecases::{ResolveDeviceId, SetupFlowError, SetupOptions, SetupOrchestrator};
