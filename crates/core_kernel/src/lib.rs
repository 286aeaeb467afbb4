//! Core Kernel - Foundational types for the Section 75 claims system
//!
//! This crate provides the building blocks shared by the domain and its adapters:
//! - Strongly-typed identifiers
//! - Port infrastructure for swappable persistence adapters

pub mod identifiers;
pub mod ports;

pub use identifiers::ClaimId;
pub use ports::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError};
