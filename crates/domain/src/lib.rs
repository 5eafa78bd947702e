//! # appdriver-domain
//!
//! Pure domain model for the appdriver automation layer.
//!
//! ## Responsibilities
//! - Foundational types: session identifiers, the workspace error enum
//! - Define the closed **Platform** enumeration
//! - Define the **AutomationConfiguration** record a driver is built from
//! - Define the values that cross the capability contract: **Element**,
//!   **DeviceInfo**, **PerformActionResult**, **Point**
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod action;
pub mod configuration;
pub mod device_info;
pub mod element;
pub mod geometry;
pub mod platform;
