//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation and repository calls into use-case level APIs.
//! - Keep front ends decoupled from storage details.

pub mod attendance_service;
