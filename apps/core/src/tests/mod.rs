//! Test Module
//!
//! Comprehensive test suite for the CarePal backend.
//!
//! ## Test Categories
//! - `brain_tests`: Safety, vitals, and emotion classification plus composition
//! - `actor_tests`: Speech, generator, store, and notifier collaborators
//! - `supervisor_tests`: Supervisor orchestration with mock collaborators
//! - `config_tests`: Environment-driven configuration
//! - `integration_tests`: Full request flows end to end


pub mod brain_tests;
