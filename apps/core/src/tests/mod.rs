//! Test Module
//!
//! Cross-module test suite for the BizDesk core.
//!
//! ## Test Categories
//! - `assistant_tests`: end-to-end chat classification behaviour
//! - `reminders_tests`: snapshot loading and reminder scanning

pub mod assistant_tests;
