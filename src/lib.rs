//! Classroom Database Maintenance Tools
//!
//! Provides the `reset-db` interactive reset utility and the
//! `enroll-roster` roster import utility.

pub mod config;
pub mod enroll;
pub mod reset;
