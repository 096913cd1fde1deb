//! Core business logic - the backend data service.
//!
//! Each module owns one table and exposes async functions over a
//! `DatabaseConnection`. Nothing here touches the in-memory store; the
//! planner sequences backend calls and store mutations.

/// Budget category rows
pub mod budget;
/// Calendar event rows
pub mod calendar;
/// Guest rows
pub mod guest;
/// Currency and dashboard formatting
pub mod report;
/// Task rows
pub mod todo;
/// Input checks shared by the table modules
pub mod validation;
/// Wedding rows
pub mod wedding;
