//! Train search server.
//!
//! Answers: "which trains take me from this station to that one on this
//! date?" by merging schedule data from several sources, filtering by the
//! day the train runs, and joining departure and arrival times from the
//! official timetable.

pub mod cache;
pub mod config;
pub mod domain;
pub mod engine;
pub mod shared;
pub mod sources;
pub mod web;
