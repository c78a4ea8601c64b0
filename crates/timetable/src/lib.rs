//! A small server-rendered admin site for a university timetable: teachers,
//! rooms, disciplines, student groups and the lessons that tie them together.

pub mod config;
pub mod db;
pub mod error;
pub mod server;
pub mod types;
