//! Process-level services

pub mod logging;
