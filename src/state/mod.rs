/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The read-only project catalog (catalog.rs)
/// - The page's modal selection and two-phase close (host.rs)

pub mod catalog;
pub mod data;
pub mod host;
