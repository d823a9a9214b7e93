//! External service interactions
//!
//! Persistence of the entry list lives here, behind the `EntryStorage` trait.

pub mod storage;

pub use storage::{EntryStorage, JsonFileStorage};
