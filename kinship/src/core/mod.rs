//! Core directory facade

mod directory;

pub use directory::Directory;
