//! Reconstruction of mobile UI element hierarchies from a test-automation
//! backend that only answers flat selector queries or a single JSON dump.

pub mod backend;
pub mod cli;
pub mod element;
pub mod error;
pub mod inspector;
pub mod report;
pub mod trace;
pub mod tree;
