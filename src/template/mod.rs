//! Template data and the machinery that writes it
//!
//! - `files`: the blueprint (folders, file contents, dependency lists)
//! - `operation`: planned filesystem steps and how they are applied
//! - `writer`: create-or-replace writes of the source templates

pub mod files;
pub mod operation;
pub mod writer;
