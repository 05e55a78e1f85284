//! Parsing of user-supplied task and environment specifications

pub mod environment;
pub mod tasks;
