//! Domains module containing the server's business logic.
//!
//! Only the tools domain exists: a registry of named tools, the dispatcher
//! that validates and runs them, and the tool definitions themselves.

pub mod tools;
