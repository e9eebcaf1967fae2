//! Compiler Bot - compile and run code from chat through a remote compiler
//!
//! This crate provides a cached registry of the languages and compilers a
//! remote compilation service supports, a builder that turns user input into
//! compile requests, an executor that submits them, and a platform-neutral
//! command layer that renders the results as chat replies.

pub mod backend;
pub mod blocklist;
pub mod bot;
pub mod cli;
pub mod commands;
pub mod config;
pub mod events;
pub mod registry;
pub mod render;
pub mod request;
pub mod stats;

pub use backend::{
    CompilationBackend, CompileError, CompileExecutor, RegistryError, TransportError,
    WandboxBackend,
};
pub use blocklist::Blocklist;
pub use bot::Bot;
pub use config::BotConfig;
pub use registry::{Catalog, CompilerEntry, CompilerRegistry, DenyList};
pub use request::{CompileRequest, CompileRequestBuilder, CompileResult};
