//! Core types and trait definitions for the conference site.
//!
//! This crate is deliberately free of HTTP and database dependencies. It owns
//! the record shapes, the create/patch payloads accepted for each resource, and
//! the [`store::SiteStore`] abstraction every backend implements.

pub mod committee;
pub mod contact;
pub mod date;
pub mod error;
pub mod fee;
pub mod page;
pub mod settings;
pub mod speaker;
pub mod store;
pub mod validate;

pub use error::{Error, Result};

/// Server-assigned identifier shared by every list resource.
pub type RecordId = i64;
