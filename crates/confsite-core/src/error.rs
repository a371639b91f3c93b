//! Error types for `confsite-core`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("`{0}` is required")]
  MissingField(&'static str),

  #[error("invalid page slug: {0:?}")]
  InvalidSlug(String),

  #[error("unknown event mode: {0:?}")]
  UnknownEventMode(String),

  #[error("unknown committee role: {0:?}")]
  UnknownCommitteeRole(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
