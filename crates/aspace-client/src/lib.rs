//! ArchivesSpace repository access.
//!
//! [`RepositoryClient`] is the seam the batch driver talks through;
//! [`HttpRepositoryClient`] implements it over the REST API with a single
//! session per run.

mod client;
mod error;

pub use client::{
    ClientConfig, CreateOutcome, HttpRepositoryClient, RepositoryClient, SESSION_HEADER,
    classify_create,
};
pub use error::{ClientError, Result};
