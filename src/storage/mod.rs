//! Local storage for downloaded spreadsheets.
//!
//! One temporary file per in-flight request lives in the working directory.
//! Names are random, so concurrent requests never share a path and no
//! locking is needed.

pub mod temp;

pub use temp::{unique_name, TempArtifact};
