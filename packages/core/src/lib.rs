//! Directory reconciliation engine for roamer.
//!
//! This crate compares an original directory snapshot against an edited one and
//! compiles the ordered list of filesystem commands that turns the former into
//! the latter:
//!
//! * Entries are matched by content digest, not by name
//! * Content reappearing under a new name becomes a copy
//! * Content vanishing from its name becomes a trash candidate
//! * Digests unknown to the original directory are resolved through a [`Record`]
//!
//! The crate performs no I/O of its own. Snapshots and records are built by the
//! caller and commands are executed through a [`CommandExecutor`].
//!
//! # Example
//!
//! ```rust,ignore
//! use roamer_core::{Engine, listing};
//!
//! let edit = listing::parse(&edited_text, original.base().path.clone())?;
//! let mut engine = Engine::new(&original, &edit);
//! engine.compile_commands(&record_source)?;
//!
//! println!("{}", engine.commands_to_str());
//! let results = engine.run_commands(&mut executor)?;
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod command;
mod engine;
mod entry;
mod error;
pub mod listing;
mod record;
mod snapshot;

pub use command::{Command, CommandExecutor, CommandKind};
pub use engine::Engine;
pub use entry::{BaseDir, Digest, DirRole, Entry};
pub use error::{EngineError, ListingError, SnapshotError};
pub use record::{Record, RecordSource};
pub use snapshot::DirectorySnapshot;
