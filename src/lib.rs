#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod file_id;
pub mod models;
pub mod patterns;
pub mod resolver;
pub mod store;

pub use config::ProfilesConfig;
pub use error::{LookupError, LookupResult};
pub use file_id::{FileId, FileIdKind};
pub use models::CharacterRecord;
pub use patterns::{BundlePattern, Platform, PlatformProfile, patterns_for};
pub use resolver::Resolver;
pub use store::{LoadOptions, RecordStore, SharedStore, load, load_path};
