//! Record types shared by the batch digital object tooling.
//!
//! Inbound types ([`ArchivalObject`], [`DateRecord`], [`TechMetadataRecord`])
//! are deserialized from repository responses and input files. Outbound
//! payloads ([`DigitalObject`], [`DigitalObjectComponent`]) serialize to the
//! JSON model the repository expects on create.

pub mod archival;
pub mod date;
pub mod digital;
pub mod tech;

pub use archival::{ArchivalObject, Instance, RecordRef};
pub use date::{CollectionDateRange, DateRecord, ResolvedDate};
pub use digital::{
    DigitalObject, DigitalObjectComponent, DigitalObjectNote, FileVersion, LangMaterial, NoteType,
};
pub use tech::{TechMetadataRecord, TechMetadataTable};
