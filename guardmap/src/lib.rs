//! Crate for reading ProGuard/R8 mapping files and looking up the original names of obfuscated classes, packages
//! and methods.
//!
//! Reading is done by the functions of the [`proguard`] module. They produce a [`MappingTable`], which is immutable
//! afterwards and can be shared between threads (for example wrapped in an [`Arc`][std::sync::Arc]).
//!
//! Loading never fails: a broken or missing mapping file results in an empty table, which performs no
//! deobfuscation at all. Problems are reported to a [`Diagnostics`] sink the caller provides.
//!
//! Internally all class and package names are stored with `/` as separator (`java/lang/Object`), the form that's
//! found in descriptors and constant pools. Lookups accept both forms.

mod lines;
mod names;

pub mod diagnostics;
pub mod proguard;
pub mod remapper;
pub mod table;

pub use diagnostics::{Diagnostic, Diagnostics, LogDiagnostics};
pub use proguard::LoadOptions;
pub use remapper::ClassRemapper;
pub use table::{ClassMembers, MappingTable};
