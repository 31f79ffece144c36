//! Turns the methods and stack traces of a JFR recording into readable text, deobfuscating the names with a
//! ProGuard/R8 mapping file.
//!
//! ```
//! use std::sync::Arc;
//! use guardmap::{LoadOptions, LogDiagnostics};
//! use jfr_retrace::{MethodRef, Renderer, RenderOptions};
//!
//! let mappings = "\
//! se.hirt.jmc.tutorial.hotmethods.Worker -> a.b:
//!     void work(int) -> a
//! ";
//! let table = guardmap::proguard::load(mappings.as_bytes(), LoadOptions::default(), &LogDiagnostics);
//! let renderer = Renderer::new(Arc::new(table));
//!
//! let text = renderer.render_method(&MethodRef::new("a/b", "a", "(I)V"), &RenderOptions::default().without_packages());
//! assert_eq!(text.as_deref(), Some("void Worker.work(int)"));
//! ```

pub mod render;

pub use render::{MethodRef, Renderer, DEFAULT_PACKAGE, TRUNCATION_MARKER, UNAVAILABLE};
pub use render::options::RenderOptions;
