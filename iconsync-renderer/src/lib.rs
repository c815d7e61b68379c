//! # iconsync-renderer
//!
//! Turns an ingested icon catalog into a formatted Rust icon package: one
//! Tera macro and one Rust function per icon, plus a deduplicated rollup of
//! every canonical name and alias.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use iconsync_core::{CodegenOptions, IconDefinition};
//! use iconsync_renderer::Generator;
//!
//! fn generate(icons: &[IconDefinition]) {
//!     if let Ok(generator) = Generator::new(&CodegenOptions::default()) {
//!         if let Ok(package) = generator.generate(icons, Some("0.460.0")) {
//!             for artifact in &package.artifacts {
//!                 println!("{}: {} bytes", artifact.relative_path.display(), artifact.contents.len());
//!             }
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod format;
pub mod markup;
pub mod rollup;

pub use context::IconContext;
pub use engine::{Artifact, GeneratedPackage, Generator, SourceFragment, GENERATED_FILES};
pub use error::RenderError;
pub use format::{format_rust, format_template};
pub use markup::{extract_body, SvgParts};
pub use rollup::{assemble, RollupSymbol};
