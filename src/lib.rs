//! # stackgen
//!
//! Generates a parameterized deployment bundle for a Prometheus / Grafana /
//! Alertmanager monitoring stack. Templates are rendered by replacing
//! placeholder tokens such as `<REPLACE_DB_HOST>` with values, written to a
//! directory tree, documented in a README listing every placeholder, and
//! packed into a zip archive.
//!
//! ## Usage
//!
//! ### As a Library
//!
//! ```no_run
//! use stackgen::{Bundle, GeneratorConfig, generate};
//!
//! let bundle = Bundle::monitoring_stack().with_values([("<REPLACE_DB_HOST>", "db.internal")]);
//! let mut config = GeneratorConfig::new(bundle);
//! config.output_root = "/tmp/monitoring-stack".into();
//!
//! match generate(&config) {
//!     Ok(report) => println!("wrote {} files", report.files.len()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```
//!
//! ### As a CLI Tool
//!
//! ```bash
//! # Built-in monitoring stack with example values
//! stackgen
//!
//! # Real values and a custom location
//! stackgen -o /srv/monitoring -s '<REPLACE_DB_HOST>=db.internal'
//!
//! # Show what needs replacing
//! stackgen --list=detailed
//! ```

pub mod archive;
pub mod bundle;
pub mod error;
pub mod fs_utils;
pub mod generator;
pub mod guidance;
pub mod logging;
pub mod placeholder;
pub mod template;

pub use archive::{archive_directory, list_archive};
pub use bundle::{Bundle, ConsistencyReport, check_bundle};
pub use error::{Result, StackgenError};
pub use generator::{GenerationReport, GeneratorConfig, generate, materialize, plan_outputs};
pub use guidance::{GuidanceHeader, render_guidance, write_guidance};
pub use placeholder::{Placeholder, PlaceholderSet, find_tokens, parse_binding};
pub use template::{TemplateEntry, render};
