//! Navigation resolution and site checks for docsite.
//!
//! This crate provides:
//! - [`PageSource`] trait with [`FsSource`] and [`MockSource`] (behind the
//!   `mock` feature) implementations
//! - [`NavBuilder`]: resolves the declared `nav` of a
//!   [`Config`](docsite_config::Config) into a [`Navigation`] tree, or
//!   generates one from the docs directory
//! - [`check`]: navigation plus orphan-page and extra-asset checks
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use docsite_config::Config;
//! use docsite_nav::{FsSource, check};
//!
//! let config = Config::load(None, None)?;
//! let source = FsSource::new(config.paths.docs_dir.clone());
//! let report = check(&config, &source)?;
//! print!("{}", report.navigation);
//! # Ok(())
//! # }
//! ```

mod builder;
mod check;
mod error;
mod fs;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod navigation;
mod page;
mod source;

pub use builder::{NavBuilder, Resolution};
pub use check::{CheckReport, check};
pub use error::NavError;
pub use fs::FsSource;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockSource;
pub use navigation::{NavItem, NavKind, Navigation};
pub use page::{extract_title, page_url, title_from_path};
pub use source::{PageSource, SourceError, is_markdown};
