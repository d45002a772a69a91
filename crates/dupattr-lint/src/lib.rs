//! dupattr Lint
//!
//! Finds attributes declared more than once on the same tag. Each tag is
//! checked on its own with a fresh set of seen names; nothing carries over
//! from one tag to the next.
//!
//! ```text
//! source → Linter::scan() → ScanResult { findings, warnings, tags_scanned }
//! ```
//!
//! # Example
//!
//! ```
//! use dupattr_lint::Linter;
//!
//! let result = Linter::scan(r#"<Foo x="1" y="2" x="3" />"#);
//! assert!(result.has_duplicates());
//! assert_eq!(result.findings[0].name, "x");
//! ```

pub mod detector;
pub mod result;

pub use detector::{check_tag, Linter, TagCheck};
pub use result::{DuplicateFinding, ScanResult, Warning, WarningKind};
