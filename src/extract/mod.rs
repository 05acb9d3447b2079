//! Module statement extraction for JavaScript/TypeScript sources.
//!
//! This module turns a file's source text into the ordered list of raw
//! dependency specifiers written in its import/require statements. The
//! graph layer never looks at syntax itself; it consumes this list and
//! resolves each specifier to a path.
//!
//! # Recognized forms
//!
//! - Static `import ... from 'module'` declarations
//! - CommonJS `require('module')` calls with a literal argument
//! - Dynamic `import('module')` calls with a literal argument
//!
//! Calls whose argument is not a string literal cannot be statically
//! resolved and are skipped. Additional statement forms can be recognized
//! by passing [`ExtractorPlugin`] callbacks to
//! [`StatementExtractor::extract_with`].
//!
//! # Example
//!
//! ```rust
//! use std::path::Path;
//! use modgraph::extract::{SourceLanguage, StatementExtractor};
//!
//! let mut extractor = StatementExtractor::new().unwrap();
//! let specifiers = extractor
//!     .extract(
//!         "import a from './a';\nconst b = require('./b');",
//!         SourceLanguage::JavaScript,
//!         Path::new("index.js"),
//!     )
//!     .unwrap();
//!
//! assert_eq!(specifiers, vec!["./a", "./b"]);
//! ```

pub mod statements;

// Re-export main types for convenience
pub use statements::{
    ExtractError, ExtractResult, ExtractorPlugin, ModuleStatement, SourceLanguage,
    StatementExtractor, SyntaxNode,
};
