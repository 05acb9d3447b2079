//! Statement extraction using tree-sitter for JavaScript/TypeScript.
//!
//! This module parses source text and collects the raw dependency
//! specifiers written in import and require statements, in the order the
//! statements appear in the syntax tree.

use std::path::Path;

use thiserror::Error;
use tree_sitter::Parser;

/// Errors that can occur during statement extraction.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The source text is not valid module syntax.
    #[error("Failed to parse file: {path}")]
    Parse { path: String },

    /// Tree-sitter language initialization failed.
    #[error("Tree-sitter language initialization failed")]
    LanguageInit,
}

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Language type for source parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    JavaScript,
    TypeScript,
}

impl SourceLanguage {
    /// Determine language from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" | "jsx" => Some(SourceLanguage::JavaScript),
            "ts" | "mts" | "cts" | "tsx" => Some(SourceLanguage::TypeScript),
            _ => None,
        }
    }

    /// Determine language from a file path.
    ///
    /// Files with an unknown or missing extension are parsed as
    /// JavaScript, so extensionless module files still work.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .unwrap_or(SourceLanguage::JavaScript)
    }
}

/// A view of one node in the parsed syntax tree.
///
/// Wraps a tree-sitter node together with the source text it was parsed
/// from, so callers (including [`ExtractorPlugin`]s) can inspect node
/// kinds and read back the underlying text.
#[derive(Clone, Copy)]
pub struct SyntaxNode<'a> {
    node: tree_sitter::Node<'a>,
    source: &'a str,
}

impl<'a> SyntaxNode<'a> {
    fn new(node: tree_sitter::Node<'a>, source: &'a str) -> Self {
        Self { node, source }
    }

    /// The grammar kind of this node (e.g. `"import_statement"`,
    /// `"call_expression"`, `"string"`).
    pub fn kind(&self) -> &'static str {
        self.node.kind()
    }

    /// The source text this node spans.
    pub fn text(&self) -> Option<&'a str> {
        self.source.get(self.node.start_byte()..self.node.end_byte())
    }

    /// The 1-indexed line this node starts on.
    pub fn start_line(&self) -> usize {
        self.node.start_position().row + 1
    }

    /// The child occupying the given grammar field, if present.
    pub fn child_by_field(&self, field: &str) -> Option<SyntaxNode<'a>> {
        self.node
            .child_by_field_name(field)
            .map(|n| Self::new(n, self.source))
    }

    /// All children of this node, including anonymous tokens.
    pub fn children(&self) -> Vec<SyntaxNode<'a>> {
        let mut cursor = self.node.walk();
        self.node
            .children(&mut cursor)
            .map(|n| Self::new(n, self.source))
            .collect()
    }

    /// Named children only (skips punctuation tokens).
    pub fn named_children(&self) -> Vec<SyntaxNode<'a>> {
        let mut cursor = self.node.walk();
        self.node
            .named_children(&mut cursor)
            .map(|n| Self::new(n, self.source))
            .collect()
    }

    /// The literal value of a string node, with quotes removed.
    ///
    /// Returns `None` for any node that is not a plain string literal;
    /// template strings do not count, their value is not static.
    pub fn string_value(&self) -> Option<String> {
        if self.kind() != "string" {
            return None;
        }
        let text = self.text()?;
        let trimmed = text
            .trim_start_matches(['"', '\''])
            .trim_end_matches(['"', '\'']);
        Some(trimmed.to_string())
    }
}

impl std::fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntaxNode")
            .field("kind", &self.kind())
            .field("line", &self.start_line())
            .finish()
    }
}

/// The closed set of statement forms the extractor recognizes.
///
/// Every visited syntax node is classified into exactly one of these
/// variants; consumers match exhaustively, so adding a variant forces
/// every call site to handle it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleStatement {
    /// Static import declaration: `import ... from 'module'`.
    Import { source: String },
    /// CommonJS require with a literal argument: `require('module')`.
    Require { source: String },
    /// Dynamic import with a literal argument: `import('module')`.
    DynamicImport { source: String },
    /// Any other node, including require/import calls whose argument is
    /// not a string literal and therefore cannot be statically resolved.
    Other,
}

impl ModuleStatement {
    /// Classifies a syntax node.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::path::Path;
    /// use modgraph::extract::{ModuleStatement, SourceLanguage, StatementExtractor};
    ///
    /// let mut extractor = StatementExtractor::new().unwrap();
    /// let specifiers = extractor
    ///     .extract("require('./util');", SourceLanguage::JavaScript, Path::new("x.js"))
    ///     .unwrap();
    /// assert_eq!(specifiers, vec!["./util"]);
    /// ```
    pub fn classify(node: &SyntaxNode<'_>) -> Self {
        match node.kind() {
            "import_statement" => {
                match node.child_by_field("source").and_then(|s| s.string_value()) {
                    Some(source) => ModuleStatement::Import { source },
                    None => ModuleStatement::Other,
                }
            }
            "call_expression" => Self::classify_call(node),
            _ => ModuleStatement::Other,
        }
    }

    /// Classifies a call expression as require, dynamic import, or other.
    fn classify_call(node: &SyntaxNode<'_>) -> Self {
        let Some(callee) = node.child_by_field("function") else {
            return ModuleStatement::Other;
        };

        // Only bare `require(...)` counts; `obj.require(...)` does not.
        let is_require = callee.kind() == "identifier" && callee.text() == Some("require");
        // Dynamic `import(...)` keeps its own node kind in the grammar.
        let is_dynamic_import = callee.kind() == "import";

        if !is_require && !is_dynamic_import {
            return ModuleStatement::Other;
        }

        let first_arg = node
            .child_by_field("arguments")
            .map(|args| args.named_children())
            .and_then(|args| args.into_iter().next());

        match first_arg.and_then(|arg| arg.string_value()) {
            Some(source) if is_require => ModuleStatement::Require { source },
            Some(source) => ModuleStatement::DynamicImport { source },
            // Non-literal argument, skipped silently.
            None => ModuleStatement::Other,
        }
    }

    /// The raw specifier carried by this statement, if any.
    pub fn specifier(&self) -> Option<&str> {
        match self {
            ModuleStatement::Import { source }
            | ModuleStatement::Require { source }
            | ModuleStatement::DynamicImport { source } => Some(source),
            ModuleStatement::Other => None,
        }
    }
}

/// A callback that contributes additional raw specifiers.
///
/// Plugins are invoked once per visited syntax node, after the built-in
/// statement checks for that node, and their contributions are appended
/// in registration order. Each extraction call receives its own plugin
/// list; there is no shared registry.
pub trait ExtractorPlugin {
    /// Returns the raw specifiers this plugin recognizes on `node`.
    fn collect(&self, node: &SyntaxNode<'_>) -> Vec<String>;
}

impl<F> ExtractorPlugin for F
where
    F: Fn(&SyntaxNode<'_>) -> Vec<String>,
{
    fn collect(&self, node: &SyntaxNode<'_>) -> Vec<String> {
        self(node)
    }
}

/// Extractor for raw dependency specifiers in JavaScript/TypeScript sources.
///
/// Holds one tree-sitter parser per supported grammar so repeated
/// extractions reuse parser state.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use modgraph::extract::{SourceLanguage, StatementExtractor};
///
/// let mut extractor = StatementExtractor::new().unwrap();
/// let specifiers = extractor
///     .extract(
///         "import { app } from './app';\nconst fs = require('fs');",
///         SourceLanguage::JavaScript,
///         Path::new("index.js"),
///     )
///     .unwrap();
///
/// assert_eq!(specifiers, vec!["./app", "fs"]);
/// ```
pub struct StatementExtractor {
    js_parser: Parser,
    ts_parser: Parser,
}

impl StatementExtractor {
    /// Creates a new extractor with both grammars loaded.
    pub fn new() -> ExtractResult<Self> {
        let mut js_parser = Parser::new();
        js_parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .map_err(|_| ExtractError::LanguageInit)?;

        let mut ts_parser = Parser::new();
        ts_parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            .map_err(|_| ExtractError::LanguageInit)?;

        Ok(Self {
            js_parser,
            ts_parser,
        })
    }

    /// Extracts raw specifiers from source text.
    ///
    /// Specifiers appear in syntax-tree pre-order, which matches the
    /// order the statements are written in the file.
    ///
    /// # Arguments
    ///
    /// * `source` - The module source text
    /// * `language` - Which grammar to parse with
    /// * `path` - The file path, used only for error reporting
    ///
    /// # Returns
    ///
    /// The ordered list of raw specifiers, or [`ExtractError::Parse`]
    /// when the source is not valid module syntax.
    pub fn extract(
        &mut self,
        source: &str,
        language: SourceLanguage,
        path: &Path,
    ) -> ExtractResult<Vec<String>> {
        self.extract_with(source, language, path, &[])
    }

    /// Extracts raw specifiers with an explicit plugin list.
    ///
    /// For each visited node the built-in checks run first, then each
    /// plugin in the order given.
    pub fn extract_with(
        &mut self,
        source: &str,
        language: SourceLanguage,
        path: &Path,
        plugins: &[&dyn ExtractorPlugin],
    ) -> ExtractResult<Vec<String>> {
        let parser = match language {
            SourceLanguage::JavaScript => &mut self.js_parser,
            SourceLanguage::TypeScript => &mut self.ts_parser,
        };

        let parse_error = || ExtractError::Parse {
            path: path.display().to_string(),
        };

        let tree = parser.parse(source, None).ok_or_else(parse_error)?;

        // tree-sitter recovers from syntax errors instead of failing the
        // parse; an error node anywhere means the file is not valid
        // module code and cannot yield a trustworthy dependency list.
        if tree.root_node().has_error() {
            return Err(parse_error());
        }

        let mut specifiers = Vec::new();
        visit_node(
            SyntaxNode::new(tree.root_node(), source),
            plugins,
            &mut specifiers,
        );

        Ok(specifiers)
    }
}

/// Recursively visits nodes, collecting specifiers in pre-order.
fn visit_node(node: SyntaxNode<'_>, plugins: &[&dyn ExtractorPlugin], out: &mut Vec<String>) {
    match ModuleStatement::classify(&node) {
        ModuleStatement::Import { source }
        | ModuleStatement::Require { source }
        | ModuleStatement::DynamicImport { source } => out.push(source),
        ModuleStatement::Other => {}
    }

    for plugin in plugins {
        out.extend(plugin.collect(&node));
    }

    for child in node.children() {
        visit_node(child, plugins, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_js(source: &str) -> ExtractResult<Vec<String>> {
        let mut extractor = StatementExtractor::new().unwrap();
        extractor.extract(source, SourceLanguage::JavaScript, Path::new("test.js"))
    }

    #[test]
    fn test_static_import() {
        let specifiers = extract_js("import x from './a';").unwrap();
        assert_eq!(specifiers, vec!["./a"]);
    }

    #[test]
    fn test_import_forms() {
        let source = r#"
            import def from './default';
            import { named } from './named';
            import * as ns from './namespace';
            import './side-effect';
        "#;
        let specifiers = extract_js(source).unwrap();
        assert_eq!(
            specifiers,
            vec!["./default", "./named", "./namespace", "./side-effect"]
        );
    }

    #[test]
    fn test_require_literal() {
        let specifiers = extract_js("const b = require('./b');").unwrap();
        assert_eq!(specifiers, vec!["./b"]);
    }

    #[test]
    fn test_dynamic_require_skipped() {
        let source = r#"
            import x from './a';
            require('./b');
            require(dynamicVar);
        "#;
        let specifiers = extract_js(source).unwrap();
        assert_eq!(specifiers, vec!["./a", "./b"]);
    }

    #[test]
    fn test_template_require_skipped() {
        let specifiers = extract_js("require(`./template`);").unwrap();
        assert!(specifiers.is_empty());
    }

    #[test]
    fn test_member_call_skipped() {
        let specifiers = extract_js("obj.require('./not-a-dep');").unwrap();
        assert!(specifiers.is_empty());
    }

    #[test]
    fn test_require_without_arguments_skipped() {
        let specifiers = extract_js("require();").unwrap();
        assert!(specifiers.is_empty());
    }

    #[test]
    fn test_require_first_argument_only() {
        // Only the first argument is statically resolvable.
        let specifiers = extract_js("require('./x', extra);").unwrap();
        assert_eq!(specifiers, vec!["./x"]);

        let specifiers = extract_js("require(flag, './y');").unwrap();
        assert!(specifiers.is_empty());
    }

    #[test]
    fn test_dynamic_import_literal() {
        let source = r#"
            const page = import('./page');
            import(where);
        "#;
        let specifiers = extract_js(source).unwrap();
        assert_eq!(specifiers, vec!["./page"]);
    }

    #[test]
    fn test_order_is_source_order() {
        let source = r#"
            import first from './first';
            const second = require('./second');
            import third from './third';
        "#;
        let specifiers = extract_js(source).unwrap();
        assert_eq!(specifiers, vec!["./first", "./second", "./third"]);
    }

    #[test]
    fn test_nested_require() {
        let source = r#"
            function load() {
                if (cond) {
                    return require('./lazy');
                }
            }
        "#;
        let specifiers = extract_js(source).unwrap();
        assert_eq!(specifiers, vec!["./lazy"]);
    }

    #[test]
    fn test_package_specifiers_collected() {
        // Non-relative specifiers are still extracted; whether they
        // resolve to files is the graph's concern.
        let specifiers = extract_js("import React from 'react';").unwrap();
        assert_eq!(specifiers, vec!["react"]);
    }

    #[test]
    fn test_invalid_syntax_fails() {
        let result = extract_js("import { from './broken'");
        assert!(matches!(result, Err(ExtractError::Parse { .. })));
    }

    #[test]
    fn test_parse_error_carries_path() {
        let mut extractor = StatementExtractor::new().unwrap();
        let err = extractor
            .extract("import {", SourceLanguage::JavaScript, Path::new("src/bad.js"))
            .unwrap_err();
        assert!(err.to_string().contains("src/bad.js"));
    }

    #[test]
    fn test_typescript_source() {
        let source = r#"
            import type { Config } from './config';
            import { start } from './server';

            const port: number = 3000;
        "#;
        let mut extractor = StatementExtractor::new().unwrap();
        let specifiers = extractor
            .extract(source, SourceLanguage::TypeScript, Path::new("main.ts"))
            .unwrap();
        assert_eq!(specifiers, vec!["./config", "./server"]);
    }

    #[test]
    fn test_export_from_not_collected() {
        // Re-exports are not import declarations.
        let specifiers = extract_js("export { thing } from './re-export';").unwrap();
        assert!(specifiers.is_empty());
    }

    #[test]
    fn test_plugin_contributions_appended_in_order() {
        let first = |node: &SyntaxNode<'_>| -> Vec<String> {
            if node.kind() == "import_statement" {
                vec!["plugin-one".to_string()]
            } else {
                Vec::new()
            }
        };
        let second = |node: &SyntaxNode<'_>| -> Vec<String> {
            if node.kind() == "import_statement" {
                vec!["plugin-two".to_string()]
            } else {
                Vec::new()
            }
        };

        let mut extractor = StatementExtractor::new().unwrap();
        let plugins: [&dyn ExtractorPlugin; 2] = [&first, &second];
        let specifiers = extractor
            .extract_with(
                "import a from './a';",
                SourceLanguage::JavaScript,
                Path::new("test.js"),
                &plugins,
            )
            .unwrap();

        // Built-in result first, then plugins in registration order.
        assert_eq!(specifiers, vec!["./a", "plugin-one", "plugin-two"]);
    }

    #[test]
    fn test_plugin_sees_every_node() {
        let counter = std::cell::Cell::new(0usize);
        let count_strings = |node: &SyntaxNode<'_>| -> Vec<String> {
            if node.kind() == "string" {
                counter.set(counter.get() + 1);
            }
            Vec::new()
        };

        let mut extractor = StatementExtractor::new().unwrap();
        let plugins: [&dyn ExtractorPlugin; 1] = [&count_strings];
        extractor
            .extract_with(
                "import a from './a';\nconst s = 'plain';",
                SourceLanguage::JavaScript,
                Path::new("test.js"),
                &plugins,
            )
            .unwrap();

        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn test_classify_other_for_plain_code() {
        let mut extractor = StatementExtractor::new().unwrap();
        let seen = std::cell::RefCell::new(Vec::new());
        let record = |node: &SyntaxNode<'_>| -> Vec<String> {
            if node.kind() == "call_expression" {
                seen.borrow_mut()
                    .push(ModuleStatement::classify(node));
            }
            Vec::new()
        };

        let plugins: [&dyn ExtractorPlugin; 1] = [&record];
        extractor
            .extract_with(
                "console.log('hi');",
                SourceLanguage::JavaScript,
                Path::new("test.js"),
                &plugins,
            )
            .unwrap();

        assert_eq!(seen.borrow().as_slice(), &[ModuleStatement::Other]);
    }

    #[test]
    fn test_source_language_from_extension() {
        assert_eq!(
            SourceLanguage::from_extension("js"),
            Some(SourceLanguage::JavaScript)
        );
        assert_eq!(
            SourceLanguage::from_extension("JSX"),
            Some(SourceLanguage::JavaScript)
        );
        assert_eq!(
            SourceLanguage::from_extension("ts"),
            Some(SourceLanguage::TypeScript)
        );
        assert_eq!(
            SourceLanguage::from_extension("tsx"),
            Some(SourceLanguage::TypeScript)
        );
        assert_eq!(SourceLanguage::from_extension("rs"), None);
    }

    #[test]
    fn test_source_language_from_path_defaults_to_javascript() {
        assert_eq!(
            SourceLanguage::from_path(Path::new("src/main")),
            SourceLanguage::JavaScript
        );
        assert_eq!(
            SourceLanguage::from_path(Path::new("src/app.ts")),
            SourceLanguage::TypeScript
        );
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let mut extractor = StatementExtractor::new().unwrap();
        for _ in 0..3 {
            let specifiers = extractor
                .extract(
                    "import a from './a';",
                    SourceLanguage::JavaScript,
                    Path::new("test.js"),
                )
                .unwrap();
            assert_eq!(specifiers, vec!["./a"]);
        }
    }
}
