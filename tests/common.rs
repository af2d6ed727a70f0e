//! Shared test utilities for integration tests.
//!
//! Provides renderer construction and markdown fixture helpers used across
//! multiple test files.

#![allow(dead_code)]

use anyhow::Result;
use markdown_newtab::{DecoratorConfig, MarkdownRenderer, NewTabExtension};
use std::path::{Path, PathBuf};

/// Creates renderer with new tab extension installed.
///
/// # Arguments
///
/// * `external_only`: Only decorate links containing `http`
pub fn new_tab_renderer(external_only: bool) -> MarkdownRenderer<'static> {
    let extension = NewTabExtension::new(DecoratorConfig::new(external_only));
    MarkdownRenderer::with_extension(&extension)
}

/// Renders markdown and strips trailing newline for exact comparison.
///
/// # Errors
///
/// Returns error if rendering fails
pub fn render(renderer: &MarkdownRenderer<'_>, markdown: &str) -> Result<String> {
    Ok(renderer.render(markdown)?.trim_end().to_string())
}

/// Writes file, creating parent directories as needed.
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_file(dir: &Path, path: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(path);
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&file_path, content)?;
    Ok(file_path)
}
