//! Markdown rendering with new tab link decoration.
//!
//! This module renders markdown using comrak with GFM extensions and exposes
//! one hook per link syntax. The new tab extension installs a decorator in
//! each hook that adds `target="_blank"` to every link except same-page
//! anchors.

mod extension;
mod hooks;
mod links;
mod renderer;

pub use extension::NewTabExtension;
pub use hooks::{LinkHook, LinkHooks};
pub use links::{DecoratorConfig, LinkDecorator, LinkOccurrence, LinkSyntax, NEW_WINDOW_TARGET};
pub use renderer::MarkdownRenderer;
