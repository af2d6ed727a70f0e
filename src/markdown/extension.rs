//! Installs new tab decoration into the markdown pipeline.

use std::sync::Arc;

use super::MarkdownRenderer;
use super::hooks::LinkHook;
use super::links::{DecoratorConfig, LinkDecorator, LinkSyntax};

/// Modifies HTML output to open links in a new tab.
///
/// One decorator, sharing one configuration, is registered in the hook slot
/// of every link syntax: `link`, `reference`, `short_reference`, `autolink`
/// and `automail`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewTabExtension {
    config: DecoratorConfig,
}

impl NewTabExtension {
    pub fn new(config: DecoratorConfig) -> Self {
        Self { config }
    }

    /// Registers decorator for all link syntaxes, replacing existing hooks.
    pub fn extend(&self, renderer: &mut MarkdownRenderer<'_>) {
        let decorator: Arc<dyn LinkHook> = Arc::new(LinkDecorator::new(self.config));

        for syntax in LinkSyntax::ALL {
            renderer.hooks_mut().register(syntax, Arc::clone(&decorator));
        }
    }
}
