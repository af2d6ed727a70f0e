//! Open markdown links in a new tab.

mod config;
mod markdown;

pub use config::Config;
pub use markdown::{
    DecoratorConfig, LinkDecorator, LinkHook, LinkHooks, LinkOccurrence, LinkSyntax,
    MarkdownRenderer, NEW_WINDOW_TARGET, NewTabExtension,
};
