//! Extension points invoked once per recognized link.

use anyhow::{Result, bail};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::links::{LinkOccurrence, LinkSyntax};

/// Interception point for anchors built by the markdown pipeline.
///
/// Receives the pipeline's construction result for one link and returns the
/// occurrence to serialize. `None` in means the pipeline did not build an
/// element; `None` out leaves the link exactly as the parser rendered it.
pub trait LinkHook: Send + Sync {
    fn handle(
        &self,
        syntax: LinkSyntax,
        occurrence: Option<LinkOccurrence>,
    ) -> Option<LinkOccurrence>;
}

impl<F> LinkHook for F
where
    F: Fn(LinkSyntax, Option<LinkOccurrence>) -> Option<LinkOccurrence> + Send + Sync,
{
    fn handle(
        &self,
        syntax: LinkSyntax,
        occurrence: Option<LinkOccurrence>,
    ) -> Option<LinkOccurrence> {
        self(syntax, occurrence)
    }
}

/// Hook registry with one replaceable slot per link syntax.
#[derive(Clone, Default)]
pub struct LinkHooks {
    slots: HashMap<LinkSyntax, Arc<dyn LinkHook>>,
}

impl LinkHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs hook for syntax, replacing any previous one.
    pub fn register(&mut self, syntax: LinkSyntax, hook: Arc<dyn LinkHook>) {
        self.slots.insert(syntax, hook);
    }

    /// Installs hook under its slot name (`link`, `reference`,
    /// `short_reference`, `autolink`, `automail`).
    ///
    /// # Errors
    ///
    /// Returns error if name does not match a link syntax
    pub fn register_by_name(&mut self, name: &str, hook: Arc<dyn LinkHook>) -> Result<()> {
        let Some(syntax) = LinkSyntax::from_name(name) else {
            bail!("Unknown link hook: {}", name);
        };
        self.register(syntax, hook);
        Ok(())
    }

    pub fn get(&self, syntax: LinkSyntax) -> Option<&Arc<dyn LinkHook>> {
        self.slots.get(&syntax)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Runs hook registered for syntax. Empty slots pass the occurrence through.
    pub fn run(
        &self,
        syntax: LinkSyntax,
        occurrence: Option<LinkOccurrence>,
    ) -> Option<LinkOccurrence> {
        match self.slots.get(&syntax) {
            Some(hook) => hook.handle(syntax, occurrence),
            None => occurrence,
        }
    }
}

impl fmt::Debug for LinkHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.slots.keys().map(|syntax| syntax.name()).collect();
        names.sort_unstable();
        f.debug_struct("LinkHooks").field("slots", &names).finish()
    }
}
