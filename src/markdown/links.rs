//! New tab decoration for rendered anchors.

use std::fmt;

use super::hooks::LinkHook;

/// Value written to the `target` attribute of decorated anchors.
pub const NEW_WINDOW_TARGET: &str = "_blank";

/// Link syntaxes recognized by the markdown pipeline.
///
/// Each syntax owns one hook slot in [`LinkHooks`](super::LinkHooks),
/// addressed by the name returned from [`LinkSyntax::name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkSyntax {
    /// Inline link: `[text](url "title")`
    Link,
    /// Full or collapsed reference: `[text][label]`, `[text][]`
    Reference,
    /// Short reference: `[label]`
    ShortReference,
    /// Autolink: `<https://duck.co>` or a bare GFM URL
    Autolink,
    /// Automatic mail link: `<address@example.com>`
    Automail,
}

impl LinkSyntax {
    /// All syntaxes, in hook registration order.
    pub const ALL: [LinkSyntax; 5] = [
        LinkSyntax::Link,
        LinkSyntax::Reference,
        LinkSyntax::ShortReference,
        LinkSyntax::Autolink,
        LinkSyntax::Automail,
    ];

    /// Returns hook slot name for this syntax.
    pub fn name(self) -> &'static str {
        match self {
            LinkSyntax::Link => "link",
            LinkSyntax::Reference => "reference",
            LinkSyntax::ShortReference => "short_reference",
            LinkSyntax::Autolink => "autolink",
            LinkSyntax::Automail => "automail",
        }
    }

    /// Looks up syntax by hook slot name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|syntax| syntax.name() == name)
    }

    /// Classifies a parsed link by the syntax that produced it.
    ///
    /// The parser reports every link form as the same node, so the syntax is
    /// recovered from the link's source text when available: bracketed source
    /// is an inline or reference link, angle brackets or bare link text an
    /// autolink. Otherwise the url and link text decide: text equal to url, or
    /// to url without its `http://` prefix, is an autolink, `mailto:`
    /// followed by the text is an automatic mail link,
    /// anything else is an inline link.
    ///
    /// # Arguments
    ///
    /// * `source`: Markdown source covered by the link node, if known
    /// * `url`: Resolved link destination
    /// * `text`: Plain text content of the link
    pub fn classify(source: Option<&str>, url: &str, text: &str) -> Self {
        let is_mail = url
            .strip_prefix("mailto:")
            .is_some_and(|address| address == text);

        match source.map(str::trim) {
            Some(src) if src.starts_with('[') => {
                if src.ends_with(')') {
                    LinkSyntax::Link
                } else if src.ends_with(']') && src.contains("][") {
                    LinkSyntax::Reference
                } else {
                    LinkSyntax::ShortReference
                }
            }
            // Angle bracket autolinks and bare GFM urls
            Some(src) if src.starts_with('<') || src == text => {
                if is_mail {
                    LinkSyntax::Automail
                } else {
                    LinkSyntax::Autolink
                }
            }
            _ if is_mail => LinkSyntax::Automail,
            // GFM prefixes `www.` autolinks with a scheme
            _ if url == text || url.strip_prefix("http://") == Some(text) => LinkSyntax::Autolink,
            _ => LinkSyntax::Link,
        }
    }
}

impl fmt::Display for LinkSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Anchor element under construction.
///
/// Built by the renderer for each link the parser recognized, handed to the
/// hook registered for its syntax, then serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOccurrence {
    pub href: String,
    pub title: Option<String>,
    pub target: Option<String>,
}

impl LinkOccurrence {
    /// Creates occurrence without title or target.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            title: None,
            target: None,
        }
    }

    /// Sets title attribute. Empty titles are treated as absent.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.title = (!title.is_empty()).then_some(title);
        self
    }

    /// Returns whether the anchor opens in a new window.
    pub fn is_target_set(&self) -> bool {
        self.target.is_some()
    }
}

/// Configuration shared by every decision of a conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoratorConfig {
    /// Only modify external links (href containing `http`).
    pub external_only: bool,
}

impl DecoratorConfig {
    pub fn new(external_only: bool) -> Self {
        Self { external_only }
    }
}

/// Marks anchors to open in a new window.
///
/// Every link is marked except same-page anchors (`#section`). With
/// `external_only`, links are additionally required to contain `http`
/// anywhere in their href. The check is plain substring containment, so
/// `/http-page` counts as external.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkDecorator {
    config: DecoratorConfig,
}

impl LinkDecorator {
    pub fn new(config: DecoratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> DecoratorConfig {
        self.config
    }

    /// Decides whether a link with given href should open in a new window.
    pub fn decide(&self, href: &str) -> bool {
        if href.starts_with('#') {
            return false;
        }

        !self.config.external_only || href.contains("http")
    }

    /// Applies decision to occurrence, setting `target="_blank"` when marked.
    ///
    /// Href and title are left untouched. Applying twice yields the same
    /// attribute state as applying once.
    ///
    /// # Returns
    ///
    /// Whether the occurrence was marked
    pub fn apply(&self, occurrence: &mut LinkOccurrence) -> bool {
        let marked = self.decide(&occurrence.href);
        if marked {
            occurrence.target = Some(NEW_WINDOW_TARGET.to_string());
        }
        marked
    }

    /// Decorates pipeline result, passing `None` through unchanged.
    pub fn decorate(&self, occurrence: Option<LinkOccurrence>) -> Option<LinkOccurrence> {
        let mut occurrence = occurrence?;
        self.apply(&mut occurrence);
        Some(occurrence)
    }
}

impl LinkHook for LinkDecorator {
    fn handle(
        &self,
        syntax: LinkSyntax,
        occurrence: Option<LinkOccurrence>,
    ) -> Option<LinkOccurrence> {
        let occurrence = self.decorate(occurrence)?;
        tracing::trace!(
            href = %occurrence.href,
            %syntax,
            marked = occurrence.is_target_set(),
            "link decision"
        );
        Some(occurrence)
    }
}
