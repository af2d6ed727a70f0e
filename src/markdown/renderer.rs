//! Markdown rendering with GitHub Flavored Markdown support.

use anyhow::{Context, Result};
use comrak::nodes::{AstNode, LineColumn, NodeValue, Sourcepos};
use comrak::{Arena, Options};
use std::path::Path;

use super::extension::NewTabExtension;
use super::hooks::LinkHooks;
use super::links::{LinkOccurrence, LinkSyntax};

/// Renders markdown to HTML with GitHub Flavored Markdown extensions.
///
/// Provides GFM extensions including tables, strikethrough, autolinks,
/// task lists, footnotes, and description lists. Every link the parser
/// recognizes is passed through the hook registered for its syntax before
/// the document is serialized.
pub struct MarkdownRenderer<'a> {
    options: Options<'a>,
    hooks: LinkHooks,
}

impl<'a> MarkdownRenderer<'a> {
    /// Creates renderer with GitHub Flavored Markdown options.
    ///
    /// Configures all GFM extensions and security settings:
    /// - Tables, strikethrough, autolinks, task lists, footnotes
    /// - Smart punctuation for quotes and dashes
    /// - Raw HTML passthrough (decorated anchors are emitted as inline HTML)
    ///
    /// No link hooks are registered, so output matches plain comrak.
    pub fn new() -> Self {
        let mut options = Options::default();

        // Extension options (GFM features)
        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.extension.footnotes = true;
        options.extension.description_lists = true;

        // Parse options (smart punctuation)
        options.parse.smart = true;

        // Render options (security: we trust)
        options.render.unsafe_ = true;

        Self {
            options,
            hooks: LinkHooks::new(),
        }
    }

    /// Creates renderer with extension installed.
    pub fn with_extension(extension: &NewTabExtension) -> Self {
        let mut renderer = Self::new();
        extension.extend(&mut renderer);
        renderer
    }

    pub fn hooks(&self) -> &LinkHooks {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut LinkHooks {
        &mut self.hooks
    }

    /// Renders markdown content to HTML string.
    ///
    /// Parses markdown into AST, runs link hooks, and renders to HTML with
    /// GFM extensions.
    ///
    /// # Arguments
    ///
    /// * `content`: Markdown content to render
    ///
    /// # Returns
    ///
    /// Rendered HTML as string
    ///
    /// # Errors
    ///
    /// Returns error if HTML serialization fails
    pub fn render(&self, content: &str) -> Result<String> {
        let arena = Arena::new();
        let root = comrak::parse_document(&arena, content, &self.options);

        if !self.hooks.is_empty() {
            self.decorate_links(&arena, root, content)
                .context("Failed to decorate links")?;
        }

        let mut html = Vec::with_capacity(content.len() * 2);
        comrak::format_html(root, &self.options, &mut html).context("Failed to format HTML")?;

        String::from_utf8(html).context("Rendered HTML contains invalid UTF8")
    }

    /// Runs link hooks over every link node in document.
    ///
    /// Links whose hook returns the occurrence unchanged (or `None`) are left
    /// for comrak to render. Changed occurrences replace the link node with
    /// an inline HTML opening tag, the original children, and `</a>`.
    ///
    /// # Returns
    ///
    /// Number of link nodes replaced
    fn decorate_links<'n>(
        &self,
        arena: &'n Arena<AstNode<'n>>,
        root: &'n AstNode<'n>,
        content: &str,
    ) -> Result<usize> {
        let line_starts = line_starts(content);
        let links: Vec<_> = root
            .descendants()
            .filter(|node| matches!(node.data.borrow().value, NodeValue::Link(_)))
            .filter(|node| !inside_image(node))
            .collect();

        let mut rewritten = 0;

        for node in &links {
            let (original, sourcepos) = {
                let ast = node.data.borrow();
                let NodeValue::Link(ref link) = ast.value else {
                    continue;
                };
                (
                    LinkOccurrence::new(link.url.clone()).with_title(link.title.clone()),
                    ast.sourcepos,
                )
            };

            let source = source_slice(content, &line_starts, sourcepos);
            let syntax = LinkSyntax::classify(source, &original.href, &link_text(node));

            let Some(decorated) = self.hooks.run(syntax, Some(original.clone())) else {
                continue;
            };
            if decorated == original {
                continue;
            }

            replace_with_html(arena, node, &decorated)?;
            rewritten += 1;
        }

        tracing::debug!(links = links.len(), rewritten, "decorated links");

        Ok(rewritten)
    }

    /// Renders markdown file at given path.
    ///
    /// Convenience method that reads file and renders content.
    ///
    /// # Arguments
    ///
    /// * `path`: Path to markdown file
    ///
    /// # Returns
    ///
    /// Rendered HTML string
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or rendering fails
    pub fn render_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read markdown file")?;
        self.render(&content)
    }
}

impl<'a> Default for MarkdownRenderer<'a> {
    fn default() -> Self {
        Self::new()
    }
}

/// Swaps link node for raw opening and closing anchor tags around its children.
fn replace_with_html<'n>(
    arena: &'n Arena<AstNode<'n>>,
    node: &'n AstNode<'n>,
    occurrence: &LinkOccurrence,
) -> Result<()> {
    let open = arena.alloc(NodeValue::HtmlInline(opening_tag(occurrence)?).into());
    node.insert_before(open);

    let children: Vec<_> = node.children().collect();
    for child in children {
        node.insert_before(child);
    }

    let close = arena.alloc(NodeValue::HtmlInline("</a>".to_string()).into());
    node.insert_before(close);
    node.detach();

    Ok(())
}

/// Builds `<a>` opening tag with comrak's own attribute escaping.
///
/// Attribute order is href, target, title.
fn opening_tag(occurrence: &LinkOccurrence) -> Result<String> {
    let mut tag = Vec::with_capacity(occurrence.href.len() + 32);

    tag.extend_from_slice(b"<a href=\"");
    comrak::html::escape_href(&mut tag, occurrence.href.as_bytes())
        .context("Failed to escape href")?;
    tag.push(b'"');

    if let Some(target) = &occurrence.target {
        tag.extend_from_slice(b" target=\"");
        comrak::html::escape(&mut tag, target.as_bytes()).context("Failed to escape target")?;
        tag.push(b'"');
    }

    if let Some(title) = occurrence.title.as_deref().filter(|t| !t.is_empty()) {
        tag.extend_from_slice(b" title=\"");
        comrak::html::escape(&mut tag, title.as_bytes()).context("Failed to escape title")?;
        tag.push(b'"');
    }

    tag.push(b'>');

    String::from_utf8(tag).context("Anchor tag contains invalid UTF8")
}

/// Returns whether node is part of an image description.
///
/// Image descriptions render as plain alt text, so raw HTML placed there
/// would be escaped into the attribute.
fn inside_image<'n>(node: &'n AstNode<'n>) -> bool {
    node.ancestors()
        .skip(1)
        .any(|ancestor| matches!(ancestor.data.borrow().value, NodeValue::Image(_)))
}

/// Collects plain text content of node's descendants.
fn link_text<'n>(node: &'n AstNode<'n>) -> String {
    let mut text = String::new();
    for descendant in node.descendants() {
        match descendant.data.borrow().value {
            NodeValue::Text(ref literal) => text.push_str(literal),
            NodeValue::Code(ref code) => text.push_str(&code.literal),
            _ => {}
        }
    }
    text
}

/// Byte offsets where each source line begins.
fn line_starts(content: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(content.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

/// Returns source text covered by sourcepos, if positions are usable.
///
/// Lines and columns are 1-based, end inclusive. Nodes without positions
/// (line 0) or positions outside content yield `None`.
fn source_slice<'s>(content: &'s str, line_starts: &[usize], sourcepos: Sourcepos) -> Option<&'s str> {
    let start = byte_offset(line_starts, sourcepos.start)?;
    let end = byte_offset(line_starts, sourcepos.end)?;
    if end < start {
        return None;
    }
    content.get(start..=end)
}

fn byte_offset(line_starts: &[usize], position: LineColumn) -> Option<usize> {
    let line_start = *line_starts.get(position.line.checked_sub(1)?)?;
    Some(line_start + position.column.checked_sub(1)?)
}
