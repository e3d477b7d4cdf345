//! Markdown to help-file conversion driven by pulldown-cmark events.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::error::{RenderError, Warning};
use crate::state::ListKind;
use crate::tag::TagCase;
use crate::vimdoc::{Config, VimDoc};

/// Default layout width in columns.
pub const DEFAULT_COLUMNS: usize = 80;

/// Default tab width in spaces.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Result of converting one markdown document.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Complete help-file text, ready to be written verbatim.
    pub text: String,
    /// Non-fatal warnings raised during conversion.
    pub warnings: Vec<Warning>,
}

/// Builder for one markdown to help-file conversion.
///
/// `render` consumes the builder, so renderer state can never leak between
/// documents.
pub struct VimHelpRenderer {
    config: Config,
}

impl VimHelpRenderer {
    /// Create a renderer for a help file with the given output name.
    ///
    /// The tag title is derived from the name's basename with its extension
    /// stripped.
    #[must_use]
    pub fn new(output_name: &str) -> Self {
        Self {
            config: Config {
                output_name: output_name.to_owned(),
                description: String::new(),
                cols: DEFAULT_COLUMNS,
                tabs: DEFAULT_TAB_WIDTH,
                toc: true,
                rules: true,
                tag_case: TagCase::Snake,
            },
        }
    }

    /// Set the short description rendered on the title line.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.config.description = description.into();
        self
    }

    /// Set the layout width in columns (default 80).
    #[must_use]
    pub fn with_columns(mut self, cols: usize) -> Self {
        self.config.cols = cols;
        self
    }

    /// Set the tab width in spaces (default 4).
    #[must_use]
    pub fn with_tab_width(mut self, tabs: usize) -> Self {
        self.config.tabs = tabs;
        self
    }

    /// Enable or disable the generated table of contents (default enabled).
    #[must_use]
    pub fn with_toc(mut self, enabled: bool) -> Self {
        self.config.toc = enabled;
        self
    }

    /// Enable or disable horizontal rules above headings (default enabled).
    #[must_use]
    pub fn with_rules(mut self, enabled: bool) -> Self {
        self.config.rules = enabled;
        self
    }

    /// Use PascalCase tags instead of lowercase underscore-separated tags.
    #[must_use]
    pub fn with_pascal_tags(mut self, enabled: bool) -> Self {
        self.config.tag_case = if enabled { TagCase::Pascal } else { TagCase::Snake };
        self
    }

    /// Parser options used for conversion.
    ///
    /// Extensions are enabled so that unsupported constructs are recognized
    /// and reported instead of leaking through as paragraph text.
    #[must_use]
    pub fn parser_options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS
    }

    /// Convert one markdown document into help-file text.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the parser emits list events that are not
    /// well nested. No partial output is produced in that case.
    pub fn render(self, markdown: &str) -> Result<RenderResult, RenderError> {
        let parser = Parser::new_ext(markdown, Self::parser_options());
        Driver::new(VimDoc::new(self.config)).run(parser)
    }
}

/// Adapts the flat pulldown-cmark event stream to the visitor callbacks on
/// [`VimDoc`].
///
/// Nested structures render into capture frames; when the closing event
/// arrives, the captured content is handed to the matching callback either
/// pre-rendered or wrapped in a closure that reports whether any content was
/// produced.
struct Driver {
    doc: VimDoc,
    out: String,
    frames: Vec<Frame>,
}

struct Frame {
    kind: FrameKind,
    buf: String,
}

enum FrameKind {
    /// Captured content is handed to a block callback on close.
    Block,
    /// Captured content becomes the link text.
    Link { dest: String },
    /// Captured content is dropped on close.
    Discard,
}

impl Driver {
    fn new(doc: VimDoc) -> Self {
        Self {
            doc,
            out: String::with_capacity(4096),
            frames: Vec::new(),
        }
    }

    fn run<'a, I>(mut self, events: I) -> Result<RenderResult, RenderError>
    where
        I: Iterator<Item = Event<'a>>,
    {
        self.doc.document_header(&mut self.out);
        for event in events {
            self.process_event(event)?;
        }
        let text = self.doc.document_footer(&self.out);
        Ok(RenderResult {
            text,
            warnings: self.doc.take_warnings(),
        })
    }

    /// Current write target: the innermost capture frame, or the document
    /// buffer.
    fn parts(&mut self) -> (&mut VimDoc, &mut String) {
        let buf = self
            .frames
            .last_mut()
            .map_or(&mut self.out, |frame| &mut frame.buf);
        (&mut self.doc, buf)
    }

    fn push_frame(&mut self, kind: FrameKind) {
        self.frames.push(Frame {
            kind,
            buf: String::new(),
        });
    }

    fn process_event(&mut self, event: Event<'_>) -> Result<(), RenderError> {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => return self.end_tag(tag),
            Event::Text(text) => {
                let (doc, out) = self.parts();
                doc.text(out, &text);
            }
            Event::Code(code) => {
                let (doc, out) = self.parts();
                doc.code_span(out, &code);
            }
            Event::Html(html) => {
                // raw block content, captured by the enclosing HtmlBlock frame
                let (doc, out) = self.parts();
                doc.text(out, &html);
            }
            Event::InlineHtml(_) => self.doc.unsupported("raw HTML tag"),
            Event::FootnoteReference(_) => self.doc.unsupported("footnote reference"),
            Event::SoftBreak | Event::HardBreak => {
                let (doc, out) = self.parts();
                doc.line_break(out);
            }
            Event::Rule => {
                let (doc, out) = self.parts();
                doc.horizontal_rule(out);
            }
            Event::TaskListMarker(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {}
        }
        Ok(())
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph
            | Tag::Heading { .. }
            | Tag::BlockQuote(_)
            | Tag::CodeBlock(_)
            | Tag::HtmlBlock
            | Tag::Item => self.push_frame(FrameKind::Block),
            Tag::List(start) => {
                let kind = if start.is_some() {
                    ListKind::Ordered
                } else {
                    ListKind::Unordered
                };
                let (doc, out) = self.parts();
                // a nested list begins on a fresh line under its item text
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                doc.list_start(kind);
            }
            Tag::Link { dest_url, .. } => self.push_frame(FrameKind::Link {
                dest: dest_url.into_string(),
            }),
            Tag::Image { .. }
            | Tag::Table(_)
            | Tag::FootnoteDefinition(_)
            | Tag::Strikethrough
            | Tag::MetadataBlock(_) => self.push_frame(FrameKind::Discard),
            Tag::Emphasis | Tag::Strong | Tag::Superscript | Tag::Subscript => {}
            Tag::TableHead | Tag::TableRow | Tag::TableCell => {}
            Tag::DefinitionList | Tag::DefinitionListTitle | Tag::DefinitionListDefinition => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) -> Result<(), RenderError> {
        match tag {
            TagEnd::Paragraph => {
                if let Some(frame) = self.frames.pop() {
                    let (doc, out) = self.parts();
                    doc.paragraph(out, |out| append_rendered(out, &frame.buf));
                }
            }
            TagEnd::Heading(level) => {
                if let Some(frame) = self.frames.pop() {
                    let at_document_level = self.frames.is_empty();
                    let (doc, out) = self.parts();
                    doc.heading(out, heading_level_to_num(level), at_document_level, |out| {
                        append_rendered(out, &frame.buf)
                    });
                }
            }
            TagEnd::BlockQuote(_) => {
                if let Some(frame) = self.frames.pop() {
                    let (doc, out) = self.parts();
                    doc.block_quote(out, &frame.buf);
                }
            }
            TagEnd::CodeBlock => {
                if let Some(frame) = self.frames.pop() {
                    let (doc, out) = self.parts();
                    doc.block_code(out, &frame.buf);
                }
            }
            TagEnd::HtmlBlock => {
                if let Some(frame) = self.frames.pop() {
                    let (doc, out) = self.parts();
                    doc.raw_block(out, &frame.buf);
                }
            }
            TagEnd::Item => {
                if let Some(frame) = self.frames.pop() {
                    let (doc, out) = self.parts();
                    doc.list_item(out, &frame.buf)?;
                }
            }
            TagEnd::List(_) => {
                let (doc, out) = self.parts();
                doc.list_end(out)?;
            }
            TagEnd::Link => {
                if let Some(frame) = self.frames.pop() {
                    if let FrameKind::Link { dest } = frame.kind {
                        let (doc, out) = self.parts();
                        doc.link(out, &dest, &frame.buf);
                    }
                }
            }
            TagEnd::Image => {
                // no visual representation in the target format; alt text is
                // dropped with the image
                let _ = self.frames.pop();
            }
            TagEnd::Table => {
                let _ = self.frames.pop();
                self.doc.unsupported("table");
            }
            TagEnd::FootnoteDefinition => {
                let _ = self.frames.pop();
                self.doc.unsupported("footnote");
            }
            TagEnd::Strikethrough => {
                let _ = self.frames.pop();
                self.doc.unsupported("strikethrough");
            }
            TagEnd::MetadataBlock(_) => {
                let _ = self.frames.pop();
                self.doc.unsupported("title block");
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Superscript | TagEnd::Subscript => {}
            TagEnd::TableHead | TagEnd::TableRow | TagEnd::TableCell => {}
            TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition => {}
        }
        Ok(())
    }
}

/// Append captured content to the output, reporting whether anything was
/// produced.
fn append_rendered(out: &mut String, content: &str) -> bool {
    if content.is_empty() {
        return false;
    }
    out.push_str(content);
    true
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
