//! Stateful visitor that assembles the help-file text.
//!
//! One [`VimDoc`] exists per document conversion. The pulldown-cmark driver
//! in `renderer` invokes one method per structural callback, in document
//! order; block content arrives either pre-rendered or as a re-entrant
//! closure that renders nested inline content and reports whether anything
//! was produced.

use crate::error::{RenderError, Warning};
use crate::layout::{fix_block_delimiters, indent_block, write_rule, write_straddle};
use crate::state::{Heading, HeadingTree, ListKind, ListStack};
use crate::tag::{TagCase, build_tag, derive_title};

/// Configuration consumed at construction, one set per conversion.
#[derive(Clone, Debug)]
pub(crate) struct Config {
    pub(crate) output_name: String,
    pub(crate) description: String,
    pub(crate) cols: usize,
    pub(crate) tabs: usize,
    pub(crate) toc: bool,
    pub(crate) rules: bool,
    pub(crate) tag_case: TagCase,
}

/// Help-file document assembler.
pub(crate) struct VimDoc {
    filename: String,
    title: String,
    description: String,
    cols: usize,
    tabs: usize,
    toc: bool,
    rules: bool,
    tag_case: TagCase,
    /// Buffer offset where the TOC will be spliced in, recorded at the first
    /// heading that survives rendering.
    toc_pos: Option<usize>,
    lists: ListStack,
    tree: HeadingTree,
    warnings: Vec<Warning>,
}

impl VimDoc {
    pub(crate) fn new(config: Config) -> Self {
        let (filename, title) = derive_title(&config.output_name, config.tag_case);
        Self {
            filename,
            title,
            description: config.description,
            cols: config.cols,
            tabs: config.tabs,
            toc: config.toc,
            rules: config.rules,
            tag_case: config.tag_case,
            toc_pos: None,
            lists: ListStack::default(),
            tree: HeadingTree::default(),
            warnings: Vec::new(),
        }
    }

    /// Title line: the help file name, straddled with the description when
    /// one was configured, followed by a blank line.
    pub(crate) fn document_header(&self, out: &mut String) {
        if self.description.is_empty() {
            out.push_str(&self.filename);
            out.push('\n');
        } else {
            write_straddle(out, &self.filename, &self.description, self.cols, 0);
        }
        out.push('\n');
    }

    /// Splice the TOC into the recorded insertion point and repair block
    /// delimiter lines, producing the final document text.
    pub(crate) fn document_footer(&self, out: &str) -> String {
        let mut spliced = None;
        if self.toc {
            if let (Some(pos), Some(root)) = (self.toc_pos, self.tree.root()) {
                if let Some((before, after)) = out.split_at_checked(pos) {
                    let mut buffer = String::with_capacity(out.len());
                    buffer.push_str(before);
                    self.write_toc(&mut buffer, root, 0);
                    buffer.push('\n');
                    buffer.push_str(after);
                    spliced = Some(buffer);
                }
            }
        }
        fix_block_delimiters(spliced.as_deref().unwrap_or(out))
    }

    /// Heading callback.
    ///
    /// Provisionally emits the decorative rule, renders the inline content
    /// via `text`, and rewinds the buffer if nothing was produced. Surviving
    /// headings are upper-cased, right-justified against their tag, and
    /// placed in the heading tree.
    ///
    /// `at_document_level` is true when `out` is the document buffer itself.
    /// Only such headings can anchor the TOC; a heading captured inside
    /// another block renders normally but its offset is meaningless as a
    /// splice point.
    pub(crate) fn heading(
        &mut self,
        out: &mut String,
        level: u8,
        at_document_level: bool,
        text: impl FnOnce(&mut String) -> bool,
    ) {
        let init_pos = out.len();

        if self.rules {
            match level {
                1 => write_rule(out, "=", self.cols),
                2 => write_rule(out, "-", self.cols),
                _ => {}
            }
        }

        let heading_pos = out.len();

        if !text(out) {
            out.truncate(init_pos);
            return;
        }

        if at_document_level && self.toc_pos.is_none() {
            self.toc_pos = Some(init_pos);
        }

        let value = out[heading_pos..].to_owned();

        if self.tree.root().is_none() {
            if level != 1 {
                self.warn(Warning::NonTopLevelRoot { level });
            }
        } else if self.tree.root_level().is_some_and(|root_level| root_level >= level) {
            self.warn(Warning::HeadingAboveRoot { level });
        }
        self.tree.insert(value.clone(), level);

        out.truncate(heading_pos);
        let tag = format!("*{}*", build_tag(&self.title, &value, self.tag_case));
        write_straddle(out, &value.to_uppercase(), &tag, self.cols, 2);
        out.push('\n');
    }

    pub(crate) fn horizontal_rule(&self, out: &mut String) {
        write_rule(out, "-", self.cols);
    }

    pub(crate) fn block_code(&self, out: &mut String, text: &str) {
        self.literal_block(out, text);
    }

    pub(crate) fn block_quote(&self, out: &mut String, text: &str) {
        self.literal_block(out, text);
    }

    pub(crate) fn raw_block(&self, out: &mut String, text: &str) {
        self.literal_block(out, text);
    }

    pub(crate) fn list_start(&mut self, kind: ListKind) {
        self.lists.push(kind);
    }

    pub(crate) fn list_end(&mut self, out: &mut String) -> Result<(), RenderError> {
        self.lists.pop()?;
        out.push('\n');
        Ok(())
    }

    /// List item callback: marker, then the reindented item body aligned
    /// under the marker.
    pub(crate) fn list_item(&mut self, out: &mut String, text: &str) -> Result<(), RenderError> {
        let context = self.lists.peek()?;
        let marker = match context.kind {
            ListKind::Ordered => {
                let marker = format!("{}. ", context.next_index);
                context.next_index += 1;
                marker
            }
            ListKind::Unordered => "* ".to_owned(),
        };
        out.push_str(&marker);
        indent_block(out, text, self.tabs, marker.len());
        Ok(())
    }

    /// Paragraph callback: inline content followed by a blank line, or
    /// nothing at all when the content renders empty.
    pub(crate) fn paragraph(&self, out: &mut String, text: impl FnOnce(&mut String) -> bool) {
        let marker = out.len();
        if !text(out) {
            out.truncate(marker);
            return;
        }
        out.push_str("\n\n");
    }

    /// Code span callback.
    ///
    /// The help viewer does not highlight space-delimited words in code
    /// spans, so spans containing whitespace are suppressed entirely.
    pub(crate) fn code_span(&self, out: &mut String, text: &str) {
        if !text.contains(char::is_whitespace) {
            out.push('`');
            out.push_str(text);
            out.push('`');
        }
    }

    /// Hyperlink callback: `content (url)`. Autolinks, whose content equals
    /// their destination, emit the bare link.
    pub(crate) fn link(&self, out: &mut String, dest: &str, content: &str) {
        if content == dest {
            out.push_str(content);
        } else {
            out.push_str(content);
            out.push_str(" (");
            out.push_str(dest);
            out.push(')');
        }
    }

    pub(crate) fn line_break(&self, out: &mut String) {
        out.push('\n');
    }

    pub(crate) fn text(&self, out: &mut String, text: &str) {
        out.push_str(text);
    }

    /// Record an unsupported construct that was dropped from the output.
    pub(crate) fn unsupported(&mut self, construct: &'static str) {
        self.warn(Warning::Unsupported { construct });
    }

    pub(crate) fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    fn warn(&mut self, warning: Warning) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }

    fn literal_block(&self, out: &mut String, text: &str) {
        out.push_str(">\n");
        indent_block(out, text, self.tabs, 0);
        out.push_str("<\n\n");
    }

    /// Render one TOC line per heading, depth-first, indented one tab width
    /// per nesting level and linked to the heading's tag.
    fn write_toc(&self, out: &mut String, head: &Heading, depth: usize) {
        let entry = format!("{}{}", " ".repeat(depth * self.tabs), head.text);
        let link = format!("|{}|", build_tag(&self.title, &head.text, self.tag_case));
        write_straddle(out, &entry, &link, self.cols, 2);

        for child in &head.children {
            self.write_toc(out, child, depth + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc() -> VimDoc {
        VimDoc::new(Config {
            output_name: "doc.txt".to_owned(),
            description: String::new(),
            cols: 20,
            tabs: 4,
            toc: true,
            rules: true,
            tag_case: TagCase::Snake,
        })
    }

    #[test]
    fn header_without_description_is_bare_filename() {
        let mut out = String::new();
        doc().document_header(&mut out);
        assert_eq!(out, "doc.txt\n\n");
    }

    #[test]
    fn header_straddles_description() {
        let config = Config {
            output_name: "doc.txt".to_owned(),
            description: "demo".to_owned(),
            cols: 20,
            tabs: 4,
            toc: true,
            rules: true,
            tag_case: TagCase::Snake,
        };
        let mut out = String::new();
        VimDoc::new(config).document_header(&mut out);
        assert_eq!(out, "doc.txt         demo\n\n");
    }

    #[test]
    fn empty_heading_leaves_no_trace() {
        let mut doc = doc();
        let mut out = String::from("before\n");
        doc.heading(&mut out, 1, true, |_| false);
        assert_eq!(out, "before\n");
        assert!(doc.tree.root().is_none());
        assert_eq!(doc.toc_pos, None);
    }

    #[test]
    fn heading_is_uppercased_and_tagged() {
        let mut doc = doc();
        let mut out = String::new();
        doc.heading(&mut out, 1, true, |out| {
            out.push_str("Intro");
            true
        });
        assert_eq!(out, format!("{}\nINTRO      *doc-intro*\n\n", "=".repeat(20)));
        assert_eq!(doc.toc_pos, Some(0));
    }

    #[test]
    fn level_three_heading_has_no_rule() {
        let mut doc = doc();
        let mut out = String::new();
        doc.heading(&mut out, 3, true, |out| {
            out.push_str("Deep");
            true
        });
        assert!(!out.contains('='));
        assert!(!out.contains("---"));
    }

    #[test]
    fn nested_heading_does_not_record_toc_position() {
        let mut doc = doc();
        let mut out = String::new();
        doc.heading(&mut out, 1, false, |out| {
            out.push_str("Quoted");
            true
        });
        assert_eq!(doc.toc_pos, None);
        assert_eq!(doc.tree.root().unwrap().text, "Quoted");
    }

    #[test]
    fn toc_position_is_recorded_at_the_first_surviving_heading() {
        let mut doc = doc();
        let mut out = String::from("doc.txt\n\n");
        doc.heading(&mut out, 1, true, |_| false);
        let before_survivor = out.len();
        doc.heading(&mut out, 1, true, |out| {
            out.push_str("Real");
            true
        });
        assert_eq!(doc.toc_pos, Some(before_survivor));
    }

    #[test]
    fn ordered_items_count_up() {
        let mut doc = doc();
        let mut out = String::new();
        doc.list_start(ListKind::Ordered);
        doc.list_item(&mut out, "one").unwrap();
        doc.list_item(&mut out, "two").unwrap();
        doc.list_end(&mut out).unwrap();
        assert_eq!(out, "1.  one\n2.  two\n\n");
    }

    #[test]
    fn unordered_items_use_bullets() {
        let mut doc = doc();
        let mut out = String::new();
        doc.list_start(ListKind::Unordered);
        doc.list_item(&mut out, "thing").unwrap();
        doc.list_end(&mut out).unwrap();
        assert_eq!(out, "*   thing\n\n");
    }

    #[test]
    fn list_item_without_open_list_fails() {
        let mut doc = doc();
        let mut out = String::new();
        assert_eq!(
            doc.list_item(&mut out, "stray").unwrap_err(),
            RenderError::ListStackUnderflow
        );
    }

    #[test]
    fn code_span_with_space_is_suppressed() {
        let doc = doc();
        let mut out = String::new();
        doc.code_span(&mut out, "a b");
        assert_eq!(out, "");
        doc.code_span(&mut out, "word");
        assert_eq!(out, "`word`");
    }

    #[test]
    fn link_is_rewritten_with_destination() {
        let doc = doc();
        let mut out = String::new();
        doc.link(&mut out, "https://example.com", "site");
        assert_eq!(out, "site (https://example.com)");
    }

    #[test]
    fn autolink_emits_bare_destination() {
        let doc = doc();
        let mut out = String::new();
        doc.link(&mut out, "https://example.com", "https://example.com");
        assert_eq!(out, "https://example.com");
    }

    #[test]
    fn footer_splices_toc_before_first_heading() {
        let mut doc = doc();
        let mut out = String::new();
        doc.document_header(&mut out);
        doc.heading(&mut out, 1, true, |out| {
            out.push_str("Intro");
            true
        });
        let text = doc.document_footer(&out);
        let toc_line = "Intro      |doc-intro|\n";
        let body_start = text.find('=').unwrap();
        assert!(text[..body_start].contains(toc_line));
    }

    #[test]
    fn footer_without_headings_passes_buffer_through() {
        let doc = doc();
        let text = doc.document_footer("doc.txt\n\nplain text\n\n");
        assert_eq!(text, "doc.txt\n\nplain text\n\n");
    }

    #[test]
    fn paragraph_rewinds_on_empty_content() {
        let doc = doc();
        let mut out = String::from("x");
        doc.paragraph(&mut out, |_| false);
        assert_eq!(out, "x");
    }
}
