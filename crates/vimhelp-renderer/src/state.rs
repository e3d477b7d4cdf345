//! Renderer state: open list contexts and the document heading tree.

use crate::error::RenderError;

/// Ordering kind of an open list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ListKind {
    Ordered,
    Unordered,
}

/// One open list: its kind and the index the next ordered item will take.
#[derive(Debug)]
pub(crate) struct ListContext {
    pub(crate) kind: ListKind,
    pub(crate) next_index: usize,
}

/// Stack of currently open, possibly nested lists.
///
/// Popping or peeking while empty is a contract violation by the upstream
/// parser (list events were not well nested) and surfaces as a fatal
/// [`RenderError`] rather than a panic.
#[derive(Debug, Default)]
pub(crate) struct ListStack {
    contexts: Vec<ListContext>,
}

impl ListStack {
    /// Open a new list context with its item index at 1.
    pub(crate) fn push(&mut self, kind: ListKind) {
        self.contexts.push(ListContext { kind, next_index: 1 });
    }

    /// Close the innermost list context.
    pub(crate) fn pop(&mut self) -> Result<ListContext, RenderError> {
        self.contexts.pop().ok_or(RenderError::ListStackUnderflow)
    }

    /// Access the innermost list context for mutation.
    pub(crate) fn peek(&mut self) -> Result<&mut ListContext, RenderError> {
        self.contexts.last_mut().ok_or(RenderError::ListStackUnderflow)
    }
}

/// One heading in the document outline.
#[derive(Debug)]
pub(crate) struct Heading {
    pub(crate) text: String,
    pub(crate) level: u8,
    pub(crate) children: Vec<Heading>,
}

/// Incrementally built document outline.
///
/// Placement is permissive: a heading at or above the tracked heading's level
/// replaces the tracked "current" heading without being linked into the tree,
/// so malformed hierarchies degrade to a partial outline instead of failing.
/// The only heading that is both tracked and linked is the root.
#[derive(Debug, Default)]
pub(crate) struct HeadingTree {
    root: Option<Heading>,
    detached: Option<Heading>,
}

impl HeadingTree {
    pub(crate) fn root(&self) -> Option<&Heading> {
        self.root.as_ref()
    }

    pub(crate) fn root_level(&self) -> Option<u8> {
        self.root.as_ref().map(|heading| heading.level)
    }

    /// Place a rendered heading in the outline.
    ///
    /// The first heading becomes the root. A later heading attaches as a
    /// child of the current heading when it is strictly deeper; otherwise it
    /// becomes the new current heading, tracked but unlinked.
    pub(crate) fn insert(&mut self, text: String, level: u8) {
        let heading = Heading { text, level, children: Vec::new() };

        let Some(root) = self.root.as_mut() else {
            self.root = Some(heading);
            return;
        };

        let current_level = self.detached.as_ref().map_or(root.level, |h| h.level);
        if heading.level <= current_level {
            self.detached = Some(heading);
        } else if let Some(current) = self.detached.as_mut() {
            current.children.push(heading);
        } else {
            root.children.push(heading);
        }
    }
}
