//! Markdown to Vim help-file conversion.
//!
//! Converts a markdown document into plain text laid out for Vim's help
//! viewer: fixed-width lines, `=`/`-` section rules, `*tag*` anchors for
//! cross-references, and a generated table of contents spliced in front of
//! the first heading.
//!
//! Parsing is delegated to pulldown-cmark; this crate consumes the event
//! stream and assembles the help text in one synchronous pass. A renderer
//! converts exactly one document: [`VimHelpRenderer::render`] consumes the
//! builder, so no state can leak between conversions. Constructs the help
//! format cannot express are dropped and reported as [`Warning`]s next to
//! the output rather than failing the conversion.
//!
//! # Example
//!
//! ```
//! use vimhelp_renderer::VimHelpRenderer;
//!
//! let result = VimHelpRenderer::new("example.txt")
//!     .with_description("example plugin")
//!     .render("# Intro\n\nHello.\n")
//!     .unwrap();
//! assert!(result.text.contains("*example-intro*"));
//! assert!(result.warnings.is_empty());
//! ```

mod error;
mod layout;
mod renderer;
mod state;
mod tag;
mod vimdoc;

pub use error::{RenderError, Warning};
pub use renderer::{DEFAULT_COLUMNS, DEFAULT_TAB_WIDTH, RenderResult, VimHelpRenderer};
pub use tag::{TagCase, build_tag};
