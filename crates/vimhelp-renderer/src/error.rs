//! Error and warning types for help-file rendering.

use std::fmt;

/// Fatal rendering error.
///
/// Indicates that the upstream parser violated the well-nestedness contract
/// the renderer depends on, not that the input document was malformed. No
/// partial output is produced when one of these is returned.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// A list item or list end arrived while no list context was open.
    #[error("list context stack is empty: list events from the parser are not well nested")]
    ListStackUnderflow,
}

/// Non-fatal condition reported alongside the rendered output.
///
/// Warnings signal lossy conversion: either the heading hierarchy was
/// malformed (rendering continues with best-effort placement) or an
/// unsupported markdown construct was dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
    /// The first heading in the document is not a level 1 heading.
    NonTopLevelRoot {
        /// Level of the offending heading.
        level: u8,
    },
    /// A heading of higher or equal level to the root heading was found.
    HeadingAboveRoot {
        /// Level of the offending heading.
        level: u8,
    },
    /// An unsupported markdown construct was dropped from the output.
    Unsupported {
        /// Name of the construct, e.g. `"table"`.
        construct: &'static str,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonTopLevelRoot { level } => {
                write!(
                    f,
                    "top-level heading in document is a level {level} heading, not level 1"
                )
            }
            Self::HeadingAboveRoot { level } => {
                write!(
                    f,
                    "level {level} heading is of higher or equal level to the root heading"
                )
            }
            Self::Unsupported { construct } => {
                write!(f, "{construct} is not supported and was dropped from the output")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_display_names_the_construct() {
        let warning = Warning::Unsupported { construct: "table" };
        assert_eq!(
            warning.to_string(),
            "table is not supported and was dropped from the output"
        );
    }

    #[test]
    fn render_error_mentions_nesting() {
        assert!(RenderError::ListStackUnderflow.to_string().contains("not well nested"));
    }
}
