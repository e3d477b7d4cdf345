//! Help tag generation.

use std::path::Path;

/// Case mode for tag slugs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TagCase {
    /// Lowercase the slug and replace spaces with underscores.
    #[default]
    Snake,
    /// Capitalize each word of the slug and remove spaces.
    Pascal,
}

/// Build the cross-reference tag for a heading: `<title>-<slug>`.
///
/// Deterministic: identical input always produces the identical tag, so TOC
/// links match the in-body anchors byte for byte. Punctuation in the heading
/// text is not escaped or deduplicated; headings that differ only in
/// punctuation can collide or produce tags the help viewer cannot parse.
#[must_use]
pub fn build_tag(title: &str, text: &str, case: TagCase) -> String {
    let slug = match case {
        TagCase::Snake => text.to_lowercase().replace(' ', "_"),
        TagCase::Pascal => pascal_slug(text),
    };
    format!("{title}-{slug}")
}

/// Derive the help file name and tag title from an output path.
///
/// Returns `(filename, title)`: the filename is the path's basename; the
/// title is the basename with its extension stripped at the last dot,
/// lowercased unless pascal tags are in use. A basename without an extension
/// is used verbatim.
pub(crate) fn derive_title(output_name: &str, case: TagCase) -> (String, String) {
    let filename = Path::new(output_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(output_name);

    let title = match filename.rfind('.') {
        Some(index) => {
            let stem = &filename[..index];
            match case {
                TagCase::Snake => stem.to_lowercase(),
                TagCase::Pascal => stem.to_owned(),
            }
        }
        None => filename.to_owned(),
    };

    (filename.to_owned(), title)
}

fn pascal_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut word_start = true;
    for ch in text.chars() {
        if ch == ' ' {
            word_start = true;
        } else if word_start {
            slug.extend(ch.to_uppercase());
            word_start = false;
        } else {
            slug.push(ch);
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn snake_tag_lowercases_and_underscores() {
        assert_eq!(
            build_tag("doc", "Getting Started", TagCase::Snake),
            "doc-getting_started"
        );
    }

    #[test]
    fn pascal_tag_capitalizes_and_joins() {
        assert_eq!(
            build_tag("Doc", "getting started", TagCase::Pascal),
            "Doc-GettingStarted"
        );
    }

    #[test]
    fn pascal_tag_keeps_interior_case() {
        assert_eq!(build_tag("Doc", "fooBar baz", TagCase::Pascal), "Doc-FooBarBaz");
    }

    #[test]
    fn tags_are_deterministic() {
        let first = build_tag("doc", "Install & Setup", TagCase::Snake);
        let second = build_tag("doc", "Install & Setup", TagCase::Snake);
        assert_eq!(first, second);
    }

    #[test]
    fn punctuation_is_not_escaped() {
        assert_eq!(build_tag("doc", "What's new?", TagCase::Snake), "doc-what's_new?");
    }

    #[test]
    fn title_strips_extension_and_lowercases() {
        assert_eq!(
            derive_title("path/to/MyPlugin.txt", TagCase::Snake),
            ("MyPlugin.txt".to_owned(), "myplugin".to_owned())
        );
    }

    #[test]
    fn pascal_title_keeps_case() {
        assert_eq!(
            derive_title("MyPlugin.txt", TagCase::Pascal),
            ("MyPlugin.txt".to_owned(), "MyPlugin".to_owned())
        );
    }

    #[test]
    fn title_without_extension_is_verbatim() {
        assert_eq!(
            derive_title("README", TagCase::Snake),
            ("README".to_owned(), "README".to_owned())
        );
    }

    #[test]
    fn title_uses_last_dot() {
        assert_eq!(derive_title("a.b.txt", TagCase::Snake).1, "a.b");
    }
}
