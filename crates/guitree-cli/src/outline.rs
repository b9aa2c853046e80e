//! Indented outline rendering of a document.

use colored::Colorize;
use guitree_types::{Element, ElementKind};

/// Render `element` and its descendants as a tree outline.
pub fn render(element: &Element) -> String {
    let mut out = String::new();
    out.push_str(&describe(element));
    out.push('\n');
    render_children(element, "", &mut out);
    out
}

fn render_children(element: &Element, prefix: &str, out: &mut String) {
    let count = element.children.len();
    for (i, child) in element.children.iter().enumerate() {
        let last = i + 1 == count;
        out.push_str(prefix);
        out.push_str(if last { "└── " } else { "├── " });
        out.push_str(&describe(child));
        out.push('\n');
        let nested = format!("{prefix}{}", if last { "    " } else { "│   " });
        render_children(child, &nested, out);
    }
}

fn describe(element: &Element) -> String {
    match element.kind {
        ElementKind::Action => format!("{} {}", "Action".green(), element.name),
        ElementKind::Separator if element.weak_separator => {
            format!("{}", "Separator (weak)".dimmed())
        }
        ElementKind::Separator => "Separator".to_string(),
        ElementKind::Merge | ElementKind::MergeLocal => format!("{}", element.label().yellow()),
        ElementKind::Text => format!("{} {:?}", "Text".dimmed(), element.content),
        ElementKind::Container => format!("{}", element.label().bold()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_outline() {
        colored::control::set_override(false);
        let mut sep = Element::separator();
        sep.weak_separator = true;
        let doc = Element::container("gui", "app").with_children(vec![
            Element::menu("file").with_children(vec![Element::text("&File"), Element::action("file_save")]),
            sep,
            Element::merge(),
        ]);
        let expected = "\
gui:app
├── Menu:file
│   ├── Text \"&File\"
│   └── Action file_save
├── Separator (weak)
└── Merge
";
        assert_eq!(render(&doc), expected);
    }
}
