//! Host-independent view tree produced by the page registry and chrome.

use shared::PageId;

use crate::{contact::ContactField, navigation::NavRequest};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Heading { level: u8, text: String },
    Paragraph(String),
    /// Secondary text: taglines, dates, copyright lines.
    Muted(String),
    List(Vec<String>),
    Code(String),
    Link { label: String, request: NavRequest },
    PostEntry {
        title: String,
        date: String,
        request: NavRequest,
    },
    ContactForm {
        fields: Vec<ContactField>,
        submit_label: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub page: Option<PageId>,
    pub nodes: Vec<Node>,
}

impl View {
    pub fn page(page: PageId) -> Self {
        Self {
            page: Some(page),
            nodes: Vec::new(),
        }
    }

    pub fn chrome() -> Self {
        Self {
            page: None,
            nodes: Vec::new(),
        }
    }

    pub fn push(&mut self, node: Node) -> &mut Self {
        self.nodes.push(node);
        self
    }

    pub fn heading(&mut self, level: u8, text: impl Into<String>) -> &mut Self {
        self.push(Node::Heading {
            level,
            text: text.into(),
        })
    }

    pub fn paragraph(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Node::Paragraph(text.into()))
    }

    pub fn muted(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Node::Muted(text.into()))
    }

    pub fn link(&mut self, label: impl Into<String>, request: NavRequest) -> &mut Self {
        self.push(Node::Link {
            label: label.into(),
            request,
        })
    }

    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Heading { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn post_entries(&self) -> impl Iterator<Item = (&str, &NavRequest)> {
        self.nodes.iter().filter_map(|node| match node {
            Node::PostEntry { title, request, .. } => Some((title.as_str(), request)),
            _ => None,
        })
    }

    /// Request behind the link or post entry with this label, if any.
    pub fn find_action(&self, label: &str) -> Option<&NavRequest> {
        self.nodes.iter().find_map(|node| match node {
            Node::Link { label: l, request } if l == label => Some(request),
            Node::PostEntry { title, request, .. } if title == label => Some(request),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.nodes.iter().any(|node| match node {
            Node::Heading { text, .. } | Node::Paragraph(text) | Node::Muted(text) => {
                text.contains(needle)
            }
            Node::Code(code) => code.contains(needle),
            Node::List(items) => items.iter().any(|item| item.contains(needle)),
            Node::Link { label, .. } => label.contains(needle),
            Node::PostEntry { title, date, .. } => title.contains(needle) || date.contains(needle),
            Node::ContactForm { submit_label, .. } => submit_label.contains(needle),
        })
    }

    /// Plain-text outline, one line per node (lists and code span several).
    pub fn outline(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        for node in &self.nodes {
            match node {
                Node::Heading { level, text } => {
                    let marks = "#".repeat(usize::from(*level).max(1));
                    lines.push(format!("{marks} {text}"));
                }
                Node::Paragraph(text) => lines.push(text.clone()),
                Node::Muted(text) => lines.push(format!("({text})")),
                Node::List(items) => lines.extend(items.iter().map(|item| format!("  - {item}"))),
                Node::Code(code) => lines.extend(code.lines().map(|line| format!("    {line}"))),
                Node::Link { label, request } => {
                    lines.push(format!("[{label}] -> {}", request.page));
                }
                Node::PostEntry {
                    title,
                    date,
                    request,
                } => lines.push(format!("* {title} | {date} -> {}", request.page)),
                Node::ContactForm {
                    fields,
                    submit_label,
                } => {
                    let names: Vec<_> = fields.iter().map(|f| f.label()).collect();
                    lines.push(format!("<form {}> [{submit_label}]", names.join(", ")));
                }
            }
        }
        lines.into_iter().map(|line| line + "\n").collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_lists_nodes_in_order() {
        let mut view = View::page(PageId::Home);
        view.heading(1, "Title")
            .muted("tagline")
            .link("Blog", NavRequest::to(PageId::Blog));

        assert_eq!(view.outline(), "# Title\n(tagline)\n[Blog] -> blog\n");
        assert_eq!(
            view.find_action("Blog"),
            Some(&NavRequest::to(PageId::Blog))
        );
        assert!(view.find_action("Contact").is_none());
        assert!(view.contains_text("tag"));
    }

    #[test]
    fn outline_expands_lists_and_code_line_by_line() {
        let mut view = View::page(PageId::Blog);
        view.push(Node::List(vec!["one".into(), "two".into()]))
            .push(Node::Code("GET /\nHost: x".into()))
            .push(Node::ContactForm {
                fields: ContactField::ALL.to_vec(),
                submit_label: "Send".into(),
            });

        assert_eq!(
            view.outline(),
            "  - one\n  - two\n    GET /\n    Host: x\n<form Name, Email, Message> [Send]\n"
        );
        assert_eq!(View::chrome().outline(), "");
    }
}
