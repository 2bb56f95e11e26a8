//! Page registry: a fixed table from [`PageId`] to a pure render function.
//!
//! Renderers never fail. Interactive nodes carry a [`NavRequest`]; the host
//! hands it to a [`crate::navigation::Navigator`] when the node is activated.

use shared::{Block, ContentLibrary, PageId, Post};

use crate::{
    contact::ContactField,
    navigation::NavRequest,
    view::{Node, View},
};

pub const SITE_NAME: &str = "Qasly Labs";
pub const TAGLINE: &str = "Independent Security Research Lab";
pub const PLACEHOLDER_TITLE: &str = "Blog Post";
pub const PLACEHOLDER_DATE: &str = "Unknown Date";

const PLACEHOLDER_ARTICLE: [&str; 3] = [
    "In the ever-evolving landscape of digital security, cryptography remains the bedrock upon which trust is built. However, with the advent of quantum computing, the very foundations of modern encryption are being challenged. This article delves into the exciting new paradigms of quantum-resistant cryptography, exploring how we can future-proof our digital world against the threats of tomorrow.",
    "Current cryptographic standards, such as RSA and elliptic-curve cryptography (ECC), rely on the computational difficulty of factoring large prime numbers or solving discrete logarithms. While these problems are intractable for classical computers, quantum computers, armed with algorithms like Shor's, could solve them in a matter of minutes, rendering our current encryption schemes obsolete.",
    "The race is on to develop post-quantum cryptography (PQC) solutions. These new algorithms are designed to be secure against both classical and quantum computers. Leading candidates include lattice-based cryptography, code-based cryptography, and multivariate polynomial cryptography. Each approach offers a unique set of trade-offs in terms of performance, key size, and security guarantees.",
];

/// Inputs available to every renderer.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub library: &'a ContentLibrary,
    pub post: Option<&'a Post>,
}

pub type RenderFn = for<'a> fn(&PageContext<'a>) -> View;

pub struct PageRegistry {
    entries: [(PageId, RenderFn); 4],
}

impl PageRegistry {
    pub fn standard() -> Self {
        Self {
            entries: [
                (PageId::Home, render_home as RenderFn),
                (PageId::Blog, render_blog as RenderFn),
                (PageId::BlogPost, render_blog_post as RenderFn),
                (PageId::Contact, render_contact as RenderFn),
            ],
        }
    }

    pub fn renderer(&self, page: PageId) -> RenderFn {
        self.entries
            .iter()
            .find(|(id, _)| *id == page)
            .map(|(_, render)| *render)
            .unwrap_or(render_home)
    }

    pub fn render(&self, page: PageId, ctx: &PageContext<'_>) -> View {
        (self.renderer(page))(ctx)
    }

    /// Renders by route name; unknown routes render the home view.
    pub fn render_route(&self, route: &str, ctx: &PageContext<'_>) -> View {
        self.render(PageId::from_route(route), ctx)
    }
}

impl Default for PageRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

fn render_home(_ctx: &PageContext<'_>) -> View {
    let mut view = View::page(PageId::Home);
    view.heading(1, SITE_NAME)
        .muted(TAGLINE)
        .link("Read the blog", NavRequest::to(PageId::Blog));
    view
}

fn render_blog(ctx: &PageContext<'_>) -> View {
    let mut view = View::page(PageId::Blog);
    view.heading(2, "Recent Posts");
    for post in ctx.library.posts() {
        view.push(Node::PostEntry {
            title: non_empty_or(&post.title, PLACEHOLDER_TITLE),
            date: non_empty_or(&post.date, PLACEHOLDER_DATE),
            request: NavRequest::open_post(post.clone()),
        });
    }
    view
}

fn render_blog_post(ctx: &PageContext<'_>) -> View {
    let mut view = View::page(PageId::BlogPost);
    view.link("← Back to Blog", NavRequest::to(PageId::Blog));

    let title = ctx.post.map(|p| p.title.as_str()).unwrap_or_default();
    let date = ctx.post.map(|p| p.date.as_str()).unwrap_or_default();
    view.heading(1, non_empty_or(title, PLACEHOLDER_TITLE))
        .muted(format!(
            "Published on {}",
            non_empty_or(date, PLACEHOLDER_DATE)
        ));

    match ctx.post.filter(|p| p.has_body()) {
        Some(post) => {
            for block in &post.body {
                view.push(block_node(block));
            }
        }
        None => {
            for paragraph in PLACEHOLDER_ARTICLE {
                view.paragraph(paragraph);
            }
        }
    }
    view
}

fn render_contact(_ctx: &PageContext<'_>) -> View {
    let mut view = View::page(PageId::Contact);
    view.heading(2, "Contact Us")
        .push(Node::ContactForm {
            fields: ContactField::ALL.to_vec(),
            submit_label: "Send Message".to_string(),
        })
        .link("← Back to Home", NavRequest::to(PageId::Home));
    view
}

fn block_node(block: &Block) -> Node {
    match block {
        Block::Paragraph(text) => Node::Paragraph(text.clone()),
        Block::Heading { level, text } => Node::Heading {
            level: *level,
            text: text.clone(),
        },
        Block::List(items) => Node::List(items.clone()),
        Block::Code(code) => Node::Code(code.clone()),
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
#[path = "tests/pages_tests.rs"]
mod tests;
