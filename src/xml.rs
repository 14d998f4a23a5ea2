//! Tag lookups over a parsed XML tree.
//!
//! Elements are matched on their local name, so `<kml:Point>` and `<Point>`
//! are the same thing here. All searches run in document order.

use crate::error::Result;
use roxmltree::{Document, Node, ParsingOptions};

pub fn parse_document(text: &str) -> Result<Document<'_>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(text, options)?)
}

pub fn is_tag(node: &Node, tag: &str) -> bool {
    node.is_element() && node.tag_name().name() == tag
}

pub fn first_child_by_tag<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
) -> Option<Node<'a, 'input>> {
    node.children().find(|n| is_tag(n, tag))
}

/// All elements named `tag` below `node`, excluding `node` itself.
pub fn descendants_by_tag<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.descendants().skip(1).filter(move |n| is_tag(n, tag))
}

pub fn first_descendant_by_tag<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
) -> Option<Node<'a, 'input>> {
    descendants_by_tag(node, tag).next()
}

/// Like [`descendants_by_tag`], but never looks inside an element named
/// `fence` (a `fence` element itself is still yielded when `tag == fence`).
pub fn descendants_outside<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
    fence: &str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    descendants_by_tag(node, tag).filter(move |n| {
        n.ancestors()
            .skip(1)
            .take_while(|a| *a != node)
            .all(|a| !is_tag(&a, fence))
    })
}

/// Follows `path` one tag at a time, taking the first matching descendant
/// at every step.
pub fn find_path<'a, 'input>(
    node: Node<'a, 'input>,
    path: &[&str],
) -> Option<Node<'a, 'input>> {
    path.iter()
        .try_fold(node, |current, tag| first_descendant_by_tag(current, tag))
}

/// Concatenated text of every text node below `node`.
pub fn text_content(node: Node) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}
