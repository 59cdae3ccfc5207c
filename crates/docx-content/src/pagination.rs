//! Previous/next links from a navigation tree.

use serde::{Deserialize, Serialize};

use crate::navigation::DocNode;

/// A linkable navigation entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatNavEntry {
    pub href: String,
    pub title: String,
}

/// Neighbours of the current page in reading order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub prev: Option<FlatNavEntry>,
    pub next: Option<FlatNavEntry>,
}

/// Flatten a tree in pre-order, keeping only nodes with an href.
///
/// A section with an entry file comes before its children.
#[must_use]
pub fn flatten(tree: &[DocNode]) -> Vec<FlatNavEntry> {
    fn visit(nodes: &[DocNode], out: &mut Vec<FlatNavEntry>) {
        for node in nodes {
            if let Some(href) = &node.href {
                out.push(FlatNavEntry {
                    href: href.clone(),
                    title: node.title.clone(),
                });
            }
            visit(&node.children, out);
        }
    }

    let mut out = Vec::new();
    visit(tree, &mut out);
    out
}

/// Previous and next entries around `current_href`.
///
/// Matching is exact. When `current_href` is not in the tree, both sides
/// are `None`.
#[must_use]
pub fn paginate(tree: &[DocNode], current_href: &str) -> Pagination {
    let flat = flatten(tree);
    let Some(index) = flat.iter().position(|e| e.href == current_href) else {
        return Pagination::default();
    };
    Pagination {
        prev: index.checked_sub(1).and_then(|i| flat.get(i)).cloned(),
        next: flat.get(index + 1).cloned(),
    }
}
