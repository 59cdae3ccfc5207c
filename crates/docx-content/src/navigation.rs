//! Navigation tree building.
//!
//! Turns one version directory into an ordered tree of [`DocNode`]s:
//!
//! - files become leaves titled and ordered by their front matter
//! - directories become sections; an entry file (`main.<ext>`) supplies the
//!   section's title, order, and href
//! - siblings are sorted by `order` with a stable sort, so equal orders keep
//!   storage enumeration order
//! - directories whose subtree yields no nodes are dropped
//!
//! Sibling subdirectories are built in parallel; their output order is
//! preserved.

use std::collections::HashMap;
use std::path::Path;

use docx_meta::FrontMatter;
use docx_storage::Storage;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::layout::ContentLayout;
use crate::scanner::{ContentTreeScanner, ScanEntry};
use crate::source::Source;
use crate::versions::is_plain_segment;

/// Order used when front matter does not set one.
pub const DEFAULT_ORDER: i64 = 999;

/// A navigation entry: a document leaf or a section with children.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocNode {
    pub title: String,
    pub order: i64,
    /// Present for leaves and for sections with an entry file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default)]
    pub children: Vec<DocNode>,
    /// Whether this section has an entry file. Always `false` for leaves.
    #[serde(default)]
    pub has_main_file: bool,
}

impl DocNode {
    /// Whether this node is a document leaf.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty() && !self.has_main_file
    }
}

/// Two sibling entries whose slugs are identical.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("'{first}' and '{second}' both map to {href}")]
pub struct SlugCollision {
    /// The href both entries would receive.
    pub href: String,
    /// Name of the entry enumerated first.
    pub first: String,
    /// Name of the entry enumerated second.
    pub second: String,
}

/// Error returned when a navigation tree cannot be built.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// Two sibling entries produce the same href.
    #[error("Slug collision: {0}")]
    SlugCollision(#[from] SlugCollision),
}

/// Builds navigation trees for a content root.
pub struct NavigationTreeBuilder<'a> {
    storage: &'a dyn Storage,
    layout: &'a ContentLayout,
    scanner: ContentTreeScanner<'a>,
}

/// Output of building one directory level.
#[derive(Default)]
struct Level {
    nodes: Vec<DocNode>,
    collisions: Vec<SlugCollision>,
}

/// A built node with the entry it came from.
struct Child {
    slug: String,
    name: String,
    node: DocNode,
    /// Collisions found below this node.
    collisions: Vec<SlugCollision>,
}

/// A scanned entry with its front matter applied.
struct Candidate {
    entry: ScanEntry,
    slug: String,
    title: String,
    order: i64,
    has_main_file: bool,
}

impl<'a> NavigationTreeBuilder<'a> {
    #[must_use]
    pub fn new(storage: &'a dyn Storage, layout: &'a ContentLayout) -> Self {
        Self {
            storage,
            layout,
            scanner: ContentTreeScanner::new(storage, layout),
        }
    }

    /// Build the navigation tree of `version`.
    ///
    /// A missing version yields an empty tree.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::SlugCollision`] for the first pair of
    /// siblings (in pre-order) whose slugs are identical.
    pub fn build(&self, version: &str) -> Result<Vec<DocNode>, NavigationError> {
        let level = self.build_version(version);
        if let Some(collision) = level.collisions.into_iter().next() {
            return Err(collision.into());
        }
        tracing::debug!(version, nodes = level.nodes.len(), "Built navigation tree");
        Ok(level.nodes)
    }

    /// Report every slug collision in `version` instead of stopping at the first.
    pub fn validate(&self, version: &str) -> Vec<SlugCollision> {
        self.build_version(version).collisions
    }

    fn build_version(&self, version: &str) -> Level {
        if !is_plain_segment(version) || self.layout.is_hidden(version) {
            return Level::default();
        }
        self.build_dir(version, Path::new(version), &[])
    }

    fn build_dir(&self, version: &str, dir: &Path, parent_slugs: &[String]) -> Level {
        // Pruned sections are gone before the collision check, so a
        // directory that emits nothing never collides with a sibling.
        let mut children: Vec<Child> = self
            .scanner
            .scan_dir(dir)
            .into_par_iter()
            .filter_map(|entry| self.child(version, dir, parent_slugs, entry))
            .collect();

        let mut collisions = self.find_collisions(version, parent_slugs, &children);

        children.sort_by_key(|c| c.node.order);

        let mut nodes = Vec::with_capacity(children.len());
        for child in children {
            nodes.push(child.node);
            collisions.extend(child.collisions);
        }

        Level { nodes, collisions }
    }

    /// Read the front matter that titles and orders `entry`.
    fn candidate(&self, dir: &Path, entry: ScanEntry) -> Candidate {
        let (meta, has_main_file) = match &entry {
            ScanEntry::Dir { name } => match self.scanner.entry_file(&dir.join(name)) {
                Some(path) => (Source::front_matter(self.storage, &path), true),
                None => (FrontMatter::default(), false),
            },
            ScanEntry::File { name, .. } => {
                (Source::front_matter(self.storage, &dir.join(name)), false)
            }
        };

        Candidate {
            slug: entry.slug(),
            title: meta
                .title()
                .map_or_else(|| entry.slug_source().to_owned(), str::to_owned),
            order: meta.order.unwrap_or(DEFAULT_ORDER),
            has_main_file,
            entry,
        }
    }

    /// Siblings with identical slugs, in enumeration order.
    fn find_collisions(
        &self,
        version: &str,
        parent_slugs: &[String],
        children: &[Child],
    ) -> Vec<SlugCollision> {
        let mut seen: HashMap<&str, &str> = HashMap::new();
        let mut collisions = Vec::new();
        for child in children {
            if let Some(first) = seen.get(child.slug.as_str()) {
                collisions.push(SlugCollision {
                    href: self.href(version, parent_slugs, &child.slug),
                    first: (*first).to_owned(),
                    second: child.name.clone(),
                });
            } else {
                seen.insert(&child.slug, &child.name);
            }
        }
        collisions
    }

    /// Node for one scanned entry; `None` when a section builds empty.
    fn child(
        &self,
        version: &str,
        dir: &Path,
        parent_slugs: &[String],
        entry: ScanEntry,
    ) -> Option<Child> {
        let candidate = self.candidate(dir, entry);
        let href = self.href(version, parent_slugs, &candidate.slug);
        let name = candidate.entry.name().to_owned();

        let (node, collisions) = match &candidate.entry {
            ScanEntry::File { .. } => {
                let leaf = DocNode {
                    title: candidate.title,
                    order: candidate.order,
                    href: Some(href),
                    children: Vec::new(),
                    has_main_file: false,
                };
                (leaf, Vec::new())
            }
            ScanEntry::Dir { name } => {
                let mut slugs = parent_slugs.to_vec();
                slugs.push(candidate.slug.clone());
                let level = self.build_dir(version, &dir.join(name), &slugs);
                if level.nodes.is_empty() {
                    return None;
                }
                let section = DocNode {
                    title: candidate.title,
                    order: candidate.order,
                    href: candidate.has_main_file.then_some(href),
                    children: level.nodes,
                    has_main_file: candidate.has_main_file,
                };
                (section, level.collisions)
            }
        };

        Some(Child {
            slug: candidate.slug,
            name,
            node,
            collisions,
        })
    }

    fn href(&self, version: &str, parent_slugs: &[String], slug: &str) -> String {
        let mut href = self.layout.href(version, parent_slugs);
        href.push('/');
        href.push_str(slug);
        href
    }
}
