//! Metadata extraction for DocX content files.
//!
//! Everything in this crate is a pure function over file text; no I/O.
//!
//! - [`split_front_matter`] / [`FrontMatter`]: YAML block at the top of a file
//! - [`extract_headings`]: level 2–4 heading scan for tables of contents
//! - [`slugify`] / [`humanize`]: URL-safe identifiers and fallback titles
//! - [`plain_text`]: markup-free text for the search corpus

mod fence;
mod frontmatter;
mod headings;
mod slug;
mod text;

pub use frontmatter::{FrontMatter, MetaError, split_front_matter};
pub use headings::{Heading, extract_headings};
pub use slug::{humanize, slugify};
pub use text::{decode_entities, plain_text, strip_tags};
