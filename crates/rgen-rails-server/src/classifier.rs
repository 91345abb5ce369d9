//! Route grouping and ordering for the generated route table.

use std::cmp::Ordering;

use indexmap::IndexMap;
use rgen_core::ir::{HttpPath, Interface};

/// One declared HTTP path and the interface that owns it.
#[derive(Debug, Clone, Copy)]
pub struct RouteEntry<'a> {
    pub http_path: &'a HttpPath,
    pub interface: &'a Interface,
}

/// Anything carrying a path template can be classified.
pub trait HasPath {
    fn path_template(&self) -> &str;
}

impl HasPath for RouteEntry<'_> {
    fn path_template(&self) -> &str {
        &self.http_path.path
    }
}

impl HasPath for &str {
    fn path_template(&self) -> &str {
        self
    }
}

impl HasPath for String {
    fn path_template(&self) -> &str {
        self
    }
}

/// Convert `{param}` placeholders to the `:param` form used by Rails and drop
/// empty segments: `/gizmos/{id}/` → `gizmos/:id`.
pub fn paramify(path: &str) -> String {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|segment| match placeholder_name(segment) {
            Some(name) => format!(":{name}"),
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn placeholder_name(segment: &str) -> Option<&str> {
    segment.strip_prefix('{').and_then(|s| s.strip_suffix('}'))
}

/// First non-empty path segment, the grouping key of a route.
pub fn group_key(path: &str) -> &str {
    path.split('/').find(|s| !s.is_empty()).unwrap_or_default()
}

/// Group routes by their first path segment. Groups keep first-seen order and
/// members keep input order.
pub fn group_paths<T: HasPath>(items: Vec<T>) -> IndexMap<String, Vec<T>> {
    let mut groups: IndexMap<String, Vec<T>> = IndexMap::new();
    for item in items {
        let key = group_key(item.path_template()).to_string();
        groups.entry(key).or_default().push(item);
    }
    groups
}

/// A path segment as seen by the route comparator. All placeholders compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'p> {
    Param,
    Literal(&'p str),
}

fn segments(path: &str) -> Vec<Segment<'_>> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|s| {
            if placeholder_name(s).is_some() || s.starts_with(':') {
                Segment::Param
            } else {
                Segment::Literal(s)
            }
        })
        .collect()
}

/// Route specificity order.
///
/// Segments are compared left to right: a path that still has segments sorts
/// before one that has run out, a placeholder sorts before a literal, and two
/// literals sort alphabetically ignoring case, lowercase first on a tie.
pub fn compare_paths(a: &str, b: &str) -> Ordering {
    let segs_a = segments(a);
    let segs_b = segments(b);
    let len = segs_a.len().max(segs_b.len());

    for i in 0..len {
        let ordering = match (segs_a.get(i), segs_b.get(i)) {
            (Some(x), Some(y)) if x == y => continue,
            (None, _) => Ordering::Greater,
            (_, None) => Ordering::Less,
            (Some(Segment::Param), Some(_)) => Ordering::Less,
            (Some(_), Some(Segment::Param)) => Ordering::Greater,
            (Some(Segment::Literal(x)), Some(Segment::Literal(y))) => compare_literals(x, y),
        };
        return ordering;
    }

    Ordering::Equal
}

fn compare_literals(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Sort routes so the most specific is drawn first. Stable.
pub fn sort_paths<T: HasPath>(mut items: Vec<T>) -> Vec<T> {
    items.sort_by(|a, b| compare_paths(a.path_template(), b.path_template()));
    items
}
