//! Path element and path types, and parsing of property references.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// PathElement represents one level of path navigation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement {
    /// Key of a map entry.
    Key(String),
    /// Zero-based list index.
    Index(usize),
}

impl PathElement {
    /// Creates a new key path element.
    pub fn key(name: impl Into<String>) -> Self {
        PathElement::Key(name.into())
    }

    /// Creates a new index path element.
    pub fn index(i: usize) -> Self {
        PathElement::Index(i)
    }

    /// Classifies a single normalized segment. Only the exact form `[n]`
    /// is an index; everything else, including `[-1]` or `[a]`, is a key.
    fn from_segment(segment: &str) -> Self {
        segment
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse::<usize>().ok())
            .map(PathElement::Index)
            .unwrap_or_else(|| PathElement::Key(segment.to_string()))
    }
}

/// Path represents a complete path to a nested value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    elements: Vec<PathElement>,
}

impl Path {
    /// Creates a new empty path.
    pub fn new() -> Self {
        Path {
            elements: Vec::new(),
        }
    }

    /// Creates a path from a vector of elements.
    pub fn from_elements(elements: Vec<PathElement>) -> Self {
        Path { elements }
    }

    /// Parses a property reference such as `roles[0] of user`.
    ///
    /// Grammar:
    ///
    /// - `X of Y` means `Y.X`; `X` is a single whitespace-free token and `Y`
    ///   consists of word characters and spaces.
    /// - every `[` becomes `.[` unless it already follows a `.`; a leading
    ///   `[` therefore yields an empty first key.
    /// - the result is split on `.`; `[n]` segments are indices, all other
    ///   segments are keys.
    ///
    /// References that do not fit the `X` / `X of Y` form are split on `.`
    /// verbatim.
    pub fn parse(reference: &str) -> Self {
        let normalized = normalize_reference(reference);
        normalized.split('.').map(PathElement::from_segment).collect()
    }

    /// Returns the number of elements in the path.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns an iterator over the path elements.
    pub fn iter(&self) -> impl Iterator<Item = &PathElement> {
        self.elements.iter()
    }

    /// Appends a path element.
    pub fn push(&mut self, element: PathElement) {
        self.elements.push(element);
    }

    /// Removes and returns the last path element.
    pub fn pop(&mut self) -> Option<PathElement> {
        self.elements.pop()
    }

    /// Returns the last path element.
    pub fn last(&self) -> Option<&PathElement> {
        self.elements.last()
    }

    /// Returns a slice of the path elements.
    pub fn as_slice(&self) -> &[PathElement] {
        &self.elements
    }
}

/// Rewrites a property reference into dotted form (`roles[0] of user` into
/// `user.roles.[0]`).
pub fn normalize_reference(reference: &str) -> String {
    let Some((path, root)) = split_of_clause(reference) else {
        return reference.to_string();
    };

    let joined = match root {
        Some(root) => format!("{}.{}", root, path),
        None => path.to_string(),
    };

    let mut normalized = String::with_capacity(joined.len() + 4);
    for c in joined.chars() {
        if c == '[' && !normalized.ends_with('.') {
            normalized.push('.');
        }
        normalized.push(c);
    }
    normalized
}

/// Matches `X` or `X of Y`. Returns `None` when the reference has neither
/// form.
fn split_of_clause(reference: &str) -> Option<(&str, Option<&str>)> {
    let end = reference
        .find(char::is_whitespace)
        .unwrap_or(reference.len());
    if end == 0 {
        return None;
    }

    let (path, rest) = reference.split_at(end);
    if rest.is_empty() {
        return Some((path, None));
    }

    let root = rest.strip_prefix(" of ")?;
    let is_word_or_space = |c: char| c.is_ascii_alphanumeric() || c == '_' || c == ' ';
    if root.is_empty() || !root.chars().all(is_word_or_space) {
        return None;
    }
    Some((path, Some(root)))
}

impl FromStr for Path {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Path::parse(s))
    }
}

impl FromIterator<PathElement> for Path {
    fn from_iter<T: IntoIterator<Item = PathElement>>(iter: T) -> Self {
        Path {
            elements: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Path {
    type Item = PathElement;
    type IntoIter = std::vec::IntoIter<PathElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathElement;
    type IntoIter = std::slice::Iter<'a, PathElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathElement::Key(name) => write!(f, "{}", name),
            PathElement::Index(i) => write!(f, "[{}]", i),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", element)?;
        }
        Ok(())
    }
}
