//! Lazily composed output text.
//!
//! Emitters assemble whole source files as trees of string fragments and
//! never concatenate intermediate strings; flattening happens once,
//! straight into the output stream.

use std::fmt;
use std::io;
use std::slice;

/// A tree of text fragments. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NestedText {
    Leaf(String),
    Tree(Vec<NestedText>),
}

impl NestedText {
    /// An empty tree. Contributes no fragments.
    pub fn empty() -> Self {
        NestedText::Tree(Vec::new())
    }

    /// Depth-first fragment traversal, left to right. The concatenation
    /// of everything yielded is byte for byte the full rendering; no
    /// fragment is merged, split or reordered on the way out. Call again
    /// to traverse again.
    pub fn fragments(&self) -> Fragments<'_> {
        match self {
            NestedText::Leaf(text) => Fragments {
                head: Some(text.as_str()),
                stack: Vec::new(),
            },
            NestedText::Tree(nodes) => Fragments {
                head: None,
                stack: vec![nodes.iter()],
            },
        }
    }

    /// Stream every fragment into `out` without materializing the full
    /// text.
    pub fn write_to<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        for fragment in self.fragments() {
            out.write_all(fragment.as_bytes())?;
        }
        Ok(())
    }
}

impl Default for NestedText {
    fn default() -> Self {
        NestedText::empty()
    }
}

impl fmt::Display for NestedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fragment in self.fragments() {
            f.write_str(fragment)?;
        }
        Ok(())
    }
}

/// Iterator over a tree's fragments, returned by
/// [`NestedText::fragments`]. Keeps its own explicit stack, so input
/// depth never grows the call stack.
#[derive(Debug)]
pub struct Fragments<'a> {
    head: Option<&'a str>,
    stack: Vec<slice::Iter<'a, NestedText>>,
}

impl<'a> Iterator for Fragments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if let Some(text) = self.head.take() {
            return Some(text);
        }
        while let Some(nodes) = self.stack.last_mut() {
            match nodes.next() {
                Some(NestedText::Leaf(text)) => return Some(text),
                Some(NestedText::Tree(children)) => self.stack.push(children.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}

/// Conversion into a tree node, used by the [`text!`] builder macro.
pub trait IntoNested {
    fn into_nested(self) -> NestedText;
}

impl IntoNested for NestedText {
    fn into_nested(self) -> NestedText {
        self
    }
}

impl IntoNested for String {
    fn into_nested(self) -> NestedText {
        NestedText::Leaf(self)
    }
}

impl IntoNested for &str {
    fn into_nested(self) -> NestedText {
        NestedText::Leaf(self.to_string())
    }
}

/// `None` becomes an empty tree and so vanishes from the output.
impl<T: IntoNested> IntoNested for Option<T> {
    fn into_nested(self) -> NestedText {
        match self {
            Some(value) => value.into_nested(),
            None => NestedText::empty(),
        }
    }
}

impl<T: IntoNested> IntoNested for Vec<T> {
    fn into_nested(self) -> NestedText {
        NestedText::Tree(self.into_iter().map(IntoNested::into_nested).collect())
    }
}

impl From<String> for NestedText {
    fn from(text: String) -> Self {
        NestedText::Leaf(text)
    }
}

impl From<&str> for NestedText {
    fn from(text: &str) -> Self {
        NestedText::Leaf(text.to_string())
    }
}

impl<T: IntoNested> FromIterator<T> for NestedText {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        NestedText::Tree(iter.into_iter().map(IntoNested::into_nested).collect())
    }
}

/// Build a [`NestedText`] tree from interleaved literals and embedded
/// values, in source order.
///
/// ```
/// use unispec_core::text;
///
/// let name = "pets";
/// let tree = text!["export const ", name, " = [];\n"];
/// assert_eq!(tree.to_string(), "export const pets = [];\n");
/// ```
#[macro_export]
macro_rules! text {
    () => {
        $crate::text::NestedText::empty()
    };
    ($($part:expr),+ $(,)?) => {
        $crate::text::NestedText::Tree(vec![
            $($crate::text::IntoNested::into_nested($part)),+
        ])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(tree: &NestedText) -> String {
        match tree {
            NestedText::Leaf(text) => text.clone(),
            NestedText::Tree(nodes) => nodes.iter().map(naive).collect(),
        }
    }

    fn sample() -> NestedText {
        text![
            "header\n",
            text![
                "  left",
                NestedText::empty(),
                text!["", " right\n"],
            ],
            Some("maybe\n"),
            Option::<&str>::None,
            vec!["a", "b", "c"],
            "\n",
        ]
    }

    #[test]
    fn flattening_matches_naive_concatenation() {
        let tree = sample();
        let streamed: String = tree.fragments().collect();
        assert_eq!(streamed, naive(&tree));
        assert_eq!(tree.to_string(), naive(&tree));
    }

    #[test]
    fn fragments_come_out_in_order_unmerged() {
        let tree = sample();
        let fragments: Vec<&str> = tree.fragments().collect();
        assert_eq!(
            fragments,
            vec!["header\n", "  left", "", " right\n", "maybe\n", "a", "b", "c", "\n"]
        );
    }

    #[test]
    fn traversal_restarts_from_the_top() {
        let tree = sample();
        let first: Vec<&str> = tree.fragments().collect();
        let second: Vec<&str> = tree.fragments().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn write_to_streams_the_same_bytes() {
        let tree = sample();
        let mut out = Vec::new();
        tree.write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), tree.to_string());
    }

    #[test]
    fn deep_nesting_needs_no_recursion() {
        let mut tree = NestedText::Leaf("x".to_string());
        for _ in 0..2_000 {
            tree = NestedText::Tree(vec![tree]);
        }
        assert_eq!(tree.to_string(), "x");
    }

    #[test]
    fn collected_iterators_form_trees() {
        let tree: NestedText = (0..3).map(|n| format!("{n};")).collect();
        assert_eq!(tree.to_string(), "0;1;2;");
    }

    #[test]
    fn empty_invocation_renders_nothing() {
        assert_eq!(text![].to_string(), "");
        assert_eq!(text![].fragments().count(), 0);
    }
}
