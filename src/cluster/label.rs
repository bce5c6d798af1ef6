//! Parsing of composite cluster labels
//!
//! Composite labels have the shape `[member,member,...]` where each member is
//! either a plain location label or another bracketed label. Any label that
//! does not start with `[` is a plain location label and is kept as written.

use crate::cluster::ClusterTree;
use crate::error::ReduceError;

/// Parse a label into its nested cluster tree.
///
/// Whitespace around the label and its members is ignored, so `[a, b]` and
/// `[a,b]` are the same cluster. Members of a bracketed label must not contain
/// `[`, `]` or `,`; a plain label may contain anything.
pub fn parse_label(label: &str) -> Result<ClusterTree, ReduceError> {
    let label = label.trim();
    if label.is_empty() {
        return Err(ReduceError::MalformedLabel {
            label: label.to_string(),
            reason: "empty label".to_string(),
        });
    }
    if !label.starts_with('[') {
        return Ok(ClusterTree::Leaf(label.to_string()));
    }

    let mut parser = LabelParser { label, pos: 0 };
    let tree = parser.parse_tree()?;

    parser.skip_whitespace();
    if parser.pos != label.len() {
        return Err(parser.error("unexpected characters after the closing bracket"));
    }

    Ok(tree)
}

struct LabelParser<'a> {
    label: &'a str,
    pos: usize,
}

impl<'a> LabelParser<'a> {
    fn parse_tree(&mut self) -> Result<ClusterTree, ReduceError> {
        self.skip_whitespace();
        if self.peek() != Some(b'[') {
            return self.parse_leaf();
        }

        // Opening bracket
        self.pos += 1;
        let mut members = Vec::new();
        loop {
            members.push(self.parse_tree()?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => return Err(self.error("expected ',' or ']'")),
                None => return Err(self.error("unclosed bracket")),
            }
        }

        Ok(ClusterTree::Group(members))
    }

    fn parse_leaf(&mut self) -> Result<ClusterTree, ReduceError> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if matches!(b, b'[' | b']' | b',') {
                break;
            }
            self.pos += 1;
        }

        let leaf = self.label[start..self.pos].trim();
        if leaf.is_empty() {
            return Err(self.error("empty member"));
        }

        Ok(ClusterTree::Leaf(leaf.to_string()))
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.label.as_bytes().get(self.pos).copied()
    }

    fn error(&self, reason: &str) -> ReduceError {
        ReduceError::MalformedLabel {
            label: self.label.to_string(),
            reason: format!("{} at byte {}", reason, self.pos),
        }
    }
}
