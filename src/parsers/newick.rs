pub(crate) mod annotations;

use super::TreeParseError;
use crate::TreeFloat;
use annotations::parse_branch_length;
use annotations::split_label_and_annotation;

/// A node exactly as read from Newick text, before flattening.
///
/// Children are owned by their parent. There is no link back to the
/// parent; the flattener records parents by id instead.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedNode {
    pub name: Option<String>,
    pub accession: Option<String>,
    pub taxon_id: Option<String>,
    pub branch_length: Option<TreeFloat>,
    pub children: Vec<ParsedNode>,
}

impl ParsedNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        let mut count: usize = 0;
        let mut stack: Vec<&ParsedNode> = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

// Deeply nested input would otherwise recurse once per level on drop.
impl Drop for ParsedNode {
    fn drop(&mut self) {
        let mut stack: Vec<ParsedNode> = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

/// Checks if a character ends a node label.
fn is_label_delimiter(byte: u8) -> bool {
    matches!(byte, b',' | b')' | b'(' | b':')
}

/// Checks if a character ends a branch length.
fn is_branch_length_delimiter(byte: u8) -> bool {
    matches!(byte, b',' | b')' | b'(')
}

/// Single forward-only position shared by the whole parse.
///
/// Every delimiter is ASCII, so stopping on one always lands on a `char`
/// boundary and slicing the underlying `&str` is safe.
#[derive(Debug)]
struct Cursor<'a> {
    text: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, position: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.position).copied()
    }

    fn at_end(&self) -> bool {
        self.position >= self.text.len()
    }

    /// Consumes `byte` if it is the next character.
    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn take_until(&mut self, is_delimiter: fn(u8) -> bool) -> &'a str {
        let start = self.position;
        while self.peek().is_some_and(|byte| !is_delimiter(byte)) {
            self.position += 1;
        }
        &self.text[start..self.position]
    }
}

/// Parses one Newick tree into an owned [ParsedNode] hierarchy.
///
/// Surrounding whitespace is trimmed and one trailing `;` is removed.
/// Labels may carry `Name[accession]`, `Name[accession|taxon_id]` or
/// `Name{taxon_id}` annotations.
///
/// **Leniency:**
/// Structural problems (unbalanced parentheses, trailing text after the
/// root) are not errors. Whatever can be read is returned; text after the
/// root node is ignored. Unreadable branch lengths become `0.0`.
///
/// **Returns:**
/// - `Ok(ParsedNode)` - the root node
/// - `Err(TreeParseError::EmptyInput)` - nothing left after trimming
pub fn parse_newick(text: &str) -> Result<ParsedNode, TreeParseError> {
    let trimmed = text.trim();
    let body = trimmed.strip_suffix(';').unwrap_or(trimmed);
    if body.is_empty() {
        return Err(TreeParseError::EmptyInput);
    }

    let root = parse_tree_body(body);

    log::debug!(
        "Parsed Newick tree: {} nodes from {} bytes.",
        root.node_count(),
        body.len()
    );

    Ok(root)
}

/// Reads the root node and everything below it.
///
/// Open clades wait on an explicit stack instead of the call stack, so
/// nesting depth is limited only by memory.
///
/// **Child loop:**
/// After each child a single `,` is consumed. The clade keeps reading
/// children while the next character is another `,`, or is anything other
/// than `)` with input remaining. The closing `)` is consumed if present and
/// the clade's own label follows it.
fn parse_tree_body(body: &str) -> ParsedNode {
    let mut cursor = Cursor::new(body);
    let mut open_clades: Vec<ParsedNode> = Vec::new();
    let mut closed_clade: Option<ParsedNode> = None;

    loop {
        let mut node = if let Some(node) = closed_clade.take() {
            node
        } else if cursor.eat(b'(') {
            open_clades.push(ParsedNode::default());
            continue;
        } else {
            ParsedNode::default()
        };

        read_label(&mut cursor, &mut node);

        let Some(parent) = open_clades.last_mut() else {
            return node;
        };
        parent.children.push(node);

        _ = cursor.eat(b',');
        let has_more_children = cursor.peek() == Some(b',')
            || (cursor.peek() != Some(b')') && !cursor.at_end());

        if !has_more_children {
            _ = cursor.eat(b')');
            closed_clade = open_clades.pop();
        }
    }
}

/// Reads the label and optional `:branch_length` that follow a node.
fn read_label(cursor: &mut Cursor, node: &mut ParsedNode) {
    let raw_label = cursor.take_until(is_label_delimiter);
    let label = split_label_and_annotation(raw_label);
    node.name = label.name;
    node.accession = label.accession;
    node.taxon_id = label.taxon_id;

    if cursor.eat(b':') {
        let raw_branch_length = cursor.take_until(is_branch_length_delimiter);
        node.branch_length = Some(parse_branch_length(raw_branch_length));
    }
}
