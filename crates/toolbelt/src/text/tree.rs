//! Nested grouping of a [`MultiSplit`] token stream over configured pairs.

use crate::error::{Result, ToolbeltError};

use super::split::{MultiSplit, Token, TokenKind};

/// A token, or a matched pair with everything between its delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<'s> {
    Token(Token<'s>),
    Group {
        name: &'s str,
        open: Token<'s>,
        close: Token<'s>,
        children: Vec<Node<'s>>,
    },
}

impl Node<'_> {
    /// Concatenates every value below this node, delimiters included.
    pub fn flatten_text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            Self::Token(token) => out.push_str(token.value.as_str()),
            Self::Group {
                open,
                close,
                children,
                ..
            } => {
                out.push_str(open.value.as_str());
                for child in children {
                    child.push_text(out);
                }
                out.push_str(close.value.as_str());
            }
        }
    }
}

/// Concatenates the text of a node list.
pub fn flatten(nodes: &[Node<'_>]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.push_text(&mut out);
    }
    out
}

struct OpenGroup<'s> {
    name: &'s str,
    open: Token<'s>,
    children: Vec<Node<'s>>,
}

impl MultiSplit {
    /// Tokenizes `text` and nests the tokens between matching pairs.
    ///
    /// A closing separator that does not close the innermost open group is an
    /// [`ToolbeltError::UnmatchedSeparator`]; a group still open at the end of
    /// input is an [`ToolbeltError::UnclosedSeparator`].
    pub fn tree(&self, text: &str) -> Result<Vec<Node<'_>>> {
        let mut root = Vec::new();
        let mut stack: Vec<OpenGroup<'_>> = Vec::new();

        for token in self.split(text) {
            match token.kind {
                TokenKind::Open(name) => stack.push(OpenGroup {
                    name,
                    open: token,
                    children: Vec::new(),
                }),
                TokenKind::Close(name) => {
                    let Some(group) = pop_if_named(&mut stack, name) else {
                        return Err(ToolbeltError::UnmatchedSeparator {
                            separator: token.value,
                            position: token.offset,
                        });
                    };
                    let node = Node::Group {
                        name: group.name,
                        open: group.open,
                        close: token,
                        children: group.children,
                    };
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(node),
                        None => root.push(node),
                    }
                }
                TokenKind::Text | TokenKind::Separator(_) => match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::Token(token)),
                    None => root.push(Node::Token(token)),
                },
            }
        }

        if let Some(group) = stack.pop() {
            return Err(ToolbeltError::UnclosedSeparator {
                separator: group.open.value,
                position: group.open.offset,
            });
        }

        Ok(root)
    }
}

fn pop_if_named<'s>(stack: &mut Vec<OpenGroup<'s>>, name: &str) -> Option<OpenGroup<'s>> {
    if stack.last().is_some_and(|group| group.name == name) {
        stack.pop()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splitter() -> MultiSplit {
        MultiSplit::builder()
            .separator(",")
            .pair("paren", "(", ")")
            .pair("bracket", "[", "]")
            .build()
            .unwrap()
    }

    #[test]
    fn builds_nested_groups() {
        let splitter = splitter();
        let nodes = splitter.tree("f(a,[b]),c").unwrap();
        assert_eq!(nodes.len(), 4);

        let Node::Group { name, children, .. } = &nodes[1] else {
            panic!("expected a group, got {:?}", nodes[1]);
        };
        assert_eq!(*name, "paren");
        assert_eq!(children.len(), 3);
        assert!(matches!(&children[2], Node::Group { name: "bracket", .. }));
        assert_eq!(children[2].flatten_text(), "[b]");
        assert!(matches!(&nodes[2], Node::Token(token) if token.value == ","));
    }

    #[test]
    fn flatten_reproduces_input() {
        let splitter = splitter();
        let text = "x(y[z],(w)),v";
        assert_eq!(flatten(&splitter.tree(text).unwrap()), text);
    }

    #[test]
    fn unmatched_close_is_error() {
        let splitter = splitter();
        let err = splitter.tree("a)b").unwrap_err();
        assert!(matches!(
            err,
            ToolbeltError::UnmatchedSeparator { ref separator, position: 1 } if separator == ")"
        ));
    }

    #[test]
    fn crossed_pairs_are_errors() {
        let splitter = splitter();
        assert!(matches!(
            splitter.tree("([)]"),
            Err(ToolbeltError::UnmatchedSeparator { position: 2, .. })
        ));
    }

    #[test]
    fn unclosed_open_is_error() {
        let splitter = splitter();
        assert!(matches!(
            splitter.tree("a(b[c]"),
            Err(ToolbeltError::UnclosedSeparator { position: 1, .. })
        ));
    }

    #[test]
    fn flat_input_stays_flat() {
        let splitter = splitter();
        let nodes = splitter.tree("a,b").unwrap();
        assert!(nodes.iter().all(|node| matches!(node, Node::Token(_))));
        assert_eq!(nodes.len(), 3);
    }
}
