use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use relex_protocol::{DepLabel, ParsedSentence, Token, TokenId};

use crate::error::TreeError;

/// Validated dependency tree of one sentence.
///
/// Nodes are laid out in token order, so `NodeIndex::new(i)` is token `i`.
/// Edges run parent to child and carry the child's label.
#[derive(Debug)]
pub struct DependencyTree<'s> {
    sentence: &'s ParsedSentence,
    graph: DiGraph<TokenId, DepLabel>,
    root: NodeIndex,
}

impl<'s> DependencyTree<'s> {
    /// Builds the tree, rejecting parses that are not a single rooted tree.
    pub fn build(sentence: &'s ParsedSentence) -> Result<Self, TreeError> {
        let root = sentence.root()?.index;
        let count = sentence.tokens.len();

        let mut graph = DiGraph::with_capacity(count, count.saturating_sub(1));
        for (position, token) in sentence.tokens.iter().enumerate() {
            if token.index.index() != position {
                return Err(TreeError::Misnumbered(token.index));
            }
            graph.add_node(token.index);
        }

        for token in &sentence.tokens {
            match (token.parent(), token.dep == DepLabel::Root) {
                (None, true) => {}
                (None, false) => return Err(TreeError::Orphan(token.index)),
                (Some(_), true) => return Err(TreeError::RootHasHead(token.index)),
                (Some(head), false) if head.index() >= count => {
                    return Err(TreeError::DanglingHead { token: token.index, head });
                }
                (Some(head), false) => {
                    graph.add_edge(NodeIndex::new(head.index()), NodeIndex::new(token.index.index()), token.dep);
                }
            }
        }

        // One parent per non-root token plus acyclicity makes it a tree.
        if is_cyclic_directed(&graph) {
            return Err(TreeError::Cycle);
        }

        Ok(Self {
            sentence,
            graph,
            root: NodeIndex::new(root.index()),
        })
    }

    pub fn sentence(&self) -> &'s ParsedSentence {
        self.sentence
    }

    pub fn root(&self) -> &'s Token {
        self.token_at(self.root)
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Direct children of `id` in sentence order.
    pub fn children(&self, id: TokenId) -> Vec<&'s Token> {
        if id.index() >= self.len() {
            return Vec::new();
        }
        self.child_nodes(NodeIndex::new(id.index()))
            .into_iter()
            .map(|node| self.token_at(node))
            .collect()
    }

    /// Every root-to-leaf path, depth first with children in sentence order.
    /// A root without children yields the single path `[root]`.
    pub fn paths(&self) -> Vec<Vec<&'s Token>> {
        let mut paths = Vec::new();
        let mut path = Vec::new();
        self.walk(self.root, &mut path, &mut paths);
        paths
    }

    fn walk(&self, node: NodeIndex, path: &mut Vec<&'s Token>, paths: &mut Vec<Vec<&'s Token>>) {
        path.push(self.token_at(node));

        let children = self.child_nodes(node);
        if children.is_empty() {
            paths.push(path.clone());
        }
        for child in children {
            self.walk(child, path, paths);
        }

        path.pop();
    }

    fn child_nodes(&self, node: NodeIndex) -> Vec<NodeIndex> {
        // petgraph yields outgoing edges newest first
        let mut children: Vec<NodeIndex> = self.graph.edges(node).map(|edge| edge.target()).collect();
        children.sort();
        children
    }

    fn token_at(&self, node: NodeIndex) -> &'s Token {
        &self.sentence.tokens[self.graph[node].index()]
    }
}
