use std::fmt::{self, Display};

use log::debug;

use casidx_core::models::Annotation;

use crate::errors::IndexError;
use crate::index::AnnotationIndex;

/// Handle of a node inside an [`AnnotationTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone)]
struct NodeData {
    annotation: Annotation,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    depth: usize,
}

///
/// Containment tree of the records below a container annotation.
///
/// The children of a node are what a strict, unambiguous subiterator over the node yields:
/// the top level, non-overlapping records contained in it. Nodes live in one arena and refer
/// to each other through [`NodeId`]s.
///
#[derive(Debug, Clone)]
pub struct AnnotationTree {
    nodes: Vec<NodeData>,
}

/// A borrowed view of one node.
#[derive(Debug, Clone, Copy)]
pub struct Node<'t> {
    tree: &'t AnnotationTree,
    id: NodeId,
}

impl AnnotationTree {
    pub(crate) fn build(index: &AnnotationIndex, container: &Annotation) -> Result<Self, IndexError> {
        let limit = index.len();
        let mut tree = AnnotationTree {
            nodes: vec![NodeData {
                annotation: *container,
                parent: None,
                children: Vec::new(),
                depth: 0,
            }],
        };

        let mut stack = vec![NodeId(0)];
        while let Some(parent) = stack.pop() {
            let (annotation, depth) = {
                let data = &tree.nodes[parent.0];
                (data.annotation, data.depth)
            };

            let mut children = Vec::new();
            for child in index.subiterator(&annotation, false, true) {
                if depth + 1 > limit {
                    return Err(IndexError::TreeDepthExceeded { limit });
                }
                let id = NodeId(tree.nodes.len());
                tree.nodes.push(NodeData {
                    annotation: *child,
                    parent: Some(parent),
                    children: Vec::new(),
                    depth: depth + 1,
                });
                children.push(id);
            }

            stack.extend(children.iter().rev());
            tree.nodes[parent.0].children = children;
        }

        debug!(
            "Built annotation tree of {} nodes under {}",
            tree.len(),
            container
        );
        Ok(tree)
    }

    pub fn root(&self) -> Node<'_> {
        Node {
            tree: self,
            id: NodeId(0),
        }
    }

    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        (id.0 < self.nodes.len()).then_some(Node { tree: self, id })
    }

    /// Number of nodes, the root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes, depth first, parents before their children.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder {
            tree: self,
            stack: vec![NodeId(0)],
        }
    }
}

impl<'t> Node<'t> {
    fn data(&self) -> &'t NodeData {
        &self.tree.nodes[self.id.0]
    }

    fn at(&self, id: NodeId) -> Node<'t> {
        Node {
            tree: self.tree,
            id,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn annotation(&self) -> &'t Annotation {
        &self.data().annotation
    }

    pub fn parent(&self) -> Option<Node<'t>> {
        self.data().parent.map(|p| self.at(p))
    }

    pub fn children(self) -> impl ExactSizeIterator<Item = Node<'t>> + 't {
        let tree = self.tree;
        tree.nodes[self.id.0]
            .children
            .iter()
            .map(move |id| Node { tree, id: *id })
    }

    pub fn child(&self, i: usize) -> Option<Node<'t>> {
        self.data().children.get(i).map(|id| self.at(*id))
    }

    pub fn child_count(&self) -> usize {
        self.data().children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.data().children.is_empty()
    }

    /// Position of this node among its parent's children.
    fn position(&self) -> Option<(Node<'t>, usize)> {
        let parent = self.parent()?;
        let i = parent.data().children.iter().position(|c| *c == self.id)?;
        Some((parent, i))
    }

    pub fn next_sibling(&self) -> Option<Node<'t>> {
        let (parent, i) = self.position()?;
        parent.child(i + 1)
    }

    pub fn previous_sibling(&self) -> Option<Node<'t>> {
        let (parent, i) = self.position()?;
        parent.child(i.checked_sub(1)?)
    }

    /// Distance to the root, which has depth 0.
    pub fn depth(&self) -> usize {
        self.data().depth
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

/// Pre-order walk produced by [`AnnotationTree::iter`].
pub struct PreOrder<'t> {
    tree: &'t AnnotationTree,
    stack: Vec<NodeId>,
}

impl<'t> Iterator for PreOrder<'t> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.nodes[id.0].children.iter().rev());
        Some(Node {
            tree: self.tree,
            id,
        })
    }
}

impl Display for AnnotationTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in self.iter() {
            writeln!(f, "{}{}", "  ".repeat(node.depth()), node.annotation())?;
        }
        Ok(())
    }
}

impl AnnotationIndex {
    ///
    /// Build the containment tree under `container`.
    ///
    /// Fails with [`IndexError::TreeDepthExceeded`] if the tree gets deeper than the index has
    /// records, which only happens when records keep containing each other, as with a
    /// [`SameSpanPolicy::Include`](crate::SameSpanPolicy::Include) index holding colocated
    /// records of unrelated types.
    ///
    pub fn tree(&self, container: &Annotation) -> Result<AnnotationTree, IndexError> {
        AnnotationTree::build(self, container)
    }
}
