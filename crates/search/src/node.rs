//! Search nodes stored in a flat arena, linked to their predecessor by index.

use serde::{Deserialize, Serialize};
use tetrad_core::{Movement, PieceState};

/// Handle into a [`NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchNode {
    pub parent: Option<NodeId>,
    pub piece: PieceState,
    /// Movement that produced this node; `None` for a depth's starting node.
    pub movement: Option<Movement>,
    /// Non-down movements since the last drop.
    pub repeat: u32,
    /// Movements from the depth's starting node.
    pub steps: u32,
}

impl SearchNode {
    pub fn root(piece: PieceState) -> Self {
        Self {
            parent: None,
            piece,
            movement: None,
            repeat: 0,
            steps: 0,
        }
    }

    pub fn child(parent_id: NodeId, parent: &SearchNode, piece: PieceState, movement: Movement) -> Self {
        Self {
            parent: Some(parent_id),
            piece,
            movement: Some(movement),
            repeat: if movement == Movement::Down {
                0
            } else {
                parent.repeat + 1
            },
            steps: parent.steps + 1,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every node created after the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    /// Walk from `id` back to its depth's starting node.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            arena: self,
            cursor: Some(id),
        }
    }
}

pub struct Ancestors<'a> {
    arena: &'a NodeArena,
    cursor: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a SearchNode;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.arena.get(id);
        self.cursor = node.parent;
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetrad_core::PieceKind;

    #[test]
    fn test_child_tracks_repeat_and_steps() {
        let mut arena = NodeArena::new();
        let piece = PieceState::spawn(PieceKind::T);
        let root = arena.push(SearchNode::root(piece));
        let left = SearchNode::child(root, arena.get(root), piece.translated(-1, 0), Movement::Left);
        let left_id = arena.push(left);
        let down = SearchNode::child(left_id, arena.get(left_id), piece.translated(-1, -1), Movement::Down);

        assert_eq!(left.repeat, 1);
        assert_eq!(left.steps, 1);
        assert_eq!(down.repeat, 0);
        assert_eq!(down.steps, 2);
    }

    #[test]
    fn test_truncate_and_ancestors() {
        let mut arena = NodeArena::new();
        let piece = PieceState::spawn(PieceKind::O);
        let root = arena.push(SearchNode::root(piece));
        let a = arena.push(SearchNode::child(root, arena.get(root), piece, Movement::RotateCw));
        assert_eq!(arena.ancestors(a).count(), 2);

        let mark = arena.len();
        arena.push(SearchNode::root(piece));
        arena.truncate(mark);
        assert_eq!(arena.len(), 2);
    }
}
