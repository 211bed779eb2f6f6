//! Turn a terminal node back into the movements that reach it.

use tetrad_core::Movement;

use crate::node::{NodeArena, NodeId};

/// Movements from the starting position to `terminal`, in replay order.
pub fn movements_for(arena: &NodeArena, terminal: NodeId) -> Vec<Movement> {
    let mut movements: Vec<Movement> = arena
        .ancestors(terminal)
        .filter_map(|node| node.movement)
        .collect();
    movements.reverse();
    movements
}
