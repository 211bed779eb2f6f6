//! Exhaustive placement search with a fixed lookahead.
//!
//! Each depth runs a breadth-first traversal of the piece's reachable
//! positions. Every resting position is locked onto a copy of the board and
//! either searched one piece deeper or graded. The lowest grade wins; ties go
//! to the chain discovered first, so expansion order is part of the result.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use smallvec::SmallVec;
use tetrad_core::{Board, Movement, PieceState, Rotation};
use tetrad_engine::{can_place, frames_per_step, is_locked, successor, VisitedSet};
use tetrad_eval::Evaluator;
use thiserror::Error;

use crate::config::SearchConfig;
use crate::input::SearchInput;
use crate::lock_table::{LockPosition, LockPositionTable};
use crate::node::{NodeArena, NodeId, SearchNode};
use crate::reconstruct::movements_for;

/// Added to a chain whose next piece cannot spawn on the simulated board.
pub const TOP_OUT_PENALTY: f64 = 1.0e12;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    #[error("falling piece is obstructed before the search starts")]
    ObstructedStart,
    #[error("no reachable resting placement")]
    NoPlacement,
    #[error("search cancelled")]
    Cancelled,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes created across all depths.
    pub nodes: u64,
    /// Resting positions found across all depths.
    pub terminals: u64,
    /// Chains graded by the evaluator.
    pub leaves: u64,
}

/// Outcome of one search. Owns the depth-0 node arena, so hints and
/// movements stay valid for as long as the result is held.
#[derive(Clone, Debug)]
pub struct SearchResult {
    generation: u64,
    grade: f64,
    terminal: NodeId,
    placements: Vec<PieceState>,
    arena: NodeArena,
    lock_table: LockPositionTable,
    stats: SearchStats,
}

impl SearchResult {
    /// Spawn counter of the input this result answers.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn grade(&self) -> f64 {
        self.grade
    }

    /// Depth-0 node where the falling piece comes to rest.
    pub fn terminal(&self) -> NodeId {
        self.terminal
    }

    /// Resting position of the falling piece in the best chain.
    pub fn best_placement(&self) -> PieceState {
        self.arena.get(self.terminal).piece
    }

    /// Resting position of every piece in the best chain, falling piece first.
    pub fn placements(&self) -> &[PieceState] {
        &self.placements
    }

    /// Movements taking the falling piece to its best resting position.
    pub fn movements(&self) -> Vec<Movement> {
        movements_for(&self.arena, self.terminal)
    }

    /// Movements to an alternative resting position from the lock table.
    pub fn movements_to(&self, position: &LockPosition) -> Vec<Movement> {
        movements_for(&self.arena, position.node)
    }

    pub fn lock_position(&self, row: usize, column: usize, rotation: Rotation) -> Option<&LockPosition> {
        self.lock_table.get(row, column, rotation)
    }

    pub fn lock_positions(&self) -> &LockPositionTable {
        &self.lock_table
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}

pub struct SearchEngine {
    config: SearchConfig,
    evaluator: Evaluator,
    cancel: Option<Arc<AtomicBool>>,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        let evaluator = Evaluator::new(config.weights, config.mode);
        Self {
            config: SearchConfig {
                lookahead: config.lookahead.max(1),
                ..config
            },
            evaluator,
            cancel: None,
        }
    }

    /// Abort between depth levels once `flag` is set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn search(&self, input: &SearchInput) -> Result<SearchResult, SearchError> {
        if !can_place(&input.board, &input.current) {
            return Err(SearchError::ObstructedStart);
        }

        let mut run = Run {
            input,
            evaluator: &self.evaluator,
            lookahead: self.config.lookahead,
            frame_limit: self
                .config
                .frame_limited
                .then(|| frames_per_step(input.level)),
            cancel: self.cancel.as_deref(),
            arena: NodeArena::new(),
            chain: Vec::with_capacity(self.config.lookahead),
            root_terminal: None,
            best: None,
            lock_table: LockPositionTable::new(),
            stats: SearchStats::default(),
            cancelled: false,
        };
        run.explore(&input.board, 0, 0);

        if run.cancelled {
            return Err(SearchError::Cancelled);
        }
        let Some(best) = run.best else {
            return Err(SearchError::NoPlacement);
        };

        log::debug!(
            "search gen {}: grade {:.3}, {} nodes, {} terminals, {} leaves",
            input.generation,
            best.grade,
            run.stats.nodes,
            run.stats.terminals,
            run.stats.leaves
        );

        Ok(SearchResult {
            generation: input.generation,
            grade: best.grade,
            terminal: best.terminal,
            placements: best.placements,
            arena: run.arena,
            lock_table: run.lock_table,
            stats: run.stats,
        })
    }
}

struct Best {
    grade: f64,
    terminal: NodeId,
    placements: Vec<PieceState>,
}

/// Mutable state of a single search invocation.
struct Run<'a> {
    input: &'a SearchInput,
    evaluator: &'a Evaluator,
    lookahead: usize,
    frame_limit: Option<u32>,
    cancel: Option<&'a AtomicBool>,
    arena: NodeArena,
    /// Resting positions along the chain being explored.
    chain: Vec<PieceState>,
    /// Depth-0 node the current chain started from.
    root_terminal: Option<NodeId>,
    best: Option<Best>,
    lock_table: LockPositionTable,
    stats: SearchStats,
    cancelled: bool,
}

impl Run<'_> {
    /// Traverse one depth level. Returns the best grade found below it.
    fn explore(&mut self, board: &Board, depth: usize, lines: u32) -> Option<f64> {
        if self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            self.cancelled = true;
            return None;
        }
        let start = self.input.piece_at(depth)?;
        if !can_place(board, &start) {
            // next piece cannot enter: grade the chain so far as a loss
            return Some(self.grade_leaf(board, lines, TOP_OUT_PENALTY));
        }

        let mark = self.arena.len();
        let mut visited = VisitedSet::new();
        let mut queue = VecDeque::new();
        visited.visit(&start);
        queue.push_back(self.push_node(SearchNode::root(start)));
        let mut subtree_best: Option<f64> = None;

        while let Some(id) = queue.pop_front() {
            let node = *self.arena.get(id);

            for movement in Movement::ALL {
                if movement != Movement::Down
                    && self.frame_limit.is_some_and(|limit| node.repeat >= limit)
                {
                    continue;
                }
                let Some(next) = successor(board, &node.piece, movement) else {
                    continue;
                };
                if visited.visit(&next) {
                    let child = self.push_node(SearchNode::child(id, &node, next, movement));
                    queue.push_back(child);
                }
            }

            if !is_locked(board, &node.piece) {
                continue;
            }
            self.stats.terminals += 1;

            let mut settled = *board;
            let total = lines + settled.lock_and_clear(&node.piece) as u32;
            if depth == 0 {
                self.root_terminal = Some(id);
                self.lock_table.insert(LockPosition {
                    node: id,
                    piece: node.piece,
                    chain_len: node.steps,
                    grade: None,
                });
            }

            self.chain.push(node.piece);
            let grade = if depth + 1 < self.lookahead && self.input.piece_at(depth + 1).is_some() {
                self.explore(&settled, depth + 1, total)
            } else {
                Some(self.grade_leaf(&settled, total, 0.0))
            };
            self.chain.pop();

            if self.cancelled {
                break;
            }
            if let Some(grade) = grade {
                if depth == 0 {
                    self.lock_table.set_grade(&node.piece, grade);
                }
                if subtree_best.map_or(true, |b| grade < b) {
                    subtree_best = Some(grade);
                }
            }
        }

        if depth > 0 {
            self.arena.truncate(mark);
        }
        subtree_best
    }

    fn push_node(&mut self, node: SearchNode) -> NodeId {
        self.stats.nodes += 1;
        self.arena.push(node)
    }

    /// Grade the current chain and keep it if it beats the best so far.
    fn grade_leaf(&mut self, board: &Board, lines: u32, penalty: f64) -> f64 {
        self.stats.leaves += 1;
        let mut heights: SmallVec<[Option<i8>; 4]> =
            self.chain.iter().map(|p| Some(p.lowest_row())).collect();
        heights.resize(self.lookahead.max(heights.len()), None);

        let grade = self.evaluator.evaluate(lines, board, &heights) + penalty;
        let improves = self.best.as_ref().map_or(true, |b| grade < b.grade);
        if improves {
            if let Some(terminal) = self.root_terminal {
                log::trace!("new best {grade:.3} via {:?}", self.chain);
                self.best = Some(Best {
                    grade,
                    terminal,
                    placements: self.chain.clone(),
                });
            }
        }
        grade
    }
}
