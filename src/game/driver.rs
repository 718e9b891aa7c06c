//! The elimination game loop.
//!
//! Each step asks the stepper for a nominee and compares it with the hidden
//! target. A miss prunes the graph: if the target lies below the nominee, all
//! of the nominee's ancestors go; if it lies above, all of its descendants go;
//! either way the nominee itself goes. The graph therefore shrinks by at least
//! one node per step and the target is never removed, so a game on `n` nodes
//! ends within `n` steps.

use tracing::{debug, info};

use crate::error::{GraphError, Result};
use crate::game::Stepper;
use crate::graph::{Graph, Node};

/// Whether a game is still in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// The target has not been nominated yet.
    Running,
    /// The target was nominated.
    Done,
}

/// What one step revealed about the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// The nominee was the target.
    Found,
    /// The target is a descendant of the nominee; `pruned` ancestors were removed.
    TargetBelow {
        /// Number of ancestors removed.
        pruned: usize,
    },
    /// The target is an ancestor of the nominee; `pruned` descendants were removed.
    TargetAbove {
        /// Number of descendants removed.
        pruned: usize,
    },
    /// The nominee and the target are unrelated; only the nominee was removed.
    Unrelated,
}

/// One game: a graph, a hidden target, and the stepper searching for it.
#[derive(Debug)]
pub struct Game<S> {
    graph: Graph,
    target: Node,
    stepper: S,
    steps: usize,
    state: GameState,
}

impl<S: Stepper> Game<S> {
    /// Starts a game on `graph` with the given hidden `target`.
    ///
    /// Fails with [`GraphError::NodeNotFound`] if `target` is not in `graph`.
    pub fn new(graph: Graph, target: Node, stepper: S) -> Result<Self> {
        if !graph.contains(&target) {
            return Err(GraphError::NodeNotFound(target));
        }
        Ok(Self {
            graph,
            target,
            stepper,
            steps: 0,
            state: GameState::Running,
        })
    }

    /// The surviving search space.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The hidden target.
    pub fn target(&self) -> &Node {
        &self.target
    }

    /// Number of missed nominations so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Current state.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Plays one nomination.
    ///
    /// Once the game is [`GameState::Done`], further calls return
    /// [`Feedback::Found`] and change nothing. Any stepper or graph error is
    /// returned as-is and the game should be abandoned.
    pub fn step(&mut self) -> Result<Feedback> {
        if self.state == GameState::Done {
            return Ok(Feedback::Found);
        }

        let nominee = self.stepper.step(&self.graph)?;
        if !self.graph.contains(&nominee) {
            return Err(GraphError::NodeNotFound(nominee));
        }

        if nominee == self.target {
            self.state = GameState::Done;
            info!(node = %self.target, steps = self.steps, "found target");
            return Ok(Feedback::Found);
        }

        let feedback = if self.graph.children(&nominee).contains(&self.target) {
            let ancestors = self.graph.parents(&nominee);
            for node in &ancestors {
                self.graph.remove_node(node)?;
            }
            Feedback::TargetBelow {
                pruned: ancestors.len(),
            }
        } else {
            let ancestors = self.graph.parents(&nominee);
            if ancestors.contains(&self.target) {
                let descendants = self.graph.children(&nominee);
                for node in &descendants {
                    self.graph.remove_node(node)?;
                }
                Feedback::TargetAbove {
                    pruned: descendants.len(),
                }
            } else {
                Feedback::Unrelated
            }
        };

        self.graph.remove_node(&nominee)?;
        self.steps += 1;
        debug!(
            step = self.steps,
            %nominee,
            ?feedback,
            remaining = self.graph.node_count(),
            "nomination missed"
        );
        Ok(feedback)
    }

    /// Plays until the target is found and returns the number of steps taken.
    pub fn run(&mut self) -> Result<usize> {
        while self.state == GameState::Running {
            self.step()?;
        }
        Ok(self.steps)
    }
}
