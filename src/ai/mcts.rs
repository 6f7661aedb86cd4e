//! Simultaneous-move Monte Carlo tree search.
//!
//! Every edge is a pair of actions, one per side, and every node owns its
//! board outright. Nodes live in a flat arena and refer to each other by index.

use std::f64::consts::FRAC_1_SQRT_2;
use std::time::{Duration, Instant};

use anyhow::Result;
use rand::{prelude::*, rngs::StdRng};

use crate::core::{Action, Board, Side};

use super::strategy::{is_terminal, History, SelectAction};

pub type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Clone)]
pub struct MctsOptions {
    /// Wall-clock budget for one decision
    pub calculation_time: Duration,
    /// Candidates per side when expanding a node
    pub expansion_actions: usize,
    /// Candidates per side at each rollout step
    pub rollout_actions: usize,
    /// UCB1 exploration weight used while descending
    pub exploration: f64,
}

impl Default for MctsOptions {
    fn default() -> Self {
        Self {
            calculation_time: Duration::from_secs(1),
            expansion_actions: 10,
            rollout_actions: 5,
            exploration: FRAC_1_SQRT_2,
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct NodeStats {
    pub visits: u32,
    /// Wins minus non-wins for the searching side
    pub wins: i32,
}

impl NodeStats {
    pub fn ucb1(&self, parent_visits: u32, c: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }

        let n = self.visits as f64;
        let exploit = self.wins as f64 / n;
        let explore = (2.0 * (parent_visits as f64).ln() / n).sqrt();

        exploit + c * explore
    }

    /// Draws count against the searching side
    pub fn update(&mut self, result: f64) {
        self.visits += 1;
        if result > 0.0 {
            self.wins += 1;
        } else {
            self.wins -= 1;
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub board: Board,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// (upper, lower) actions leading here from the parent
    pub pair: Option<(Action, Action)>,
    pub fully_expanded: bool,
    pub stats: NodeStats,
}

impl Node {
    fn new(board: Board, parent: Option<NodeId>, pair: Option<(Action, Action)>) -> Self {
        Self {
            board,
            parent,
            children: Vec::new(),
            pair,
            fully_expanded: false,
            stats: NodeStats::default(),
        }
    }
}

pub struct SearchResult {
    pub best_action: Option<Action>,
    pub iterations: u64,
    pub root_visits: u32,
}

pub struct SmMcts {
    nodes: Vec<Node>,
    history: History,
    options: MctsOptions,
    rng: StdRng,
    iterations: u64,
}

impl SmMcts {
    pub fn new(board: Board, history: History, options: MctsOptions, rng: StdRng) -> Self {
        Self {
            nodes: vec![Node::new(board, None, None)],
            history,
            options,
            rng,
            iterations: 0,
        }
    }

    pub fn side(&self) -> Side {
        self.nodes[ROOT].board.side
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn root_children(&self) -> &[NodeId] {
        &self.nodes[ROOT].children
    }

    /// Visits of each root child, in creation order
    pub fn root_child_visits(&self) -> Vec<u32> {
        self.root_children()
            .iter()
            .map(|&id| self.nodes[id].stats.visits)
            .collect()
    }

    /// One selection, expansion, simulation and backpropagation pass
    pub fn explore(&mut self) -> Result<()> {
        let leaf = self.select()?;
        let result = self.simulate(leaf)?;
        self.backpropagate(leaf, result);
        self.iterations += 1;
        Ok(())
    }

    fn is_terminal(&mut self, id: NodeId) -> bool {
        is_terminal(&self.history, &mut self.nodes[id].board)
    }

    fn select(&mut self) -> Result<NodeId> {
        let mut id = ROOT;

        loop {
            if self.is_terminal(id) {
                return Ok(id);
            }
            if !self.nodes[id].fully_expanded {
                return self.expand(id);
            }
            match self.best_child(id, self.options.exploration) {
                Some(child) => id = child,
                None => return Ok(id),
            }
        }
    }

    /// Candidate pairs match the i-th Upper action with the i-th Lower action
    fn candidate_pairs(&self, board: &Board, limit: usize) -> Vec<(Action, Action)> {
        let uppers = board.actions(Side::Upper, limit);
        let lowers = board.actions(Side::Lower, limit);
        uppers.into_iter().zip(lowers).collect()
    }

    fn expand(&mut self, id: NodeId) -> Result<NodeId> {
        let tried: Vec<(Action, Action)> = self.nodes[id]
            .children
            .iter()
            .filter_map(|&child| self.nodes[child].pair)
            .collect();

        let untried: Vec<(Action, Action)> = self
            .candidate_pairs(&self.nodes[id].board, self.options.expansion_actions)
            .into_iter()
            .filter(|pair| !tried.contains(pair))
            .collect();

        if untried.len() <= 1 {
            self.nodes[id].fully_expanded = true;
        }

        let Some(&(upper, lower)) = untried.choose(&mut self.rng) else {
            return Ok(id);
        };

        let board = self.nodes[id]
            .board
            .update_board(&upper.represent(), &lower.represent())?;

        let child = self.nodes.len();
        self.nodes.push(Node::new(board, Some(id), Some((upper, lower))));
        self.nodes[id].children.push(child);

        Ok(child)
    }

    /// Random playout, scored for this search's side
    fn simulate(&mut self, id: NodeId) -> Result<f64> {
        let sign = self.side().sign() as f64;
        let mut board = self.nodes[id].board.clone();

        loop {
            if is_terminal(&self.history, &mut board) {
                return Ok(board.utility.value().unwrap_or(0.0) * sign);
            }

            let pairs = self.candidate_pairs(&board, self.options.rollout_actions);
            let Some(&(upper, lower)) = pairs.choose(&mut self.rng) else {
                return Ok(0.0);
            };
            board = board.update_board(&upper.represent(), &lower.represent())?;
        }
    }

    fn backpropagate(&mut self, leaf: NodeId, result: f64) {
        let mut current = Some(leaf);
        while let Some(id) = current {
            self.nodes[id].stats.update(result);
            current = self.nodes[id].parent;
        }
    }

    /// Highest UCB1 child; ties keep the earliest
    fn best_child(&self, id: NodeId, c: f64) -> Option<NodeId> {
        let parent_visits = self.nodes[id].stats.visits;
        let mut best: Option<(NodeId, f64)> = None;

        for &child in &self.nodes[id].children {
            let score = self.nodes[child].stats.ucb1(parent_visits, c);
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((child, score));
            }
        }

        best.map(|(child, _)| child)
    }

    /// The searching side's half of the best root pair, or its top limited
    /// action when nothing was expanded
    pub fn best_action(&self) -> Option<Action> {
        let side = self.side();

        if let Some(child) = self.best_child(ROOT, 0.0) {
            if let Some((upper, lower)) = self.nodes[child].pair {
                return Some(match side {
                    Side::Upper => upper,
                    Side::Lower => lower,
                });
            }
        }

        self.nodes[ROOT].board.actions(side, 1).first().copied()
    }

    pub fn result(&self) -> SearchResult {
        SearchResult {
            best_action: self.best_action(),
            iterations: self.iterations,
            root_visits: self.nodes[ROOT].stats.visits,
        }
    }
}

impl SelectAction for SmMcts {
    fn select_action(&mut self) -> Result<Option<Action>> {
        let start_time = Instant::now();

        while start_time.elapsed() < self.options.calculation_time {
            self.explore()?;
        }

        let result = self.result();
        log::debug!(
            "mcts ran {} iterations over {} nodes in {:.3}s",
            result.iterations,
            self.nodes.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(result.best_action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Coord, Token, TokenType};

    /// Upper's scissors cannot be beaten; Lower has two tokens left
    fn endgame(side: Side) -> Board {
        let mut board = Board::new(side);
        board.team_mut(Side::Upper).remaining_throws = 0;
        board.team_mut(Side::Lower).remaining_throws = 0;
        for (kind, owner, x, y) in [
            (TokenType::R, Side::Upper, 0, 0),
            (TokenType::S, Side::Upper, 1, -1),
            (TokenType::P, Side::Lower, 3, -1),
            (TokenType::S, Side::Lower, -2, 1),
        ] {
            board.add_token(Token::new(kind, owner, Coord::new(x, y)));
        }
        board
    }

    fn search(board: Board, millis: u64) -> SmMcts {
        let options = MctsOptions {
            calculation_time: Duration::from_millis(millis),
            ..MctsOptions::default()
        };
        SmMcts::new(board, History::new(), options, StdRng::seed_from_u64(11))
    }

    #[test]
    fn test_ucb1() {
        let unvisited = NodeStats::default();
        assert_eq!(unvisited.ucb1(10, FRAC_1_SQRT_2), f64::INFINITY);

        let stats = NodeStats { visits: 4, wins: 2 };
        assert_eq!(stats.ucb1(16, 0.0), 0.5);
        assert!(stats.ucb1(16, FRAC_1_SQRT_2) > 0.5);
    }

    #[test]
    fn test_draw_counts_as_loss() {
        let mut stats = NodeStats::default();
        stats.update(1.0);
        stats.update(0.0);
        stats.update(-1.0);
        assert_eq!(stats.visits, 3);
        assert_eq!(stats.wins, -1);
    }

    #[test]
    fn test_root_visits_never_decrease() {
        let mut mcts = search(endgame(Side::Upper), 0);
        let mut previous: Vec<u32> = Vec::new();

        for _ in 0..40 {
            mcts.explore().unwrap();
            let visits = mcts.root_child_visits();
            assert!(visits.len() >= previous.len());
            for (before, after) in previous.iter().zip(&visits) {
                assert!(before <= after);
            }
            previous = visits;
        }

        let total: u32 = previous.iter().sum();
        assert_eq!(mcts.result().root_visits, 40);
        assert!(total <= 40);
    }

    #[test]
    fn test_chosen_action_was_visited() {
        let mut mcts = search(endgame(Side::Upper), 0);
        for _ in 0..30 {
            mcts.explore().unwrap();
        }

        let action = mcts.select_action().unwrap().unwrap();
        let chosen = mcts
            .root_children()
            .iter()
            .find(|&&id| mcts.node(id).pair.map(|(upper, _)| upper) == Some(action))
            .copied()
            .unwrap();
        assert!(mcts.node(chosen).stats.visits > 0);
    }

    #[test]
    fn test_children_are_distinct_pairs() {
        let mut mcts = search(endgame(Side::Lower), 0);
        for _ in 0..30 {
            mcts.explore().unwrap();
        }

        let pairs: Vec<_> = mcts.root_children().iter().map(|&id| mcts.node(id).pair).collect();
        for (i, a) in pairs.iter().enumerate() {
            assert!(pairs[i + 1..].iter().all(|b| b != a));
        }
    }

    #[test]
    fn test_zero_budget_falls_back() {
        let board = endgame(Side::Lower);
        let expected = board.actions(Side::Lower, 1).first().copied();

        let mut mcts = search(board, 0);
        assert!(mcts.root_children().is_empty());
        assert_eq!(mcts.select_action().unwrap(), expected);
        assert!(expected.is_some());
    }

    #[test]
    fn test_timed_search_returns_action() {
        let board = endgame(Side::Upper);
        let candidates = board.actions(Side::Upper, MctsOptions::default().expansion_actions);

        let mut mcts = search(board, 50);
        let action = mcts.select_action().unwrap().unwrap();
        assert!(candidates.contains(&action));
        assert!(mcts.result().iterations > 0);
    }
}
