use super::{Direction, Neighbor, Node, Pace, StartOutcome, UpdateOutcome};
use crate::config::{ConfigError, SequenceConfig};

/// The result of advancing the chain by a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AdvanceOutcome {
    /// Nothing is stepping.
    Idle,
    /// The active node moved but hasn't finished its step.
    Progressed { node: usize },
    /// A node finished its step and the next one in the chain became active.
    HandedOff { from: usize, to: usize },
    /// The node at a boundary finished its step and the chain turned around.
    Reversed { at: usize, direction: Direction },
}

/// An ordered, fixed size chain of nodes, only one of which steps at a time.
#[derive(Debug)]
pub(crate) struct Chain {
    nodes: Vec<Node>,
    active: usize,
    direction: Direction,
}

impl Chain {
    pub(crate) fn new(config: &SequenceConfig) -> Result<Self, ConfigError> {
        if config.nodes == 0 {
            return Err(ConfigError::EmptyChain);
        }
        let pace = Pace { increment: config.increment, completion_threshold: config.completion_threshold };
        let nodes = (0..config.nodes).map(|index| Node::new(index, config.nodes, pace)).collect();
        Ok(Self { nodes, active: 0, direction: Direction::Forward })
    }

    pub(crate) fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn active(&self) -> usize {
        self.active
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether a node is currently in the middle of a step.
    pub(crate) fn is_stepping(&self) -> bool {
        self.nodes[self.active].state().is_active()
    }

    /// Start a step on the active node unless one is already running.
    pub(crate) fn request_step(&mut self) -> StartOutcome {
        self.nodes[self.active].start_updating()
    }

    /// Tick the active node, handing off or reversing once its step completes.
    pub(crate) fn advance(&mut self) -> AdvanceOutcome {
        let node = &mut self.nodes[self.active];
        match node.update() {
            UpdateOutcome::Idle => AdvanceOutcome::Idle,
            UpdateOutcome::Pending => AdvanceOutcome::Progressed { node: self.active },
            UpdateOutcome::Completed(_) => match node.neighbor(self.direction) {
                Neighbor::Adjacent(to) => {
                    let from = self.active;
                    self.active = to;
                    AdvanceOutcome::HandedOff { from, to }
                }
                Neighbor::Boundary => {
                    self.direction = self.direction.reversed();
                    AdvanceOutcome::Reversed { at: self.active, direction: self.direction }
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(nodes: usize) -> Chain {
        Chain::new(&SequenceConfig { nodes, ..Default::default() }).expect("invalid chain")
    }

    /// Run a full step on the active node and return its final outcome.
    fn complete_step(chain: &mut Chain) -> AdvanceOutcome {
        assert!(matches!(chain.request_step(), StartOutcome::Started(_)));
        loop {
            match chain.advance() {
                AdvanceOutcome::Progressed { .. } => continue,
                outcome => return outcome,
            }
        }
    }

    #[test]
    fn empty_chain_rejected() {
        let result = Chain::new(&SequenceConfig { nodes: 0, ..Default::default() });
        assert!(matches!(result, Err(ConfigError::EmptyChain)));
    }

    #[test]
    fn starts_idle_at_first_node() {
        let chain = chain(5);
        assert_eq!(chain.len(), 5);
        assert_eq!(chain.active(), 0);
        assert_eq!(chain.direction(), Direction::Forward);
        assert!(!chain.is_stepping());
        let indexes: Vec<_> = chain.nodes().iter().map(Node::index).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn advance_while_idle_is_noop() {
        let mut chain = chain(3);
        assert_eq!(chain.advance(), AdvanceOutcome::Idle);
        assert_eq!(chain.active(), 0);
        assert_eq!(chain.nodes()[0].state().scale(), 0.0);
    }

    #[test]
    fn request_while_stepping_is_noop() {
        let mut chain = chain(3);
        assert_eq!(chain.request_step(), StartOutcome::Started(Direction::Forward));
        chain.advance();
        assert_eq!(chain.request_step(), StartOutcome::AlreadyRunning);
        assert!(chain.is_stepping());
        assert_eq!(chain.active(), 0);
    }

    #[test]
    fn hands_off_to_next_node() {
        let mut chain = chain(3);
        assert_eq!(complete_step(&mut chain), AdvanceOutcome::HandedOff { from: 0, to: 1 });
        assert_eq!(chain.active(), 1);
        assert!(!chain.is_stepping());
        assert_eq!(chain.nodes()[0].state().scale(), 1.0);
    }

    #[test]
    fn reverses_at_last_node() {
        let mut chain = chain(5);
        for _ in 0..4 {
            complete_step(&mut chain);
        }
        assert_eq!(chain.active(), 4);
        assert_eq!(chain.direction(), Direction::Forward);

        let outcome = complete_step(&mut chain);
        assert_eq!(outcome, AdvanceOutcome::Reversed { at: 4, direction: Direction::Backward });
        assert_eq!(chain.active(), 4);
        assert_eq!(chain.direction(), Direction::Backward);
    }

    #[test]
    fn full_round_trip() {
        let mut chain = chain(5);
        let mut activations = Vec::new();
        let mut reversals = 0;
        for _ in 0..10 {
            activations.push(chain.active());
            if let AdvanceOutcome::Reversed { .. } = complete_step(&mut chain) {
                reversals += 1;
            }
        }
        assert_eq!(activations, vec![0, 1, 2, 3, 4, 4, 3, 2, 1, 0]);
        assert_eq!(reversals, 2);
        assert_eq!(chain.active(), 0);
        assert_eq!(chain.direction(), Direction::Forward);
        assert!(chain.nodes().iter().all(|node| node.state().scale() == 0.0));
    }

    #[test]
    fn single_node_oscillates() {
        let mut chain = chain(1);
        let mut expected = Direction::Backward;
        for step in 0..6 {
            let outcome = complete_step(&mut chain);
            assert_eq!(outcome, AdvanceOutcome::Reversed { at: 0, direction: expected });
            let scale = chain.nodes()[0].state().scale();
            assert_eq!(scale, if step % 2 == 0 { 1.0 } else { 0.0 });
            expected = expected.reversed();
        }
    }
}
