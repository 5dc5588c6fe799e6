use super::{Direction, Pace, ScaleState, StartOutcome, UpdateOutcome};

/// What lies next to a node in some direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Neighbor {
    /// The index of the adjacent node.
    Adjacent(usize),
    /// There's no node that way; the caller should reverse.
    Boundary,
}

/// One of the two corner marks drawn for a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct BracketMark {
    /// How far the mark's arms have grown, in `[0, 1]`.
    pub(crate) progress: f64,
    /// Whether this is the point-mirrored mark growing from the opposite corner.
    pub(crate) mirrored: bool,
}

/// A node in the chain.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    index: usize,
    state: ScaleState,
    prev: Option<usize>,
    next: Option<usize>,
}

impl Node {
    /// Create the node at `index` in a chain of `count` nodes.
    pub(crate) fn new(index: usize, count: usize, pace: Pace) -> Self {
        let prev = index.checked_sub(1);
        let next = Some(index + 1).filter(|next| *next < count);
        Self { index, state: ScaleState::new(pace), prev, next }
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn state(&self) -> &ScaleState {
        &self.state
    }

    pub(crate) fn neighbor(&self, direction: Direction) -> Neighbor {
        let neighbor = match direction {
            Direction::Forward => self.next,
            Direction::Backward => self.prev,
        };
        neighbor.map(Neighbor::Adjacent).unwrap_or(Neighbor::Boundary)
    }

    pub(crate) fn update(&mut self) -> UpdateOutcome {
        self.state.update()
    }

    pub(crate) fn start_updating(&mut self) -> StartOutcome {
        self.state.start_updating()
    }

    /// The two bracket marks for the current scale.
    ///
    /// The first half of the scale grows the first mark, the second half grows the mirrored one.
    pub(crate) fn marks(&self) -> [BracketMark; 2] {
        let scale = self.state.scale();
        [0, 1].map(|j| BracketMark {
            progress: (scale - 0.5 * j as f64).clamp(0.0, 0.5) * 2.0,
            mirrored: j == 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::first(0, Neighbor::Boundary, Neighbor::Adjacent(1))]
    #[case::middle(2, Neighbor::Adjacent(1), Neighbor::Adjacent(3))]
    #[case::last(4, Neighbor::Adjacent(3), Neighbor::Boundary)]
    fn neighbors(#[case] index: usize, #[case] backward: Neighbor, #[case] forward: Neighbor) {
        let node = Node::new(index, 5, Pace::default());
        assert_eq!(node.neighbor(Direction::Backward), backward);
        assert_eq!(node.neighbor(Direction::Forward), forward);
    }

    #[test]
    fn single_node_is_boundary_both_ways() {
        let node = Node::new(0, 1, Pace::default());
        assert_eq!(node.neighbor(Direction::Backward), Neighbor::Boundary);
        assert_eq!(node.neighbor(Direction::Forward), Neighbor::Boundary);
    }

    fn node_at_scale(ticks: usize) -> Node {
        let mut node = Node::new(0, 1, Pace { increment: 0.25, completion_threshold: 1.0 });
        node.start_updating();
        for _ in 0..ticks {
            node.update();
        }
        node
    }

    #[rstest]
    #[case::empty(0, 0.0, 0.0)]
    #[case::quarter(1, 0.5, 0.0)]
    #[case::half(2, 1.0, 0.0)]
    #[case::three_quarters(3, 1.0, 0.5)]
    #[case::full(5, 1.0, 1.0)]
    fn marks_split_scale_in_halves(#[case] ticks: usize, #[case] first: f64, #[case] second: f64) {
        let [a, b] = node_at_scale(ticks).marks();
        assert_eq!(a, BracketMark { progress: first, mirrored: false });
        assert_eq!(b, BracketMark { progress: second, mirrored: true });
    }
}
