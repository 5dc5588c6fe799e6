//! The stepping state machine: per node scale state, the chain of nodes, the tick source and the
//! sequencer that wires them together.

mod chain;
mod node;
mod sequencer;
mod state;
mod ticker;

pub(crate) use chain::{AdvanceOutcome, Chain};
pub(crate) use node::{BracketMark, Neighbor, Node};
pub(crate) use sequencer::{Activation, Sequencer};
pub(crate) use state::{Pace, ScaleState, StartOutcome, UpdateOutcome};
pub(crate) use ticker::{TickState, Ticker};

use serde::Deserialize;

/// The direction a step or a sweep moves in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Build a direction out of the sign of a number, treating zero as forward.
    pub(crate) fn from_sign(value: f64) -> Self {
        if value < 0.0 { Self::Backward } else { Self::Forward }
    }

    pub(crate) fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }

    pub(crate) fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// What happens once a node hands off to its neighbor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum StepMode {
    /// Stop after every node step and wait for the next activation.
    #[default]
    Step,

    /// Keep going from node to node until the sweep reverses at a boundary.
    Sweep,
}
