use super::{AdvanceOutcome, Chain, Direction, StartOutcome, StepMode, TickState, Ticker};
use log::{debug, info};
use std::time::Instant;

/// The result of an external activation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Activation {
    /// A step started on `node`.
    Started { node: usize, direction: Direction },
    /// A step is already running; the request was ignored.
    Busy,
}

/// Everything that happened during a [Sequencer::poll] call.
#[derive(Debug, Default)]
pub(crate) struct Poll {
    /// One outcome per tick that was delivered.
    pub(crate) outcomes: Vec<AdvanceOutcome>,
}

impl Poll {
    /// Whether the chain changed and needs to be drawn again.
    pub(crate) fn needs_redraw(&self) -> bool {
        !self.outcomes.is_empty()
    }
}

/// Drives a [Chain] using a [Ticker].
///
/// The ticker only runs while a node is stepping. Once the step (or the sweep, in
/// [StepMode::Sweep]) is over the ticker is stopped until the next activation.
#[derive(Debug)]
pub(crate) struct Sequencer {
    chain: Chain,
    ticker: Ticker,
    mode: StepMode,
}

impl Sequencer {
    pub(crate) fn new(chain: Chain, ticker: Ticker, mode: StepMode) -> Self {
        Self { chain, ticker, mode }
    }

    pub(crate) fn chain(&self) -> &Chain {
        &self.chain
    }

    pub(crate) fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.ticker.next_deadline()
    }

    /// Begin a step on the active node if the chain is idle.
    pub(crate) fn activate(&mut self, now: Instant) -> Activation {
        match self.chain.request_step() {
            StartOutcome::Started(direction) => {
                let node = self.chain.active();
                info!("starting {direction} step on node {node}");
                self.ticker.start(now);
                Activation::Started { node, direction }
            }
            StartOutcome::AlreadyRunning => {
                debug!("ignoring activation, node {} is still stepping {}", self.chain.active(), self.chain.direction());
                Activation::Busy
            }
        }
    }

    /// Handle every tick that's due at `now`.
    pub(crate) fn poll(&mut self, now: Instant) -> Poll {
        let mut poll = Poll::default();
        while let TickState::Due = self.ticker.poll(now) {
            let outcome = self.chain.advance();
            match outcome {
                AdvanceOutcome::Idle => {
                    self.ticker.stop();
                    break;
                }
                AdvanceOutcome::Progressed { .. } => (),
                AdvanceOutcome::HandedOff { from, to } => {
                    debug!("node {from} done, handing off to node {to}");
                    match self.mode {
                        StepMode::Step => {
                            self.ticker.stop();
                        }
                        StepMode::Sweep => {
                            self.chain.request_step();
                        }
                    }
                }
                AdvanceOutcome::Reversed { at, direction } => {
                    info!("reached boundary at node {at}, now moving {direction}");
                    self.ticker.stop();
                }
            }
            poll.outcomes.push(outcome);
        }
        poll
    }
}
