use crate::sequence::{Activation, AdvanceOutcome, Sequencer};
use std::{io, io::Write, time::Instant};

/// Drive the sequencer headlessly with a simulated clock, writing one line per event.
///
/// Every activation is followed by jumping straight to each tick deadline until the sequencer
/// stops again.
pub(crate) fn run_trace<W: Write>(sequencer: &mut Sequencer, activations: u32, mut output: W) -> io::Result<()> {
    let mut now = Instant::now();
    for _ in 0..activations {
        match sequencer.activate(now) {
            Activation::Started { node, direction } => writeln!(output, "start node {node} {direction}")?,
            Activation::Busy => writeln!(output, "busy")?,
        }
        let mut ticks = 0;
        while let Some(deadline) = sequencer.next_deadline() {
            now = deadline;
            for outcome in sequencer.poll(now).outcomes {
                ticks += 1;
                match outcome {
                    AdvanceOutcome::HandedOff { from, to } => writeln!(output, "  node {from} -> node {to}")?,
                    AdvanceOutcome::Reversed { at, direction } => {
                        writeln!(output, "  reverse at node {at}, now {direction}")?
                    }
                    AdvanceOutcome::Idle | AdvanceOutcome::Progressed { .. } => (),
                }
            }
        }
        writeln!(output, "  idle after {ticks} ticks")?;
    }
    output.flush()
}
