use super::Direction;

/// How fast a [ScaleState] moves and when a step counts as done.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Pace {
    /// Amount added to the scale on every tick.
    pub(crate) increment: f64,
    /// Distance from the anchor past which a step completes.
    pub(crate) completion_threshold: f64,
}

impl Default for Pace {
    fn default() -> Self {
        Self { increment: 0.05, completion_threshold: 1.0 }
    }
}

/// The result of trying to begin a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StartOutcome {
    /// A step began moving in the given direction.
    Started(Direction),
    /// A step was already in progress, nothing changed.
    AlreadyRunning,
}

/// The result of a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum UpdateOutcome {
    /// No step in progress.
    Idle,
    /// The scale moved but the step isn't done yet.
    Pending,
    /// The step finished while moving in the given direction.
    Completed(Direction),
}

/// Progress of a single node's grow/shrink step.
#[derive(Clone, Debug)]
pub(crate) struct ScaleState {
    scale: f64,
    anchor: f64,
    direction: Option<Direction>,
    pace: Pace,
}

impl ScaleState {
    pub(crate) fn new(pace: Pace) -> Self {
        Self { scale: 0.0, anchor: 0.0, direction: None, pace }
    }

    pub(crate) fn scale(&self) -> f64 {
        self.scale
    }

    pub(crate) fn anchor(&self) -> f64 {
        self.anchor
    }

    pub(crate) fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub(crate) fn is_active(&self) -> bool {
        self.direction.is_some()
    }

    /// Begin a step towards the opposite end of the unit range.
    ///
    /// A settled anchor of 0 grows, an anchor of 1 shrinks.
    pub(crate) fn start_updating(&mut self) -> StartOutcome {
        if self.direction.is_some() {
            return StartOutcome::AlreadyRunning;
        }
        let direction = Direction::from_sign(1.0 - 2.0 * self.anchor);
        self.direction = Some(direction);
        StartOutcome::Started(direction)
    }

    /// Advance the scale by one increment.
    pub(crate) fn update(&mut self) -> UpdateOutcome {
        let Some(direction) = self.direction else {
            return UpdateOutcome::Idle;
        };
        self.scale += self.pace.increment * direction.sign();
        if (self.scale - self.anchor).abs() > self.pace.completion_threshold {
            self.scale = self.anchor + direction.sign();
            self.direction = None;
            self.anchor = self.scale;
            return UpdateOutcome::Completed(direction);
        }
        UpdateOutcome::Pending
    }
}
