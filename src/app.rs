use crate::{
    render::{RenderError, Renderer},
    sequence::{Activation, Sequencer},
};
use crossterm::{
    cursor::{Hide, Show},
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        MouseEventKind,
    },
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, warn};
use std::{
    io::{self, Write},
    time::{Duration, Instant},
};

/// How long to wait for input when nothing is animating.
const IDLE_TIMEOUT: Duration = Duration::from_millis(250);

/// Something the user asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Activate,
    Resize(u16, u16),
    Quit,
}

/// Whether the app should keep running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Exit,
}

/// Translate a terminal event into a command.
pub(crate) fn command_for(event: &Event) -> Option<Command> {
    match event {
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(_) => Some(Command::Activate),
            _ => None,
        },
        Event::Key(KeyEvent { code, modifiers, kind, .. }) => {
            if *kind != KeyEventKind::Press {
                return None;
            }
            match code {
                KeyCode::Char(' ') | KeyCode::Enter => Some(Command::Activate),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
                KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
                _ => None,
            }
        }
        Event::Resize(width, height) => Some(Command::Resize(*width, *height)),
        _ => None,
    }
}

/// The host loop: feeds user commands and timer deadlines into the sequencer and redraws.
pub(crate) struct App<R: Renderer> {
    sequencer: Sequencer,
    renderer: R,
}

impl<R: Renderer> App<R> {
    pub(crate) fn new(sequencer: Sequencer, renderer: R) -> Self {
        Self { sequencer, renderer }
    }

    /// Run until the user quits.
    pub(crate) fn run(&mut self) -> Result<(), RenderError> {
        self.renderer.render(self.sequencer.chain())?;
        loop {
            let timeout = match self.sequencer.next_deadline() {
                Some(deadline) => deadline.saturating_duration_since(Instant::now()),
                None => IDLE_TIMEOUT,
            };
            if event::poll(timeout)? {
                let event = event::read()?;
                if let Some(command) = command_for(&event) {
                    if self.handle(command, Instant::now())? == Flow::Exit {
                        return Ok(());
                    }
                }
            }
            self.tick(Instant::now())?;
        }
    }

    pub(crate) fn handle(&mut self, command: Command, now: Instant) -> Result<Flow, RenderError> {
        match command {
            Command::Activate => {
                if let Activation::Busy = self.sequencer.activate(now) {
                    debug!("activation ignored while stepping");
                }
            }
            Command::Resize(width, height) => {
                debug!("resized to {width}x{height}");
                self.renderer.resize(width, height);
                self.renderer.render(self.sequencer.chain())?;
            }
            Command::Quit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    /// Deliver every tick due at `now`, redrawing if anything changed.
    pub(crate) fn tick(&mut self, now: Instant) -> Result<(), RenderError> {
        if self.sequencer.poll(now).needs_redraw() {
            self.renderer.render(self.sequencer.chain())?;
        }
        Ok(())
    }
}

/// Puts the terminal in the mode the app needs and restores it when dropped.
pub(crate) struct TerminalGuard<W: Write> {
    output: W,
}

impl<W: Write> TerminalGuard<W> {
    pub(crate) fn enter(mut output: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(output, EnterAlternateScreen, EnableMouseCapture, Hide)?;
        Ok(Self { output })
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = execute!(self.output, Show, DisableMouseCapture, LeaveAlternateScreen) {
            warn!("failed to restore screen: {e}");
        }
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("failed to disable raw mode: {e}");
        }
    }
}
