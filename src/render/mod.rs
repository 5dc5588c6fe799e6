mod canvas;
mod color;
mod terminal;

pub(crate) use canvas::Canvas;
pub(crate) use terminal::TerminalRenderer;

use crate::sequence::Chain;
use serde::Deserialize;
use std::io;

/// How bracket strokes are colored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, strum::Display, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum StrokeStyle {
    /// Every node is drawn in white.
    #[default]
    White,

    /// Each node gets its own hue, spread across the chain.
    Rainbow,
}

/// Something the chain can be drawn on.
pub(crate) trait Renderer {
    /// The drawing surface changed size and must be set up again.
    fn resize(&mut self, width: u16, height: u16);

    /// Draw the whole chain.
    fn render(&mut self, chain: &Chain) -> Result<(), RenderError>;
}

/// An error drawing on the terminal.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("terminal io: {0}")]
    Io(#[from] io::Error),
}
