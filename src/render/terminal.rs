use super::{Canvas, RenderError, Renderer, StrokeStyle};
use crate::{config::RgbColor, sequence::Chain};
use crossterm::{
    QueueableCommand,
    cursor::MoveTo,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::Write;

/// Draws the chain on a terminal using crossterm commands.
pub(crate) struct TerminalRenderer<W: Write> {
    output: W,
    width: u16,
    height: u16,
    background: RgbColor,
    stroke: StrokeStyle,
}

impl<W: Write> TerminalRenderer<W> {
    pub(crate) fn new(output: W, (width, height): (u16, u16), background: RgbColor, stroke: StrokeStyle) -> Self {
        Self { output, width, height, background, stroke }
    }

    fn paint(&mut self, canvas: &Canvas) -> Result<(), RenderError> {
        self.output.queue(SetBackgroundColor(to_terminal_color(self.background)))?;
        self.output.queue(Clear(ClearType::All))?;
        for y in 0..canvas.height() {
            let row = canvas.row(y);
            let Some(first) = row.iter().position(|cell| cell.symbol() != ' ') else {
                continue;
            };
            self.output.queue(MoveTo(first as u16, y))?;
            let mut current_color = None;
            let mut segment = String::new();
            for cell in &row[first..] {
                let color = cell.color().or(current_color);
                if color != current_color {
                    if !segment.is_empty() {
                        self.output.queue(Print(&segment))?;
                        segment.clear();
                    }
                    if let Some(color) = color {
                        self.output.queue(SetForegroundColor(to_terminal_color(color)))?;
                    }
                    current_color = color;
                }
                segment.push(cell.symbol());
            }
            self.output.queue(Print(segment.trim_end()))?;
        }
        self.output.queue(ResetColor)?;
        self.output.flush()?;
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    fn render(&mut self, chain: &Chain) -> Result<(), RenderError> {
        let canvas = Canvas::from_chain(self.width, self.height, chain, self.stroke);
        self.paint(&canvas)
    }
}

fn to_terminal_color(color: RgbColor) -> Color {
    Color::Rgb { r: color.r, g: color.g, b: color.b }
}
