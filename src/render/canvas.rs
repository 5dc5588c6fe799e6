use super::{StrokeStyle, color::rainbow_color};
use crate::{
    config::RgbColor,
    sequence::{BracketMark, Chain},
};

const UP: u8 = 1;
const DOWN: u8 = 2;
const LEFT: u8 = 4;
const RIGHT: u8 = 8;

/// A single character cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Cell {
    /// The line segments leaving this cell, a combination of `UP`, `DOWN`, `LEFT` and `RIGHT`.
    edges: u8,
    inked: bool,
    color: Option<RgbColor>,
}

impl Cell {
    pub(crate) fn symbol(&self) -> char {
        if !self.inked {
            return ' ';
        }
        match self.edges {
            e if e == RIGHT | DOWN => '┌',
            e if e == LEFT | DOWN => '┐',
            e if e == RIGHT | UP => '└',
            e if e == LEFT | UP => '┘',
            e if e == LEFT | RIGHT | DOWN => '┬',
            e if e == LEFT | RIGHT | UP => '┴',
            e if e == UP | DOWN | RIGHT => '├',
            e if e == UP | DOWN | LEFT => '┤',
            e if e == UP | DOWN | LEFT | RIGHT => '┼',
            e if e & (UP | DOWN) != 0 => '│',
            _ => '─',
        }
    }

    pub(crate) fn color(&self) -> Option<RgbColor> {
        self.color
    }
}

/// Where a node's bracket box sits, in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct BracketBox {
    left: i32,
    top: i32,
    width: i32,
    height: i32,
}

impl BracketBox {
    fn right(&self) -> i32 {
        self.left + self.width - 1
    }

    fn bottom(&self) -> i32 {
        self.top + self.height - 1
    }
}

/// A grid of cells holding one frame of the chain.
#[derive(Clone, Debug)]
pub(crate) struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub(crate) fn new(width: u16, height: u16) -> Self {
        Self { width, height, cells: vec![Cell::default(); width as usize * height as usize] }
    }

    /// Lay out every node in the chain across a canvas of the given size.
    ///
    /// Nodes are spread evenly along the middle row, each one drawing its marks inside a box two
    /// thirds as wide as the gap between nodes.
    pub(crate) fn from_chain(width: u16, height: u16, chain: &Chain, stroke: StrokeStyle) -> Self {
        let mut canvas = Self::new(width, height);
        let count = chain.len();
        let gap = width as f64 / (count + 1) as f64;
        let box_width = ((2.0 * gap / 3.0).round() as i32).max(2);
        // Cells are roughly twice as tall as they are wide.
        let box_height = (box_width / 2).max(2);
        let center_y = height as i32 / 2;
        for node in chain.nodes() {
            let center_x = ((node.index() + 1) as f64 * gap).round() as i32;
            let bounds = BracketBox {
                left: center_x - box_width / 2,
                top: center_y - box_height / 2,
                width: box_width,
                height: box_height,
            };
            let color = match stroke {
                StrokeStyle::White => RgbColor::WHITE,
                StrokeStyle::Rainbow => rainbow_color(node.index(), count),
            };
            for mark in node.marks() {
                canvas.draw_mark(&bounds, mark, color);
            }
        }
        canvas
    }

    pub(crate) fn width(&self) -> u16 {
        self.width
    }

    pub(crate) fn height(&self) -> u16 {
        self.height
    }

    pub(crate) fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y as usize * self.width as usize + x as usize)
    }

    pub(crate) fn row(&self, y: u16) -> &[Cell] {
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    fn draw_mark(&mut self, bounds: &BracketBox, mark: BracketMark, color: RgbColor) {
        if mark.progress <= 0.0 {
            return;
        }
        let horizontal = arm_length(bounds.width, mark.progress);
        let vertical = arm_length(bounds.height, mark.progress);
        // The mirrored mark grows left and up from the bottom right corner.
        let (x, y, step, outward_x, outward_y, inward_x, inward_y) = if mark.mirrored {
            (bounds.right(), bounds.bottom(), -1, LEFT, UP, RIGHT, DOWN)
        } else {
            (bounds.left, bounds.top, 1, RIGHT, DOWN, LEFT, UP)
        };
        self.ink(x, y, outward_x | outward_y, color);
        for offset in 1..horizontal {
            let edges = if offset < horizontal - 1 { inward_x | outward_x } else { inward_x };
            self.ink(x + offset * step, y, edges, color);
        }
        for offset in 1..vertical {
            let edges = if offset < vertical - 1 { inward_y | outward_y } else { inward_y };
            self.ink(x, y + offset * step, edges, color);
        }
    }

    fn ink(&mut self, x: i32, y: i32, edges: u8, color: RgbColor) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let cell = &mut self.cells[y as usize * self.width as usize + x as usize];
        cell.edges |= edges;
        cell.inked = true;
        cell.color = Some(color);
    }
}

fn arm_length(extent: i32, progress: f64) -> i32 {
    ((extent as f64 * progress).round() as i32).clamp(1, extent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SequenceConfig;

    fn chain_with_first_scale(ticks: usize) -> Chain {
        let config = SequenceConfig { nodes: 5, increment: 0.25, ..Default::default() };
        let mut chain = Chain::new(&config).expect("invalid chain");
        chain.request_step();
        for _ in 0..ticks {
            chain.advance();
        }
        chain
    }

    fn row_text(canvas: &Canvas, y: u16) -> String {
        canvas.row(y).iter().map(Cell::symbol).collect()
    }

    #[test]
    fn fresh_chain_is_blank() {
        let chain = chain_with_first_scale(0);
        let canvas = Canvas::from_chain(60, 20, &chain, StrokeStyle::White);
        assert_eq!(canvas.width(), 60);
        assert_eq!(canvas.height(), 20);
        for y in 0..canvas.height() {
            assert!(row_text(&canvas, y).trim().is_empty());
        }
    }

    #[test]
    fn half_scale_draws_first_bracket() {
        let chain = chain_with_first_scale(2);
        let canvas = Canvas::from_chain(60, 20, &chain, StrokeStyle::White);
        assert_eq!(row_text(&canvas, 9).trim_end(), "       ┌──────");
        assert_eq!(row_text(&canvas, 10).trim_end(), "       │");
        assert_eq!(row_text(&canvas, 11).trim_end(), "       │");
        assert_eq!(canvas.cell(7, 9).and_then(Cell::color), Some(RgbColor::WHITE));
    }

    #[test]
    fn full_scale_closes_rectangle() {
        let chain = chain_with_first_scale(5);
        let canvas = Canvas::from_chain(60, 20, &chain, StrokeStyle::White);
        assert_eq!(row_text(&canvas, 9).trim_end(), "       ┌─────┐");
        assert_eq!(row_text(&canvas, 10).trim_end(), "       │     │");
        assert_eq!(row_text(&canvas, 11).trim_end(), "       └─────┘");
    }

    #[test]
    fn rainbow_strokes_per_node() {
        let chain = chain_with_first_scale(5);
        let canvas = Canvas::from_chain(60, 20, &chain, StrokeStyle::Rainbow);
        assert_eq!(canvas.cell(7, 9).and_then(Cell::color), Some(rainbow_color(0, 5)));
    }

    #[test]
    fn tiny_canvas_clips() {
        let chain = chain_with_first_scale(5);
        let canvas = Canvas::from_chain(3, 1, &chain, StrokeStyle::White);
        assert!(canvas.cell(3, 0).is_none());
        assert!(canvas.cell(0, 1).is_none());
    }
}
