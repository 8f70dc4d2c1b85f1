//! Connecting lines between nearby stars
//!
//! Stars are bucketed into a uniform grid whose cell size equals the link
//! distance, so any linked pair sits in the same or an adjacent cell. Each
//! cell is compared against itself and four forward neighbors, which visits
//! every unordered pair of neighboring cells exactly once.

use glam::Vec2;

use super::state::Star;

/// Forward neighbor offsets (col, row): right, and the three cells below
const FORWARD_NEIGHBORS: [(isize, isize); 4] = [(1, 0), (-1, 1), (0, 1), (1, 1)];

/// A pair of stars close enough to connect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// Star indices, `a < b`
    pub a: usize,
    pub b: usize,
    pub distance: f32,
}

impl Link {
    /// Line alpha: fades linearly to zero at `max_distance`
    pub fn opacity(&self, max_distance: f32, max_opacity: f32) -> f32 {
        (1.0 - self.distance / max_distance) * max_opacity
    }
}

/// Reusable spatial buckets for the link pass
#[derive(Debug, Clone)]
pub struct LinkGrid {
    cell_size: f32,
    cols: usize,
    rows: usize,
    cells: Vec<Vec<usize>>,
}

impl LinkGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cols: 0,
            rows: 0,
            cells: Vec::new(),
        }
    }

    fn cell_of(&self, pos: Vec2) -> (usize, usize) {
        // Stars can drift past the edges; clamp them into the border cells
        let col = (pos.x / self.cell_size).floor().clamp(0.0, (self.cols - 1) as f32) as usize;
        let row = (pos.y / self.cell_size).floor().clamp(0.0, (self.rows - 1) as f32) as usize;
        (col, row)
    }

    fn rebucket(&mut self, stars: &[Star], width: f32, height: f32) {
        self.cols = ((width / self.cell_size).ceil() as usize).max(1);
        self.rows = ((height / self.cell_size).ceil() as usize).max(1);
        let needed = self.cols * self.rows;

        for cell in &mut self.cells {
            cell.clear();
        }
        if self.cells.len() < needed {
            self.cells.resize_with(needed, Vec::new);
        }

        for (i, star) in stars.iter().enumerate() {
            if !star.pos.is_finite() {
                continue;
            }
            let (col, row) = self.cell_of(star.pos);
            self.cells[row * self.cols + col].push(i);
        }
    }

    /// Replace `out` with every star pair closer than the cell size
    pub fn collect(&mut self, stars: &[Star], width: f32, height: f32, out: &mut Vec<Link>) {
        out.clear();
        if stars.len() < 2 || self.cell_size <= 0.0 {
            return;
        }
        self.rebucket(stars, width, height);

        let max = self.cell_size;
        let mut push = |a: usize, b: usize| {
            let distance = stars[a].pos.distance(stars[b].pos);
            if distance < max {
                let (a, b) = if a < b { (a, b) } else { (b, a) };
                out.push(Link { a, b, distance });
            }
        };

        for row in 0..self.rows {
            for col in 0..self.cols {
                let here = &self.cells[row * self.cols + col];

                for (i, &a) in here.iter().enumerate() {
                    for &b in &here[i + 1..] {
                        push(a, b);
                    }
                }

                for (dc, dr) in FORWARD_NEIGHBORS {
                    let (Some(nc), Some(nr)) =
                        (col.checked_add_signed(dc), row.checked_add_signed(dr))
                    else {
                        continue;
                    };
                    if nc >= self.cols || nr >= self.rows {
                        continue;
                    }
                    let there = &self.cells[nr * self.cols + nc];
                    for &a in here {
                        for &b in there {
                            push(a, b);
                        }
                    }
                }
            }
        }
    }
}
