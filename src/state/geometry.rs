// Square grid fitted to the canvas and centered on it
use crate::model::Cell;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub grid_size: u32,
    pub cell_size: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl GridGeometry {
    /// Square cells, as large as fit, grid centered on both axes.
    pub fn compute(width: f64, height: f64, grid_size: u32) -> Self {
        let n = grid_size.max(1) as f64;
        let cell_size = (width / n).min(height / n).max(0.0);
        Self {
            grid_size,
            cell_size,
            offset_x: (width - cell_size * n) / 2.0,
            offset_y: (height - cell_size * n) / 2.0,
        }
    }

    /// Top-left corner of a cell in canvas pixels.
    pub fn cell_origin(&self, cell: Cell) -> (f64, f64) {
        (
            self.offset_x + cell.col as f64 * self.cell_size,
            self.offset_y + cell.row as f64 * self.cell_size,
        )
    }

    pub fn cell_center(&self, cell: Cell) -> (f64, f64) {
        let (x, y) = self.cell_origin(cell);
        (x + self.cell_size / 2.0, y + self.cell_size / 2.0)
    }

    /// Cell under a canvas point. Points off the grid snap to the nearest edge cell.
    pub fn cell_at(&self, px: f64, py: f64) -> Cell {
        if self.cell_size <= 0.0 || self.grid_size == 0 {
            return Cell::new(0, 0);
        }
        let max = (self.grid_size - 1) as i64;
        let col = (((px - self.offset_x) / self.cell_size).floor() as i64).clamp(0, max);
        let row = (((py - self.offset_y) / self.cell_size).floor() as i64).clamp(0, max);
        Cell::new(row as u32, col as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_size_is_min_of_axes_and_grid_is_centered() {
        for &(w, h) in &[(640.0, 480.0), (480.0, 640.0), (300.0, 300.0), (1920.0, 1080.0)] {
            for n in 1..=12u32 {
                let g = GridGeometry::compute(w, h, n);
                let expect = (w / n as f64).min(h / n as f64);
                assert!((g.cell_size - expect).abs() < 1e-9);
                assert!((g.offset_x - (w - g.cell_size * n as f64) / 2.0).abs() < 1e-9);
                assert!((g.offset_y - (h - g.cell_size * n as f64) / 2.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn landscape_canvas_offsets_only_horizontally() {
        let g = GridGeometry::compute(640.0, 480.0, 5);
        assert_eq!(g.cell_size, 96.0);
        assert_eq!(g.offset_x, 80.0);
        assert_eq!(g.offset_y, 0.0);
        assert_eq!(g.cell_origin(Cell::new(2, 3)), (80.0 + 288.0, 192.0));
    }

    #[test]
    fn zero_canvas_degrades_to_zero_cells() {
        let g = GridGeometry::compute(0.0, 0.0, 5);
        assert_eq!(g.cell_size, 0.0);
        assert_eq!(g.offset_x, 0.0);
        assert_eq!(g.cell_at(123.0, 45.0), Cell::new(0, 0));
    }

    #[test]
    fn points_map_to_cells_and_clamp_at_edges() {
        let g = GridGeometry::compute(640.0, 480.0, 5);
        let (cx, cy) = g.cell_center(Cell::new(2, 3));
        assert_eq!(g.cell_at(cx, cy), Cell::new(2, 3));
        assert_eq!(g.cell_at(0.0, 0.0), Cell::new(0, 0));
        assert_eq!(g.cell_at(639.0, 479.0), Cell::new(4, 4));
        assert_eq!(g.cell_at(-50.0, 1000.0), Cell::new(4, 0));
    }
}
