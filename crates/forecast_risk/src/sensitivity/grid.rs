//! Two-parameter sensitivity grid.

use super::sweep::SweepTarget;
use rust_decimal::Decimal;
use serde::Serialize;

/// One cell of a two-parameter grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridCell {
    /// Delta applied to the row driver
    pub row_delta: Decimal,
    /// Delta applied to the column driver
    pub col_delta: Decimal,
    /// Grand total at this cell
    pub grand_total: Decimal,
    /// grand_total - base grand total
    pub delta_from_base: Decimal,
}

/// Grand totals over the cross product of two delta grids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensitivityGrid {
    /// Period label
    pub period: String,
    /// Driver varied along rows
    pub row_target: SweepTarget,
    /// Driver varied along columns
    pub col_target: SweepTarget,
    /// Grand total of the unshifted base
    pub base_grand_total: Decimal,
    /// Cells, row-major
    pub cells: Vec<Vec<GridCell>>,
}

impl SensitivityGrid {
    /// (rows, columns).
    pub fn shape(&self) -> (usize, usize) {
        let cols = self.cells.first().map_or(0, Vec::len);
        (self.cells.len(), cols)
    }

    /// Cell by index.
    pub fn cell(&self, row: usize, col: usize) -> Option<&GridCell> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    /// Row deltas in grid order.
    pub fn row_deltas(&self) -> Vec<Decimal> {
        self.cells
            .iter()
            .filter_map(|r| r.first().map(|c| c.row_delta))
            .collect()
    }

    /// Column deltas in grid order.
    pub fn col_deltas(&self) -> Vec<Decimal> {
        self.cells
            .first()
            .map(|r| r.iter().map(|c| c.col_delta).collect())
            .unwrap_or_default()
    }

    /// Cells flattened row by row.
    pub fn iter(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn cell(row_delta: Decimal, col_delta: Decimal, total: Decimal) -> GridCell {
        GridCell {
            row_delta,
            col_delta,
            grand_total: total,
            delta_from_base: total - dec!(100),
        }
    }

    #[test]
    fn test_accessors() {
        let grid = SensitivityGrid {
            period: "Q3 2025".to_string(),
            row_target: SweepTarget::TakeRate,
            col_target: SweepTarget::Notional,
            base_grand_total: dec!(100),
            cells: vec![
                vec![cell(dec!(-1), dec!(-2), dec!(90)), cell(dec!(-1), dec!(2), dec!(95))],
                vec![cell(dec!(1), dec!(-2), dec!(105)), cell(dec!(1), dec!(2), dec!(110))],
            ],
        };

        assert_eq!(grid.shape(), (2, 2));
        assert_eq!(grid.row_deltas(), vec![dec!(-1), dec!(1)]);
        assert_eq!(grid.col_deltas(), vec![dec!(-2), dec!(2)]);
        assert_eq!(grid.cell(1, 1).unwrap().delta_from_base, dec!(10));
        assert_eq!(grid.iter().count(), 4);
    }

    #[test]
    fn test_empty_grid() {
        let grid = SensitivityGrid {
            period: "Q3 2025".to_string(),
            row_target: SweepTarget::Notional,
            col_target: SweepTarget::TakeRate,
            base_grand_total: Decimal::ZERO,
            cells: Vec::new(),
        };
        assert_eq!(grid.shape(), (0, 0));
        assert!(grid.col_deltas().is_empty());
        assert!(grid.cell(0, 0).is_none());
    }
}
