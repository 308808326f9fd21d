use {
    super::Grid2D,
    glam::IVec2,
    std::{
        collections::HashMap,
        fmt::{Debug, Formatter, Result as FmtResult},
    },
};

/// A mapping from position to cell value that is conceptually infinite in all directions: any
/// position that was never `set` holds the grid's fill value.
///
/// Only cells differing from the fill value are stored, so `cells` visits genuinely set positions
/// and nothing else. Backs simulations whose occupied area grows unpredictably.
pub struct SparseGrid<T> {
    cells: HashMap<IVec2, T>,
    fill: T,
}

impl<T: Clone + PartialEq> SparseGrid<T> {
    pub fn new(fill: T) -> Self {
        Self {
            cells: HashMap::new(),
            fill,
        }
    }

    /// Bulk-loads a dense grid, storing every cell whose value differs from `fill`.
    pub fn from_grid(fill: T, grid: &Grid2D<T>) -> Self {
        let mut sparse_grid: Self = Self::new(fill);

        for (index, cell) in grid.cells().iter().enumerate() {
            if *cell != sparse_grid.fill {
                sparse_grid
                    .cells
                    .insert(grid.pos_from_index(index), cell.clone());
            }
        }

        sparse_grid
    }

    #[inline]
    pub fn fill(&self) -> &T {
        &self.fill
    }

    pub fn get(&self, pos: IVec2) -> &T {
        self.cells.get(&pos).unwrap_or(&self.fill)
    }

    /// Upserts with no bounds checking. Storing the fill value erases the entry, which is
    /// indistinguishable from having stored it: `get` still returns the fill value.
    pub fn set(&mut self, pos: IVec2, value: T) {
        if value == self.fill {
            self.cells.remove(&pos);
        } else {
            self.cells.insert(pos, value);
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = (IVec2, &T)> {
        self.cells.iter().map(|(pos, cell)| (*pos, cell))
    }

    /// The minimum and maximum stored positions, or `None` when nothing is stored.
    pub fn bounds(&self) -> Option<(IVec2, IVec2)> {
        self.cells.keys().copied().fold(
            None,
            |bounds: Option<(IVec2, IVec2)>, pos: IVec2| match bounds {
                None => Some((pos, pos)),
                Some((min, max)) => Some((min.min(pos), max.max(pos))),
            },
        )
    }

    /// Materializes the window `min..=max` as a dense grid, with unset cells holding the fill
    /// value.
    pub fn to_grid(&self, min: IVec2, max: IVec2) -> Grid2D<T> {
        let mut grid: Grid2D<T> = Grid2D::filled(self.fill.clone(), max - min + IVec2::ONE);

        for (pos, cell) in self.cells() {
            if let Some(dense_cell) = grid.get_mut(pos - min) {
                *dense_cell = cell.clone();
            }
        }

        grid
    }

    /// `to_grid` over the stored bounds.
    pub fn to_bounded_grid(&self) -> Option<Grid2D<T>> {
        self.bounds().map(|(min, max)| self.to_grid(min, max))
    }
}

impl<T: Clone> Clone for SparseGrid<T> {
    fn clone(&self) -> Self {
        Self {
            cells: self.cells.clone(),
            fill: self.fill.clone(),
        }
    }
}

impl<T: Debug> Debug for SparseGrid<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SparseGrid")
            .field("cells", &self.cells)
            .field("fill", &self.fill)
            .finish()
    }
}

impl<T: PartialEq> PartialEq for SparseGrid<T> {
    fn eq(&self, other: &Self) -> bool {
        self.fill == other.fill && self.cells == other.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_returns_fill_when_unset() {
        let mut sparse_grid: SparseGrid<char> = SparseGrid::new('.');

        assert_eq!(*sparse_grid.get(IVec2::new(1_000_000_i32, -1_000_000_i32)), '.');

        sparse_grid.set(IVec2::new(2_i32, 3_i32), '#');

        assert_eq!(*sparse_grid.get(IVec2::new(2_i32, 3_i32)), '#');
        assert_eq!(*sparse_grid.get(IVec2::new(3_i32, 2_i32)), '.');
    }

    #[test]
    fn test_set_fill_is_not_stored() {
        let mut sparse_grid: SparseGrid<char> = SparseGrid::new('.');

        sparse_grid.set(IVec2::ONE, '#');
        sparse_grid.set(IVec2::ONE, '.');

        assert_eq!(*sparse_grid.get(IVec2::ONE), '.');
        assert!(sparse_grid.is_empty());
        assert_eq!(sparse_grid.bounds(), None);
    }

    #[test]
    fn test_clone_does_not_alias() {
        let mut sparse_grid: SparseGrid<char> = SparseGrid::new('.');

        sparse_grid.set(IVec2::ZERO, '#');

        let mut clone: SparseGrid<char> = sparse_grid.clone();

        clone.set(IVec2::ZERO, '@');
        clone.set(IVec2::X, '#');

        assert_eq!(*sparse_grid.get(IVec2::ZERO), '#');
        assert_eq!(*sparse_grid.get(IVec2::X), '.');
        assert_eq!(*clone.get(IVec2::ZERO), '@');
    }

    #[test]
    fn test_bounds_and_to_grid() {
        let mut sparse_grid: SparseGrid<char> = SparseGrid::new('.');

        sparse_grid.set(IVec2::new(-1_i32, 2_i32), 'a');
        sparse_grid.set(IVec2::new(1_i32, 4_i32), 'b');

        assert_eq!(
            sparse_grid.bounds(),
            Some((IVec2::new(-1_i32, 2_i32), IVec2::new(1_i32, 4_i32)))
        );

        let grid: Grid2D<char> = sparse_grid.to_bounded_grid().unwrap();

        assert_eq!(grid.dimensions(), IVec2::new(3_i32, 3_i32));
        assert_eq!(grid.get(IVec2::ZERO), Some(&'a'));
        assert_eq!(grid.get(IVec2::new(2_i32, 2_i32)), Some(&'b'));
        assert_eq!(grid.get(IVec2::ONE), Some(&'.'));
    }
}
