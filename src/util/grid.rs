use {
    glam::IVec2,
    std::{
        fmt::{Debug, DebugList, Formatter, Result as FmtResult, Write},
        iter::Peekable,
        mem::transmute,
        ops::{Range, RangeInclusive},
        str::{from_utf8, Lines},
    },
    strum::IntoEnumIterator,
};

mod direction {
    use {
        super::*,
        static_assertions::const_assert,
        strum::{EnumCount, EnumIter},
    };

    macro_rules! define_direction {
        {
            $( #[$meta:meta] )*
            $vis:vis enum $direction:ident {
                $(
                    $( #[$variant_meta:meta] )?
                    $variant:ident,
                )*
            }
        } => {
            $(#[$meta])*
            $vis enum $direction {
                $(
                    $( #[$variant_meta] )?
                    $variant,
                )*
            }

            const VECS: [IVec2; $direction::COUNT] = [
                $( $direction::$variant.vec_internal(), )*
            ];
        };
    }

    define_direction! {
        #[derive(Copy, Clone, Debug, Default, EnumCount, EnumIter, Eq, Hash, PartialEq)]
        #[repr(u8)]
        pub enum Direction {
            #[default]
            North,
            East,
            South,
            West,
        }
    }

    // This guarantees we can safely convert from `u8` to `Direction` by masking the smallest 2
    // bits, which is the same as masking by `MASK`
    const_assert!(Direction::COUNT == 4_usize);

    impl Direction {
        pub const COUNT_U8: u8 = Self::COUNT as u8;
        pub const MASK: u8 = Self::COUNT_U8 - 1_u8;
        pub const HALF_COUNT: u8 = Self::COUNT_U8 / 2_u8;

        #[inline]
        pub const fn vec(self) -> IVec2 {
            VECS[self as usize]
        }

        #[inline]
        pub const fn from_u8(value: u8) -> Self {
            // SAFETY: See `const_assert` above
            unsafe { transmute(value & Self::MASK) }
        }

        #[inline]
        pub const fn next(self) -> Self {
            Self::from_u8(self as u8 + 1_u8)
        }

        #[inline]
        pub const fn rev(self) -> Self {
            Self::from_u8(self as u8 + Self::HALF_COUNT)
        }

        const fn vec_internal(self) -> IVec2 {
            match self {
                Self::North => IVec2::NEG_Y,
                Self::East => IVec2::X,
                Self::South => IVec2::Y,
                Self::West => IVec2::NEG_X,
            }
        }
    }

    impl From<Direction> for IVec2 {
        fn from(value: Direction) -> Self {
            value.vec()
        }
    }

    impl From<u8> for Direction {
        fn from(value: u8) -> Self {
            Self::from_u8(value)
        }
    }

    impl TryFrom<IVec2> for Direction {
        type Error = ();

        fn try_from(value: IVec2) -> Result<Self, Self::Error> {
            VECS.iter()
                .position(|vec| *vec == value)
                .map(|index| (index as u8).into())
                .ok_or(())
        }
    }

    impl TryFrom<Range<IVec2>> for Direction {
        type Error = CellIterFromRangeError;

        fn try_from(Range { start, end }: Range<IVec2>) -> Result<Self, Self::Error> {
            use CellIterFromRangeError::*;

            let delta: IVec2 = end - start;

            if delta == IVec2::ZERO {
                Err(PositionsIdentical)
            } else if delta.x != 0_i32 && delta.y != 0_i32 {
                Err(PositionsNotAligned)
            } else {
                let abs: IVec2 = delta.abs();

                Ok((delta / (abs.x + abs.y)).try_into().unwrap())
            }
        }
    }

    impl TryFrom<RangeInclusive<IVec2>> for Direction {
        type Error = CellIterFromRangeError;

        fn try_from(range_inclusive: RangeInclusive<IVec2>) -> Result<Self, Self::Error> {
            let curr: IVec2 = *range_inclusive.start();
            let end: IVec2 = *range_inclusive.end();

            (curr..end + (end - curr).signum()).try_into()
        }
    }
}

pub use direction::Direction;

/// The eight positions surrounding `pos`, orthogonal neighbors first.
pub fn iter_adjacent(pos: IVec2) -> impl Iterator<Item = IVec2> {
    Direction::iter()
        .map(Direction::vec)
        .chain(Direction::iter().map(|dir: Direction| dir.vec() + dir.next().vec()))
        .map(move |delta: IVec2| pos + delta)
}

pub struct SideLen(pub usize);

impl From<SideLen> for IVec2 {
    fn from(side_len: SideLen) -> Self {
        IVec2::new(side_len.0 as i32, side_len.0 as i32)
    }
}

pub fn grid_2d_contains(pos: IVec2, dimensions: IVec2) -> bool {
    (pos.cmpge(IVec2::ZERO) & pos.cmplt(dimensions)).all()
}

pub fn grid_2d_pos_from_index_and_dimensions(index: usize, dimensions: IVec2) -> IVec2 {
    let x: usize = dimensions.x as usize;

    IVec2::new((index % x) as i32, (index / x) as i32)
}

pub fn grid_2d_try_index_from_pos_and_dimensions(pos: IVec2, dimensions: IVec2) -> Option<usize> {
    grid_2d_contains(pos, dimensions)
        .then(|| pos.y as usize * dimensions.x as usize + pos.x as usize)
}

/// A dense, row-major rectangular grid: the materialized counterpart of `SparseGrid`
pub struct Grid2D<T> {
    cells: Vec<T>,

    /// Should only contain unsigned values, but is signed for ease of use for iterating
    dimensions: IVec2,
}

impl<T> Grid2D<T> {
    #[cfg(test)]
    pub fn empty(dimensions: IVec2) -> Self {
        Self {
            cells: Vec::new(),
            dimensions,
        }
    }

    pub fn allocate(dimensions: IVec2) -> Self {
        Self {
            cells: Vec::with_capacity((dimensions.x * dimensions.y) as usize),
            dimensions,
        }
    }

    #[inline]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    #[inline]
    pub fn dimensions(&self) -> IVec2 {
        self.dimensions
    }

    #[inline]
    pub fn contains(&self, pos: IVec2) -> bool {
        grid_2d_contains(pos, self.dimensions)
    }

    #[inline]
    pub fn index_from_pos(&self, pos: IVec2) -> usize {
        pos.y as usize * self.dimensions.x as usize + pos.x as usize
    }

    pub fn try_index_from_pos(&self, pos: IVec2) -> Option<usize> {
        grid_2d_try_index_from_pos_and_dimensions(pos, self.dimensions)
    }

    pub fn pos_from_index(&self, index: usize) -> IVec2 {
        grid_2d_pos_from_index_and_dimensions(index, self.dimensions)
    }

    #[inline(always)]
    pub fn max_dimensions(&self) -> IVec2 {
        self.dimensions - IVec2::ONE
    }

    pub fn get(&self, pos: IVec2) -> Option<&T> {
        self.try_index_from_pos(pos)
            .map(|index: usize| &self.cells[index])
    }

    pub fn get_mut(&mut self, pos: IVec2) -> Option<&mut T> {
        self.try_index_from_pos(pos)
            .map(|index: usize| &mut self.cells[index])
    }

    pub fn iter_filtered_positions<'a, P: Fn(&T) -> bool + 'a>(
        &'a self,
        predicate: P,
    ) -> impl Iterator<Item = IVec2> + 'a {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(index, cell)| predicate(cell).then(|| self.pos_from_index(index)))
    }

    pub fn iter_positions_with_cell<'a>(&'a self, target: &'a T) -> impl Iterator<Item = IVec2> + 'a
    where
        T: PartialEq,
    {
        self.iter_filtered_positions(|cell| *cell == *target)
    }
}

impl<T: Clone> Grid2D<T> {
    pub fn filled(value: T, dimensions: IVec2) -> Self {
        let capacity: usize = (dimensions.x * dimensions.y) as usize;
        let mut cells: Vec<T> = Vec::with_capacity(capacity);

        cells.resize(capacity, value);

        Self { cells, dimensions }
    }
}

impl<T: Clone> Clone for Grid2D<T> {
    fn clone(&self) -> Self {
        Self {
            cells: self.cells.clone(),
            dimensions: self.dimensions,
        }
    }
}

impl<T: Debug> Debug for Grid2D<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("Grid2D")?;
        let mut y_list: DebugList = f.debug_list();

        for y in 0_i32..self.dimensions.y {
            let start: usize = (y * self.dimensions.x) as usize;

            y_list.entry(&&self.cells[start..(start + self.dimensions.x as usize)]);
        }

        y_list.finish()
    }
}

impl<T: Default> Grid2D<T> {
    pub fn default(dimensions: IVec2) -> Self {
        let capacity: usize = (dimensions.x * dimensions.y) as usize;
        let mut cells: Vec<T> = Vec::with_capacity(capacity);

        cells.resize_with(capacity, T::default);

        Self { cells, dimensions }
    }
}

impl<T: PartialEq> PartialEq for Grid2D<T> {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions == other.dimensions && self.cells == other.cells
    }
}

#[allow(dead_code)]
#[derive(Debug, PartialEq)]
pub enum GridParseError<'s, E> {
    NoInitialToken,
    IsNotAscii(&'s str),
    InvalidLength { line: &'s str, expected_len: usize },
    CellParseError(E),
}

impl<'s, E, T: TryFrom<char, Error = E>> TryFrom<&'s str> for Grid2D<T> {
    type Error = GridParseError<'s, E>;

    fn try_from(grid_str: &'s str) -> Result<Self, Self::Error> {
        use GridParseError as Error;

        let mut grid_line_iter: Peekable<Lines> = grid_str.lines().peekable();

        let side_len: usize = grid_line_iter.peek().ok_or(Error::NoInitialToken)?.len();

        let mut grid: Grid2D<T> = Grid2D::allocate(SideLen(side_len).into());
        let mut lines: usize = 0_usize;

        for grid_line_str in grid_line_iter {
            if !grid_line_str.is_ascii() {
                return Err(Error::IsNotAscii(grid_line_str));
            }

            if grid_line_str.len() != side_len {
                return Err(Error::InvalidLength {
                    line: grid_line_str,
                    expected_len: side_len,
                });
            }

            for cell_char in grid_line_str.chars() {
                grid.cells
                    .push(cell_char.try_into().map_err(Error::CellParseError)?);
            }

            lines += 1_usize;
        }

        if lines != side_len {
            grid.dimensions.y = lines as i32;
        }

        Ok(grid)
    }
}

#[derive(Debug)]
pub enum CellIterFromRangeError {
    PositionsIdentical,
    PositionsNotAligned,
}

pub struct CellIter2D {
    curr: IVec2,
    end: IVec2,
    dir: Direction,
}

impl CellIter2D {
    pub fn corner_for_dimensions(dimensions: IVec2, dir: Direction) -> Self {
        let dir_vec: IVec2 = dir.vec();
        let curr: IVec2 =
            (-dimensions * (dir_vec + dir_vec.perp())).clamp(IVec2::ZERO, dimensions - IVec2::ONE);

        Self::until_boundary_for_dimensions(dimensions, curr, dir)
    }

    pub fn corner<T>(grid: &Grid2D<T>, dir: Direction) -> Self {
        Self::corner_for_dimensions(grid.dimensions(), dir)
    }

    pub fn until_boundary_for_dimensions(dimensions: IVec2, curr: IVec2, dir: Direction) -> Self {
        let dir_vec: IVec2 = dir.vec();
        let end: IVec2 =
            (curr + dir_vec * dimensions).clamp(IVec2::ZERO, dimensions - IVec2::ONE) + dir_vec;

        Self { curr, end, dir }
    }

    pub fn until_boundary<T>(grid: &Grid2D<T>, curr: IVec2, dir: Direction) -> Self {
        Self::until_boundary_for_dimensions(grid.dimensions(), curr, dir)
    }
}

impl Iterator for CellIter2D {
    type Item = IVec2;

    fn next(&mut self) -> Option<Self::Item> {
        if self.curr != self.end {
            let prev: IVec2 = self.curr;

            self.curr += self.dir.vec();

            Some(prev)
        } else {
            None
        }
    }
}

impl TryFrom<Range<IVec2>> for CellIter2D {
    type Error = CellIterFromRangeError;

    fn try_from(range: Range<IVec2>) -> Result<Self, Self::Error> {
        let curr: IVec2 = range.start;
        let end: IVec2 = range.end;

        Direction::try_from(range).map(|dir| Self { curr, end, dir })
    }
}

impl TryFrom<RangeInclusive<IVec2>> for CellIter2D {
    type Error = CellIterFromRangeError;

    fn try_from(range_inclusive: RangeInclusive<IVec2>) -> Result<Self, Self::Error> {
        let curr: IVec2 = *range_inclusive.start();
        let end: IVec2 = *range_inclusive.end();

        Direction::try_from(range_inclusive).map(|dir| Self {
            curr,
            end: end + dir.vec(),
            dir,
        })
    }
}

/// A marker trait to indicate that a type is a single byte, and any possible value is a valid
/// ASCII byte.
///
/// # Safety
///
/// Only implement this on a type that meets the following criteria:
///
/// * `std::mem::size_of::<Self>() == 1_usize`
/// * `std::str::from_utf8(std::mem::transmute::<[Self], [u8]>(value)).is_ok()` for any `value:
///   [Self]`.
pub unsafe trait IsValidAscii {}

impl<T: IsValidAscii> From<Grid2D<T>> for String {
    fn from(value: Grid2D<T>) -> Self {
        let dimensions: IVec2 = value.dimensions;
        let width: usize = dimensions.x as usize;
        let height: usize = dimensions.y as usize;

        // SAFETY: Guaranteed by `T` implementing `IsValidAscii`
        let bytes: &[u8] = unsafe { transmute(value.cells()) };

        let mut string: String = String::with_capacity((width + 1_usize) * height);

        for y in 0_usize..height {
            let start: usize = y * width;
            let end: usize = start + width;
            let row_str: &str = from_utf8(&bytes[start..end]).unwrap_or_else(|e| {
                panic!("A `Grid2D` row contained an invalid UTF-8 slice: {e:?}");
            });

            writeln!(&mut string, "{row_str}").unwrap_or_else(|e| {
                panic!("`String::write_fmt` returned an `Err` writing to a `String`: {e:?}");
            });
        }

        string
    }
}

pub trait GridVisitor: Default + Sized {
    type Old;
    type New: Default;

    fn visit_cell(
        &mut self,
        new: &mut Self::New,
        old: &Self::Old,
        old_grid: &Grid2D<Self::Old>,
        rev_dir: Direction,
        pos: IVec2,
    );

    fn visit_grid(old_grid: &Grid2D<Self::Old>) -> Grid2D<Self::New> {
        let mut new_grid: Grid2D<Self::New> = Grid2D::default(old_grid.dimensions());

        for dir in Direction::iter() {
            let row_dir: Direction = dir.next();

            // Look back the way we came to make the most use of the local `GridVisitor`
            let rev_dir: Direction = row_dir.rev();

            for row_pos in CellIter2D::corner(old_grid, dir) {
                let mut grid_visitor: Self = Self::default();

                for pos in CellIter2D::until_boundary(old_grid, row_pos, row_dir) {
                    grid_visitor.visit_cell(
                        new_grid.get_mut(pos).unwrap(),
                        old_grid.get(pos).unwrap(),
                        old_grid,
                        rev_dir,
                        pos,
                    );
                }
            }
        }

        new_grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner() {
        let grid: Grid2D<()> = Grid2D::empty(SideLen(5_usize).into());

        assert_eq!(
            Direction::iter()
                .flat_map(|dir: Direction| -> CellIter2D { CellIter2D::corner(&grid, dir) })
                .map(|pos: IVec2| -> usize { grid.index_from_pos(pos) })
                .collect::<Vec<usize>>(),
            vec![
                20, 15, 10, 5, 0, // North
                0, 1, 2, 3, 4, // East
                4, 9, 14, 19, 24, // South
                24, 23, 22, 21, 20 // West
            ]
        );
    }

    #[test]
    fn test_iter_adjacent() {
        assert_eq!(
            iter_adjacent(IVec2::ZERO).collect::<Vec<IVec2>>(),
            vec![
                IVec2::NEG_Y,
                IVec2::X,
                IVec2::Y,
                IVec2::NEG_X,
                IVec2::new(1_i32, -1_i32),
                IVec2::ONE,
                IVec2::new(-1_i32, 1_i32),
                IVec2::NEG_ONE,
            ]
        );
    }
}
