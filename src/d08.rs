use {crate::*, glam::IVec2, strum::IntoEnumIterator};

#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq))]
struct Height(u8);

#[allow(dead_code)]
#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub struct CharIsNotAsciiDigit(char);

impl TryFrom<char> for Height {
    type Error = CharIsNotAsciiDigit;

    fn try_from(height_char: char) -> Result<Self, Self::Error> {
        if height_char.is_ascii_digit() {
            Ok(Height(height_char as u8 - ZERO_OFFSET))
        } else {
            Err(CharIsNotAsciiDigit(height_char))
        }
    }
}

/// One bit per direction a tree can be seen from outside the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Visibility(u8);

impl Visibility {
    fn get(self, dir: Direction) -> bool {
        self.0 & (1_u8 << dir as u32) != 0_u8
    }

    fn set(&mut self, dir: Direction) {
        self.0 |= 1_u8 << dir as u32;
    }

    fn is_visible(self) -> bool {
        self.0 != 0_u8
    }

    fn is_visible_from_all_directions(self) -> bool {
        self.0 == (1_u8 << Direction::COUNT_U8 as u32) - 1_u8
    }
}

/// Tracks the running maximum height along the traversal row. A tree taller than everything
/// between it and the edge the row started from is visible from that edge.
#[derive(Default)]
struct ComputeVisibility {
    max_row_height: Option<u8>,
}

impl GridVisitor for ComputeVisibility {
    type Old = Height;
    type New = Visibility;

    fn visit_cell(
        &mut self,
        new: &mut Self::New,
        old: &Self::Old,
        _old_grid: &Grid2D<Self::Old>,
        rev_dir: Direction,
        _pos: IVec2,
    ) {
        if self
            .max_row_height
            .map_or(true, |max_row_height| old.0 > max_row_height)
        {
            new.set(rev_dir);
        }

        self.max_row_height = Some(self.max_row_height.map_or(old.0, |m| m.max(old.0)));
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution(Grid2D<Height>);

impl Solution {
    fn visible_tree_count(&self) -> usize {
        ComputeVisibility::visit_grid(&self.0)
            .cells()
            .iter()
            .filter(|visibility| visibility.is_visible())
            .count()
    }

    /// How far the view reaches from `pos` towards `dir` before a tree as tall as this one (or
    /// the edge) blocks it.
    fn viewing_distance(&self, pos: IVec2, dir: Direction) -> u32 {
        let height: u8 = self.0.get(pos).unwrap().0;
        let mut distance: u32 = 0_u32;

        for neighbor_pos in CellIter2D::until_boundary(&self.0, pos, dir).skip(1_usize) {
            distance += 1_u32;

            if self.0.get(neighbor_pos).unwrap().0 >= height {
                break;
            }
        }

        distance
    }

    fn scenic_score(&self, pos: IVec2) -> u32 {
        Direction::iter()
            .map(|dir| self.viewing_distance(pos, dir))
            .product()
    }

    fn scenic_score_max(&self) -> u32 {
        (0_usize..self.0.cells().len())
            .map(|index| self.scenic_score(self.0.pos_from_index(index)))
            .max()
            .unwrap_or_default()
    }
}

impl RunParts for Solution {
    fn p1_internal(&mut self, _args: &PartArgs) {
        dbg!(self.visible_tree_count());
    }

    fn p2_internal(&mut self, _args: &PartArgs) {
        dbg!(self.scenic_score_max());
    }
}

impl<'i> TryFrom<&'i str> for Solution {
    type Error = GridParseError<'i, CharIsNotAsciiDigit>;

    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        Ok(Self(Grid2D::<Height>::try_from(input)?))
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::sync::OnceLock};

    const HEIGHT_GRID_STR: &str = concat!(
        "30373\n",
        "25512\n",
        "65332\n",
        "33549\n",
        "35390",
    );

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| Solution::try_from(HEIGHT_GRID_STR).unwrap())
    }

    #[test]
    fn test_visible_tree_count() {
        assert_eq!(solution().visible_tree_count(), 21_usize);
    }

    #[test]
    fn test_scenic_score() {
        assert_eq!(solution().scenic_score(IVec2::new(2_i32, 1_i32)), 4_u32);
        assert_eq!(solution().scenic_score(IVec2::new(2_i32, 3_i32)), 8_u32);
    }

    #[test]
    fn test_scenic_score_max() {
        assert_eq!(solution().scenic_score_max(), 8_u32);
    }

    #[test]
    fn test_peak_is_visible_from_all_directions() {
        let solution: Solution = Solution::try_from(concat!("121\n", "393\n", "121")).unwrap();
        let visibility: Grid2D<Visibility> = ComputeVisibility::visit_grid(&solution.0);
        let center: Visibility = *visibility.get(IVec2::ONE).unwrap();

        assert!(center.is_visible_from_all_directions());

        for dir in Direction::iter() {
            assert!(center.get(dir));
        }

        // An edge-adjacent non-peak is blocked from across the grid.
        let north_edge: Visibility = *visibility.get(IVec2::new(1_i32, 0_i32)).unwrap();

        assert!(north_edge.is_visible());
        assert!(!north_edge.is_visible_from_all_directions());
    }
}
