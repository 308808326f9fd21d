use {
    crate::*,
    glam::{IVec2, IVec3},
    num::integer::lcm,
    std::{collections::HashSet, rc::Rc},
    strum::IntoEnumIterator,
};

define_cell! {
    #[repr(u8)]
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    enum BasinCell {
        #[default]
        Ground = GROUND = b'.',
        Wall = WALL = b'#',
        NorthBlizzard = NORTH_BLIZZARD = b'^',
        EastBlizzard = EAST_BLIZZARD = b'>',
        SouthBlizzard = SOUTH_BLIZZARD = b'v',
        WestBlizzard = WEST_BLIZZARD = b'<',
    }
}

impl BasinCell {
    fn try_blizzard_direction(self) -> Option<Direction> {
        match self {
            Self::NorthBlizzard => Some(Direction::North),
            Self::EastBlizzard => Some(Direction::East),
            Self::SouthBlizzard => Some(Direction::South),
            Self::WestBlizzard => Some(Direction::West),
            _ => None,
        }
    }
}

/// The basin with its blizzards factored out of the grid: horizontal and vertical blizzards wrap
/// with independent periods, so positions at minute `t` only depend on `t` modulo the lcm of the
/// two.
struct Basin {
    grid: Grid2D<BasinCell>,
    start: IVec2,
    end: IVec2,

    /// Interior dimensions, which are also the wrap periods per axis.
    period: IVec2,
    period_lcm: i32,

    /// `(initial position, step)` per blizzard, split by travel axis.
    horizontal_blizzards: Vec<(IVec2, i32)>,
    vertical_blizzards: Vec<(IVec2, i32)>,

    /// Blizzard-occupied cells per time phase; computed at most once per phase.
    occupied: Memo<i32, Rc<HashSet<IVec2>>>,
}

impl Basin {
    fn new(grid: &Grid2D<BasinCell>, start: IVec2, end: IVec2) -> Self {
        let period: IVec2 = grid.dimensions() - IVec2::new(2_i32, 2_i32);

        let mut horizontal_blizzards: Vec<(IVec2, i32)> = Vec::new();
        let mut vertical_blizzards: Vec<(IVec2, i32)> = Vec::new();

        for (index, cell) in grid.cells().iter().enumerate() {
            if let Some(dir) = cell.try_blizzard_direction() {
                let pos: IVec2 = grid.pos_from_index(index);
                let step: IVec2 = dir.vec();

                if step.x != 0_i32 {
                    horizontal_blizzards.push((pos, step.x));
                } else {
                    vertical_blizzards.push((pos, step.y));
                }
            }
        }

        Self {
            grid: grid.clone(),
            start,
            end,
            period,
            period_lcm: lcm(period.x, period.y),
            horizontal_blizzards,
            vertical_blizzards,
            occupied: Memo::new(),
        }
    }

    fn is_open(&self, pos: IVec2) -> bool {
        self.grid
            .get(pos)
            .map_or(false, |cell: &BasinCell| !matches!(cell, BasinCell::Wall))
    }

    fn occupied_at_phase(&mut self, phase: i32) -> Rc<HashSet<IVec2>> {
        let period: IVec2 = self.period;
        let horizontal_blizzards: &Vec<(IVec2, i32)> = &self.horizontal_blizzards;
        let vertical_blizzards: &Vec<(IVec2, i32)> = &self.vertical_blizzards;

        self.occupied.get_or_insert_with(phase, || {
            Rc::new(
                horizontal_blizzards
                    .iter()
                    .map(|(pos, step)| {
                        IVec2::new(
                            (pos.x - 1_i32 + step * phase).rem_euclid(period.x) + 1_i32,
                            pos.y,
                        )
                    })
                    .chain(vertical_blizzards.iter().map(|(pos, step)| {
                        IVec2::new(
                            pos.x,
                            (pos.y - 1_i32 + step * phase).rem_euclid(period.y) + 1_i32,
                        )
                    }))
                    .collect(),
            )
        })
    }

    /// The destination folded to a single vertex: any arrival phase counts as reaching it.
    fn goal_vertex(goal: IVec2) -> IVec3 {
        goal.extend(-1_i32)
    }

    /// Minutes to travel from `from` to `to`, departing at `start_time`, or `None` if every
    /// route is forever blocked.
    fn travel_time(&mut self, from: IVec2, to: IVec2, start_time: u32) -> Option<u32> {
        self.travel(from, to, start_time).distance
    }

    fn travel(&mut self, from: IVec2, to: IVec2, start_time: u32) -> ShortestPathResult<IVec3> {
        let period_lcm: i32 = self.period_lcm;

        shortest_path(
            from.extend(start_time as i32 % period_lcm),
            Some(Self::goal_vertex(to)),
            |vertex: &IVec3, neighbors: &mut Vec<OpenSetElement<IVec3, u32>>| {
                let phase: i32 = (vertex.z + 1_i32) % period_lcm;
                let pos: IVec2 = vertex.truncate();
                let occupied: Rc<HashSet<IVec2>> = self.occupied_at_phase(phase);

                neighbors.extend(
                    Direction::iter()
                        .map(|dir: Direction| pos + dir.vec())
                        .chain([pos])
                        .filter(|candidate: &IVec2| {
                            self.is_open(*candidate) && !occupied.contains(candidate)
                        })
                        .map(|candidate: IVec2| {
                            let vertex: IVec3 = if candidate == to {
                                Self::goal_vertex(to)
                            } else {
                                candidate.extend(phase)
                            };

                            OpenSetElement(vertex, 1_u32)
                        }),
                );
            },
        )
    }

    /// The leg's path as canonical position keys, for an external collaborator to render.
    fn travel_path_keys(&mut self, from: IVec2, to: IVec2, start_time: u32) -> Vec<String> {
        self.travel(from, to, start_time)
            .path
            .unwrap_or_default()
            .into_iter()
            .map(|vertex: IVec3| {
                if vertex.z < 0_i32 {
                    pos_2d_key(vertex.truncate())
                } else {
                    pos_3d_key(vertex)
                }
            })
            .collect()
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution {
    grid: Grid2D<BasinCell>,
    start: IVec2,
    end: IVec2,
}

#[derive(Debug, PartialEq)]
pub enum BasinParseError<'s> {
    FailedToParseGrid(GridParseError<'s, ()>),
    NoStartGap,
    NoEndGap,
}

impl Solution {
    fn basin(&self) -> Basin {
        Basin::new(&self.grid, self.start, self.end)
    }

    fn shortest_crossing_time(&self) -> Option<u32> {
        self.basin().travel_time(self.start, self.end, 0_u32)
    }

    /// There, back for the snacks, and there again.
    fn shortest_snack_run_time(&self) -> Option<u32> {
        let mut basin: Basin = self.basin();
        let mut time: u32 = 0_u32;

        for (from, to) in [
            (self.start, self.end),
            (self.end, self.start),
            (self.start, self.end),
        ] {
            time += basin.travel_time(from, to, time)?;
        }

        Some(time)
    }
}

impl RunParts for Solution {
    fn p1_internal(&mut self, args: &PartArgs) {
        dbg!(self.shortest_crossing_time());

        if args.verbose {
            dbg!(self.basin().travel_path_keys(self.start, self.end, 0_u32));
        }
    }

    fn p2_internal(&mut self, _args: &PartArgs) {
        dbg!(self.shortest_snack_run_time());
    }
}

impl<'i> TryFrom<&'i str> for Solution {
    type Error = BasinParseError<'i>;

    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        use BasinParseError::*;

        let grid: Grid2D<BasinCell> = input.try_into().map_err(FailedToParseGrid)?;

        let start: IVec2 = grid
            .iter_positions_with_cell(&BasinCell::Ground)
            .find(|pos: &IVec2| pos.y == 0_i32)
            .ok_or(NoStartGap)?;
        let end: IVec2 = grid
            .iter_positions_with_cell(&BasinCell::Ground)
            .find(|pos: &IVec2| pos.y == grid.max_dimensions().y)
            .ok_or(NoEndGap)?;

        Ok(Self { grid, start, end })
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::sync::OnceLock};

    const BASIN_STR: &str = concat!(
        "#.######\n",
        "#>>.<^<#\n",
        "#.<..<<#\n",
        "#>v.><>#\n",
        "#<^v^^>#\n",
        "######.#",
    );

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| Solution::try_from(BASIN_STR).unwrap())
    }

    #[test]
    fn test_solution_try_from_str() {
        let solution: &Solution = solution();

        assert_eq!(solution.start, IVec2::new(1_i32, 0_i32));
        assert_eq!(solution.end, IVec2::new(6_i32, 5_i32));
    }

    #[test]
    fn test_occupied_positions_are_memoized() {
        let mut basin: Basin = solution().basin();

        assert_eq!(basin.period_lcm, 12_i32);

        let phase_1_occupied: Rc<HashSet<IVec2>> = basin.occupied_at_phase(1_i32);

        // The two east blizzards of the top row meet at x 3 after one minute.
        assert!(phase_1_occupied.contains(&IVec2::new(3_i32, 1_i32)));

        basin.occupied_at_phase(1_i32);

        assert_eq!(basin.occupied.len(), 1_usize);
    }

    #[test]
    fn test_shortest_crossing_time() {
        assert_eq!(solution().shortest_crossing_time(), Some(18_u32));
    }

    #[test]
    fn test_shortest_snack_run_time() {
        assert_eq!(solution().shortest_snack_run_time(), Some(54_u32));
    }

    #[test]
    fn test_travel_path_keys() {
        let path_keys: Vec<String> =
            solution()
                .basin()
                .travel_path_keys(solution().start, solution().end, 0_u32);

        // 18 minutes of travel: the departure vertex plus one key per minute.
        assert_eq!(path_keys.len(), 19_usize);
        assert_eq!(path_keys.first().unwrap(), "1,0,0");
        assert_eq!(path_keys.last().unwrap(), "6,5");
    }
}
