use {
    crate::*,
    glam::IVec2,
    nom::{
        bytes::complete::tag,
        character::complete::line_ending,
        combinator::map,
        error::Error,
        multi::separated_list1,
        sequence::separated_pair,
        Err, IResult,
    },
};

const SAND_SOURCE: IVec2 = IVec2::new(500_i32, 0_i32);

define_cell! {
    #[repr(u8)]
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    enum Cell {
        #[default]
        Air = AIR = b'.',
        Rock = ROCK = b'#',
        Sand = SAND = b'o',
        Source = SOURCE = b'+',
    }
}

fn parse_point(input: &str) -> IResult<&str, IVec2> {
    map(
        separated_pair(parse_integer::<i32>, tag(","), parse_integer::<i32>),
        |(x, y)| IVec2::new(x, y),
    )(input)
}

/// The rock paths of the scan, each a polyline of axis-aligned segments.
#[cfg_attr(test, derive(Debug, PartialEq))]
struct Scan(Vec<Vec<IVec2>>);

#[derive(Debug, PartialEq)]
pub enum ScanParseError<'s> {
    FailedToParse(Err<Error<&'s str>>),
    LineIsNotAxisAligned { start: IVec2, end: IVec2 },
}

impl<'s> TryFrom<&'s str> for Scan {
    type Error = ScanParseError<'s>;

    fn try_from(scan_str: &'s str) -> Result<Self, Self::Error> {
        use ScanParseError::*;

        let (_, paths): (&str, Vec<Vec<IVec2>>) = separated_list1(
            line_ending,
            separated_list1(tag(" -> "), parse_point),
        )(scan_str)
        .map_err(FailedToParse)?;

        for path in paths.iter() {
            for line in path.windows(2_usize) {
                let delta: IVec2 = line[1_usize] - line[0_usize];

                if delta.x != 0_i32 && delta.y != 0_i32 {
                    return Err(LineIsNotAxisAligned {
                        start: line[0_usize],
                        end: line[1_usize],
                    });
                }
            }
        }

        Ok(Self(paths))
    }
}

/// A cave being filled one sand unit per step.
struct Cave {
    grid: SparseGrid<Cell>,

    /// The lowest rock row; sand below it falls forever unless there's a floor.
    abyss_y: i32,

    floor_y: Option<i32>,
    resting_sand: usize,
    emit_frames: bool,
}

impl Cave {
    fn new(scan: &Scan, with_floor: bool, emit_frames: bool) -> Self {
        let mut grid: SparseGrid<Cell> = SparseGrid::new(Cell::Air);

        for path in scan.0.iter() {
            for line in path.windows(2_usize) {
                if line[0_usize] == line[1_usize] {
                    grid.set(line[0_usize], Cell::Rock);
                } else {
                    for pos in CellIter2D::try_from(line[0_usize]..=line[1_usize]).unwrap() {
                        grid.set(pos, Cell::Rock);
                    }
                }
            }
        }

        let abyss_y: i32 = grid
            .bounds()
            .map(|(_, max)| max.y)
            .unwrap_or(SAND_SOURCE.y);

        grid.set(SAND_SOURCE, Cell::Source);

        Self {
            grid,
            abyss_y,
            floor_y: with_floor.then_some(abyss_y + 2_i32),
            resting_sand: 0_usize,
            emit_frames,
        }
    }

    fn is_open(&self, pos: IVec2) -> bool {
        self.floor_y.map_or(true, |floor_y| pos.y < floor_y)
            && matches!(*self.grid.get(pos), Cell::Air)
    }

    /// Where the next unit comes to rest, or `None` if it falls past the lowest rock into the
    /// abyss.
    fn try_drop_unit(&self) -> Option<IVec2> {
        const DELTA_CANDIDATES: [IVec2; 3_usize] =
            [IVec2::Y, IVec2::new(-1_i32, 1_i32), IVec2::ONE];

        let mut sand: IVec2 = SAND_SOURCE;

        loop {
            if self.floor_y.is_none() && sand.y > self.abyss_y {
                return None;
            }

            match DELTA_CANDIDATES
                .iter()
                .map(|delta: &IVec2| sand + *delta)
                .find(|candidate: &IVec2| self.is_open(*candidate))
            {
                Some(candidate) => sand = candidate,
                None => return Some(sand),
            }
        }
    }

    fn string(&self) -> String {
        self.grid.to_bounded_grid().map(String::from).unwrap_or_default()
    }
}

impl StepSimulation for Cave {
    /// A dense snapshot over the occupied window; rendering it is the consumer's business.
    type Frame = Grid2D<Cell>;
    type Answer = usize;

    fn step(&mut self) -> SimStep<Grid2D<Cell>, usize> {
        match self.try_drop_unit() {
            None => SimStep::Done(self.resting_sand),
            Some(sand) => {
                self.grid.set(sand, Cell::Sand);
                self.resting_sand += 1_usize;

                if sand == SAND_SOURCE {
                    SimStep::Done(self.resting_sand)
                } else {
                    match self.emit_frames.then(|| self.grid.to_bounded_grid()).flatten() {
                        Some(frame) => SimStep::Frame(frame),
                        None => SimStep::Idle,
                    }
                }
            }
        }
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution(Scan);

impl Solution {
    fn resting_sand_before_abyss(&self) -> usize {
        Cave::new(&self.0, false, false).run()
    }

    fn resting_sand_on_floor(&self) -> usize {
        Cave::new(&self.0, true, false).run()
    }
}

impl RunParts for Solution {
    fn p1_internal(&mut self, args: &PartArgs) {
        let mut cave: Cave = Cave::new(&self.0, false, false);

        dbg!(cave.run());

        if args.verbose {
            println!("cave:\n{}", cave.string());
        }
    }

    fn p2_internal(&mut self, args: &PartArgs) {
        let mut cave: Cave = Cave::new(&self.0, true, false);

        dbg!(cave.run());

        if args.verbose {
            println!("cave:\n{}", cave.string());
        }
    }
}

impl<'i> TryFrom<&'i str> for Solution {
    type Error = ScanParseError<'i>;

    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        Ok(Self(input.try_into()?))
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::sync::OnceLock};

    const SCAN_STR: &str = concat!(
        "498,4 -> 498,6 -> 496,6\n",
        "503,4 -> 502,4 -> 502,9 -> 494,9",
    );
    const CAVE_STR: &str = concat!(
        "......+...\n",
        "..........\n",
        "..........\n",
        "..........\n",
        "....#...##\n",
        "....#...#.\n",
        "..###...#.\n",
        "........#.\n",
        "........#.\n",
        "#########.\n",
    );

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| Solution::try_from(SCAN_STR).unwrap())
    }

    #[test]
    fn test_scan_try_from_str() {
        assert_eq!(
            solution().0,
            Scan(vec![
                vec![
                    IVec2::new(498_i32, 4_i32),
                    IVec2::new(498_i32, 6_i32),
                    IVec2::new(496_i32, 6_i32)
                ],
                vec![
                    IVec2::new(503_i32, 4_i32),
                    IVec2::new(502_i32, 4_i32),
                    IVec2::new(502_i32, 9_i32),
                    IVec2::new(494_i32, 9_i32)
                ],
            ])
        );
    }

    #[test]
    fn test_cave_string() {
        pretty_assert_eq!(Cave::new(&solution().0, false, false).string(), CAVE_STR);
    }

    #[test]
    fn test_first_units_rest() {
        let mut cave: Cave = Cave::new(&solution().0, false, false);

        assert_eq!(cave.try_drop_unit(), Some(IVec2::new(500_i32, 8_i32)));

        cave.step();

        assert_eq!(cave.try_drop_unit(), Some(IVec2::new(499_i32, 8_i32)));
    }

    #[test]
    fn test_resting_sand_before_abyss() {
        assert_eq!(solution().resting_sand_before_abyss(), 24_usize);
    }

    #[test]
    fn test_resting_sand_on_floor() {
        assert_eq!(solution().resting_sand_on_floor(), 93_usize);
    }

    #[test]
    fn test_frames_track_each_resting_unit() {
        let mut frames: Frames<Cave> = Cave::new(&solution().0, false, true).frames();

        assert_eq!(frames.by_ref().count(), 24_usize);
        assert_eq!(frames.into_answer(), Some(24_usize));
    }
}
