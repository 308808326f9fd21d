use {
    crate::*,
    glam::IVec2,
    std::collections::HashMap,
};

define_cell! {
    #[repr(u8)]
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    enum GroveCell {
        #[default]
        Ground = GROUND = b'.',
        Elf = ELF = b'#',
    }
}

/// The scattering simulation: each round every crowded elf proposes a step in the first clear
/// direction of a rotating preference order, and proposals no two elves share get executed.
struct Grove {
    grid: SparseGrid<GroveCell>,
    round: usize,
    round_limit: Option<usize>,
    emit_frames: bool,
}

impl Grove {
    /// The round-rotating preference order (not the enum order).
    const PROPOSAL_DIRECTIONS: [Direction; 4_usize] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    fn new(grid: &Grid2D<GroveCell>, round_limit: Option<usize>, emit_frames: bool) -> Self {
        Self {
            grid: SparseGrid::from_grid(GroveCell::Ground, grid),
            round: 0_usize,
            round_limit,
            emit_frames,
        }
    }

    fn is_ground(&self, pos: IVec2) -> bool {
        matches!(*self.grid.get(pos), GroveCell::Ground)
    }

    fn try_propose(&self, elf: IVec2) -> Option<IVec2> {
        if iter_adjacent(elf).all(|pos: IVec2| self.is_ground(pos)) {
            return None;
        }

        (0_usize..Self::PROPOSAL_DIRECTIONS.len())
            .map(|index| {
                Self::PROPOSAL_DIRECTIONS
                    [(self.round + index) % Self::PROPOSAL_DIRECTIONS.len()]
            })
            .find(|dir: &Direction| {
                let dir_vec: IVec2 = dir.vec();
                let perp: IVec2 = dir_vec.perp();

                [dir_vec - perp, dir_vec, dir_vec + perp]
                    .into_iter()
                    .all(|delta: IVec2| self.is_ground(elf + delta))
            })
            .map(|dir: Direction| elf + dir.vec())
    }

    /// Runs one round; true iff any elf moved.
    fn run_round(&mut self) -> bool {
        let proposals: Vec<(IVec2, IVec2)> = self
            .grid
            .cells()
            .filter_map(|(elf, _)| self.try_propose(elf).map(|to: IVec2| (elf, to)))
            .collect();

        let mut destination_counts: HashMap<IVec2, u32> = HashMap::new();

        for (_, to) in proposals.iter() {
            *destination_counts.entry(*to).or_default() += 1_u32;
        }

        let mut moved: bool = false;

        for (from, to) in proposals {
            if destination_counts[&to] == 1_u32 {
                self.grid.set(from, GroveCell::Ground);
                self.grid.set(to, GroveCell::Elf);
                moved = true;
            }
        }

        self.round += 1_usize;

        moved
    }

    /// Ground tiles within the smallest rectangle containing every elf.
    fn empty_ground(&self) -> usize {
        let (min, max): (IVec2, IVec2) = self.grid.bounds().unwrap();
        let dimensions: IVec2 = max - min + IVec2::ONE;

        (dimensions.x * dimensions.y) as usize - self.grid.len()
    }

    fn string(&self) -> String {
        self.grid.to_bounded_grid().map(String::from).unwrap_or_default()
    }
}

impl StepSimulation for Grove {
    /// A dense snapshot over the occupied window; rendering it is the consumer's business.
    type Frame = Grid2D<GroveCell>;
    type Answer = usize;

    fn step(&mut self) -> SimStep<Grid2D<GroveCell>, usize> {
        if self.round_limit == Some(self.round) {
            return SimStep::Done(self.empty_ground());
        }

        if !self.run_round() {
            return SimStep::Done(match self.round_limit {
                // Nothing will ever move again; the bounding rectangle is final.
                Some(_) => self.empty_ground(),
                None => self.round,
            });
        }

        match self.emit_frames.then(|| self.grid.to_bounded_grid()).flatten() {
            Some(frame) => SimStep::Frame(frame),
            None => SimStep::Idle,
        }
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution(Grid2D<GroveCell>);

impl Solution {
    const EMPTY_GROUND_ROUNDS: usize = 10_usize;

    fn empty_ground_after_rounds(&self) -> usize {
        Grove::new(&self.0, Some(Self::EMPTY_GROUND_ROUNDS), false).run()
    }

    fn first_static_round(&self) -> usize {
        Grove::new(&self.0, None, false).run()
    }
}

impl RunParts for Solution {
    fn p1_internal(&mut self, args: &PartArgs) {
        let mut grove: Grove = Grove::new(&self.0, Some(Self::EMPTY_GROUND_ROUNDS), false);

        dbg!(grove.run());

        if args.verbose {
            println!("grove:\n{}", grove.string());
        }
    }

    fn p2_internal(&mut self, _args: &PartArgs) {
        dbg!(self.first_static_round());
    }
}

impl<'i> TryFrom<&'i str> for Solution {
    type Error = GridParseError<'i, ()>;

    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        Ok(Self(Grid2D::<GroveCell>::try_from(input)?))
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::sync::OnceLock};

    const GROVE_STR: &str = concat!(
        "....#..\n",
        "..###.#\n",
        "#...#.#\n",
        ".#...##\n",
        "#.###..\n",
        "##.#.##\n",
        ".#..#..",
    );

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| Solution::try_from(GROVE_STR).unwrap())
    }

    #[test]
    fn test_small_grove_settles() {
        let solution: Solution = Solution::try_from(concat!(
            ".....\n",
            "..##.\n",
            "..#..\n",
            ".....\n",
            "..##.\n",
            ".....",
        ))
        .unwrap();

        assert_eq!(solution.first_static_round(), 4_usize);
    }

    #[test]
    fn test_empty_ground_after_rounds() {
        assert_eq!(solution().empty_ground_after_rounds(), 110_usize);
    }

    #[test]
    fn test_first_static_round() {
        assert_eq!(solution().first_static_round(), 20_usize);
    }

    #[test]
    fn test_frames_per_round() {
        // Three moving rounds then the static fourth produce three frames.
        let mut frames: Frames<Grove> = Grove::new(
            &Solution::try_from(concat!(
                ".....\n",
                "..##.\n",
                "..#..\n",
                ".....\n",
                "..##.\n",
                ".....",
            ))
            .unwrap()
            .0,
            None,
            true,
        )
        .frames();

        assert_eq!(frames.by_ref().count(), 3_usize);
        assert_eq!(frames.into_answer(), Some(4_usize));
    }
}
