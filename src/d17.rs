use {crate::*, std::mem::transmute, strum::EnumCount};

/// Rows the state fingerprint captures from the top of the tower. Sixteen rows has held up
/// empirically, but recurrence below the window going on to matter again would silently corrupt
/// the fast-forward, so treat this as a tunable, not a given.
const FINGERPRINT_ROWS: usize = 16_usize;

#[derive(Clone, Copy, Debug, Default, EnumCount)]
#[repr(usize)]
enum RockType {
    #[default]
    HorizontalLine,
    Plus,
    RightAngle,
    VerticalLine,
    Square,
}

impl RockType {
    /// Row masks from the bottom up, pre-shifted to the spawn column: bit `x + 1` is the cell at
    /// `x`, leaving bits 0 and 8 for the walls.
    const MASKS: [&'static [u16]; RockType::COUNT] = [
        &[0b1111000_u16],
        &[0b10000_u16, 0b111000_u16, 0b10000_u16],
        &[0b111000_u16, 0b100000_u16, 0b100000_u16],
        &[0b1000_u16, 0b1000_u16, 0b1000_u16, 0b1000_u16],
        &[0b11000_u16, 0b11000_u16],
    ];
    const MAX_HEIGHT: usize = Self::max_height();

    fn from_index(index: usize) -> Self {
        // SAFETY: `RockType` has `repr(usize)` with values `0..RockType::COUNT`, and the modulus
        // maps any `usize` into that range
        unsafe { transmute(index % Self::COUNT) }
    }

    const fn mask(self) -> &'static [u16] {
        Self::MASKS[self as usize]
    }

    const fn max_height() -> usize {
        let mut max_height: usize = 0_usize;
        let mut index: usize = 0_usize;

        while index < Self::COUNT {
            let height: usize = Self::MASKS[index].len();

            if height > max_height {
                max_height = height;
            }

            index += 1_usize;
        }

        max_height
    }
}

#[derive(Clone, Copy, Default)]
struct FallingRock([u16; RockType::MAX_HEIGHT]);

impl FallingRock {
    const WALL_MASK: u16 = 0b100000001_u16;

    fn try_push(self, jet: Jet) -> Option<Self> {
        let mut pushed: Self = self;

        for layer in pushed.0.iter_mut() {
            *layer = layer.rotate_left(jet as u32);

            if *layer & Self::WALL_MASK != 0_u16 {
                return None;
            }
        }

        Some(pushed)
    }

    fn layer_count(self) -> usize {
        self.0
            .iter()
            .position(|layer| *layer == 0_u16)
            .unwrap_or(self.0.len())
    }
}

impl From<RockType> for FallingRock {
    fn from(rock_type: RockType) -> Self {
        let mut falling_rock: Self = Self::default();

        let layers: &[u16] = rock_type.mask();

        falling_rock.0[..layers.len()].copy_from_slice(layers);

        falling_rock
    }
}

/// A jet is its leftward rotation amount: right is one bit up, left is a full-circle one bit
/// down.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(u32)]
enum Jet {
    Left = 15_u32,
    Right = 1_u32,
}

#[derive(Debug, PartialEq)]
pub struct InvalidJetChar(char);

impl TryFrom<char> for Jet {
    type Error = InvalidJetChar;

    fn try_from(jet_char: char) -> Result<Self, Self::Error> {
        match jet_char {
            '<' => Ok(Self::Left),
            '>' => Ok(Self::Right),
            _ => Err(InvalidJetChar(jet_char)),
        }
    }
}

type Fingerprint = ([u16; FINGERPRINT_ROWS], usize, usize);

struct Tower<'j> {
    jets: &'j [Jet],
    jet_index: usize,
    rock_index: usize,

    /// Resting rows, bottom first; the height of the tower is the number of rows.
    layers: Vec<u16>,
}

impl<'j> Tower<'j> {
    fn new(jets: &'j [Jet]) -> Self {
        Self {
            jets,
            jet_index: 0_usize,
            rock_index: 0_usize,
            layers: Vec::new(),
        }
    }

    fn height(&self) -> usize {
        self.layers.len()
    }

    fn overlaps(&self, bottom: usize, falling_rock: FallingRock) -> bool {
        self.layers
            .iter()
            .skip(bottom)
            .copied()
            .zip(falling_rock.0.iter().copied())
            .any(|(resting_layer, falling_layer)| resting_layer & falling_layer != 0_u16)
    }

    fn drop_rock(&mut self) {
        let mut falling_rock: FallingRock = RockType::from_index(self.rock_index).into();
        let mut bottom: usize = self.layers.len() + 3_usize;

        self.rock_index = (self.rock_index + 1_usize) % RockType::COUNT;

        loop {
            let jet: Jet = self.jets[self.jet_index];

            self.jet_index = (self.jet_index + 1_usize) % self.jets.len();

            if let Some(pushed) = falling_rock
                .try_push(jet)
                .filter(|pushed| !self.overlaps(bottom, *pushed))
            {
                falling_rock = pushed;
            }

            if bottom == 0_usize || self.overlaps(bottom - 1_usize, falling_rock) {
                break;
            }

            bottom -= 1_usize;
        }

        let top: usize = bottom + falling_rock.layer_count();

        if self.layers.len() < top {
            self.layers.resize(top, 0_u16);
        }

        for (resting_layer, falling_layer) in self.layers[bottom..top]
            .iter_mut()
            .zip(falling_rock.0.iter())
        {
            *resting_layer |= *falling_layer;
        }
    }

    fn fingerprint(&self) -> Fingerprint {
        // Rows below the tower get a sentinel no real row can hold, so short towers where the
        // floor is still in play fingerprint distinctly.
        let mut rows: [u16; FINGERPRINT_ROWS] = [u16::MAX; FINGERPRINT_ROWS];

        for (row, layer) in rows.iter_mut().zip(self.layers.iter().rev()) {
            *row = *layer;
        }

        (rows, self.rock_index, self.jet_index)
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution(Vec<Jet>);

impl Solution {
    fn tower_height(&self, rocks: u64) -> u64 {
        let mut tower: Tower = Tower::new(&self.0);
        let mut cycle_detector: CycleDetector<Fingerprint, u64> = CycleDetector::new();
        let mut dropped: u64 = 0_u64;
        let mut height_offset: u64 = 0_u64;

        while dropped < rocks {
            tower.drop_rock();
            dropped += 1_u64;

            if let Some(cycle) =
                cycle_detector.observe(tower.fingerprint(), dropped, tower.height() as u64)
            {
                let cycles: u64 = whole_cycles_remaining(dropped, rocks, cycle.length);

                height_offset = cycles * (tower.height() as u64 - cycle.snapshot);
                dropped += cycles * cycle.length;
            }
        }

        tower.height() as u64 + height_offset
    }
}

impl RunParts for Solution {
    fn p1_internal(&mut self, _args: &PartArgs) {
        dbg!(self.tower_height(2022_u64));
    }

    fn p2_internal(&mut self, _args: &PartArgs) {
        dbg!(self.tower_height(1_000_000_000_000_u64));
    }
}

impl<'i> TryFrom<&'i str> for Solution {
    type Error = InvalidJetChar;

    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        input
            .trim_end()
            .chars()
            .map(Jet::try_from)
            .collect::<Result<Vec<Jet>, Self::Error>>()
            .map(Self)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::sync::OnceLock};

    const JETS_STR: &str = ">>><<><>><<<>><>>><<<>>><<<><<<>><>><<>>";

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| Solution::try_from(JETS_STR).unwrap())
    }

    #[test]
    fn test_first_rocks_rest() {
        let mut tower: Tower = Tower::new(&solution().0);

        for expected_height in [
            1_usize, 4_usize, 6_usize, 7_usize, 9_usize, 10_usize, 13_usize, 15_usize, 17_usize,
            17_usize,
        ] {
            tower.drop_rock();

            assert_eq!(tower.height(), expected_height);
        }
    }

    #[test]
    fn test_tower_height_after_2022_rocks() {
        assert_eq!(solution().tower_height(2022_u64), 3068_u64);
    }

    #[test]
    fn test_tower_height_after_a_trillion_rocks() {
        assert_eq!(
            solution().tower_height(1_000_000_000_000_u64),
            1_514_285_714_288_u64
        );
    }

    #[test]
    fn test_fast_forward_matches_stepping() {
        // Small enough to verify directly against the unaccelerated simulation.
        let mut tower: Tower = Tower::new(&solution().0);

        for _ in 0_usize..200_usize {
            tower.drop_rock();
        }

        assert_eq!(solution().tower_height(200_u64), tower.height() as u64);
    }
}
