use {
    crate::*,
    nom::{
        bytes::complete::tag,
        character::complete::line_ending,
        combinator::map,
        error::Error,
        multi::separated_list1,
        sequence::tuple,
        Err, IResult,
    },
    strum::EnumCount,
};

#[derive(Clone, Copy, Debug, EnumCount, PartialEq)]
#[repr(usize)]
enum MaterialType {
    Ore,
    Clay,
    Obsidian,
    Geode,
}

impl MaterialType {
    /// Build preference, most valuable robot first.
    const BUILD_ORDER: [Self; Self::COUNT] = [Self::Geode, Self::Obsidian, Self::Clay, Self::Ore];
}

type Materials = [u16; MaterialType::COUNT];

#[derive(Clone, Debug, PartialEq)]
struct Blueprint {
    id: u16,

    /// `costs[robot][material]`.
    costs: [Materials; MaterialType::COUNT],
}

impl Blueprint {
    fn max_cost(&self, material: MaterialType) -> u16 {
        self.costs
            .iter()
            .map(|costs: &Materials| costs[material as usize])
            .max()
            .unwrap()
    }

    fn quality(&self, time: u8) -> u32 {
        self.id as u32 * self.max_geodes(time)
    }

    fn max_geodes(&self, time: u8) -> u32 {
        GeodeSearch {
            blueprint: self,
            max_costs: [
                self.max_cost(MaterialType::Ore),
                self.max_cost(MaterialType::Clay),
                self.max_cost(MaterialType::Obsidian),
            ],
            visited: Memo::new(),
            time,
        }
        .run()
    }
}

impl Parse for Blueprint {
    fn parse(input: &str) -> IResult<&str, Self> {
        map(
            tuple((
                tag("Blueprint "),
                parse_integer::<u16>,
                tag(": Each ore robot costs "),
                parse_integer::<u16>,
                tag(" ore. Each clay robot costs "),
                parse_integer::<u16>,
                tag(" ore. Each obsidian robot costs "),
                parse_integer::<u16>,
                tag(" ore and "),
                parse_integer::<u16>,
                tag(" clay. Each geode robot costs "),
                parse_integer::<u16>,
                tag(" ore and "),
                parse_integer::<u16>,
                tag(" obsidian."),
            )),
            |(
                _,
                id,
                _,
                ore_ore,
                _,
                clay_ore,
                _,
                obsidian_ore,
                _,
                obsidian_clay,
                _,
                geode_ore,
                _,
                geode_obsidian,
                _,
            )| Self {
                id,
                costs: [
                    [ore_ore, 0_u16, 0_u16, 0_u16],
                    [clay_ore, 0_u16, 0_u16, 0_u16],
                    [obsidian_ore, obsidian_clay, 0_u16, 0_u16],
                    [geode_ore, 0_u16, geode_obsidian, 0_u16],
                ],
            },
        )(input)
    }
}

#[derive(Clone, Copy, Eq, Hash, PartialEq)]
struct FactoryState {
    time_left: u8,
    materials: Materials,
    robots: Materials,
}

impl FactoryState {
    fn can_afford(&self, costs: &Materials) -> bool {
        self.materials
            .iter()
            .zip(costs.iter())
            .all(|(material, cost)| material >= cost)
    }

    /// One minute passes: existing robots collect, and optionally one robot paid for out of the
    /// pre-collection materials comes online.
    fn advance(&self, build: Option<(MaterialType, &Materials)>) -> Self {
        let mut state: Self = *self;

        for (material, robots) in state.materials.iter_mut().zip(state.robots.iter()) {
            *material += *robots;
        }

        if let Some((robot, costs)) = build {
            for (material, cost) in state.materials.iter_mut().zip(costs.iter()) {
                *material -= *cost;
            }

            state.robots[robot as usize] += 1_u16;
        }

        state.time_left -= 1_u8;

        state
    }
}

/// Minute-stepped branch and bound over build decisions.
struct GeodeSearch<'b> {
    blueprint: &'b Blueprint,

    /// Per material, the largest per-robot cost in the blueprint; more robots of a kind than that
    /// can never be spent.
    max_costs: [u16; 3_usize],

    /// States already expanded; different build orders reconverge constantly.
    visited: Memo<FactoryState, ()>,

    time: u8,
}

impl<'b> GeodeSearch<'b> {
    const GEODE: usize = MaterialType::Geode as usize;
}

impl<'b> BranchAndBound for GeodeSearch<'b> {
    type State = FactoryState;
    type Score = u32;

    fn root(&self) -> Self::State {
        FactoryState {
            time_left: self.time,
            materials: [0_u16; MaterialType::COUNT],
            robots: [1_u16, 0_u16, 0_u16, 0_u16],
        }
    }

    fn score(&self, state: &Self::State) -> Self::Score {
        state.materials[Self::GEODE] as u32
            + state.robots[Self::GEODE] as u32 * state.time_left as u32
    }

    fn bound(&self, state: &Self::State) -> Self::Score {
        // As if a geode robot came online every remaining minute.
        self.score(state) + triangle_number((state.time_left as usize).saturating_sub(1_usize)) as u32
    }

    fn branch(&mut self, state: &Self::State, branches: &mut Vec<Self::State>) {
        if state.time_left == 0_u8 || self.visited.insert(*state, ()).is_some() {
            return;
        }

        for robot in MaterialType::BUILD_ORDER {
            let costs: &Materials = &self.blueprint.costs[robot as usize];

            if !state.can_afford(costs) {
                continue;
            }

            if !matches!(robot, MaterialType::Geode)
                && state.robots[robot as usize] >= self.max_costs[robot as usize]
            {
                continue;
            }

            branches.push(state.advance(Some((robot, costs))));

            if matches!(robot, MaterialType::Geode | MaterialType::Obsidian) {
                // An affordable precious robot dominates every alternative this minute.
                return;
            }
        }

        if state.materials[MaterialType::Ore as usize] <= self.max_costs[MaterialType::Ore as usize]
        {
            branches.push(state.advance(None));
        }
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution(Vec<Blueprint>);

impl Solution {
    const QUALITY_TIME: u8 = 24_u8;
    const EXTENDED_TIME: u8 = 32_u8;
    const EXTENDED_BLUEPRINTS: usize = 3_usize;

    fn quality_sum(&self) -> u32 {
        self.0
            .iter()
            .map(|blueprint: &Blueprint| blueprint.quality(Self::QUALITY_TIME))
            .sum()
    }

    fn extended_geode_product(&self) -> u32 {
        self.0[..Self::EXTENDED_BLUEPRINTS.min(self.0.len())]
            .iter()
            .map(|blueprint: &Blueprint| blueprint.max_geodes(Self::EXTENDED_TIME))
            .product()
    }
}

impl RunParts for Solution {
    fn p1_internal(&mut self, _args: &PartArgs) {
        dbg!(self.quality_sum());
    }

    fn p2_internal(&mut self, _args: &PartArgs) {
        dbg!(self.extended_geode_product());
    }
}

impl<'i> TryFrom<&'i str> for Solution {
    type Error = Err<Error<&'i str>>;

    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        separated_list1(line_ending, Blueprint::parse)(input)
            .map(|(_, blueprints)| Self(blueprints))
    }
}
