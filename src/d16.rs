use {
    crate::*,
    bitvec::prelude::*,
    nom::{
        branch::alt,
        bytes::complete::{tag, take_while_m_n},
        character::complete::line_ending,
        combinator::{map, map_opt},
        error::Error,
        multi::separated_list1,
        sequence::tuple,
        Err, IResult,
    },
    std::{
        collections::HashMap,
        fmt::{Debug, Formatter, Result as FmtResult},
    },
};

/// One open-flag bit per useful valve.
type OpenValves = BitArr!(for u64::BITS as usize, in u64);

#[derive(Clone, Copy, Eq, Hash, PartialEq)]
struct ValveTag([u8; 2_usize]);

impl ValveTag {
    const AA: Self = Self([b'A', b'A']);
}

impl Debug for ValveTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}{}", self.0[0_usize] as char, self.0[1_usize] as char)
    }
}

impl Parse for ValveTag {
    fn parse(input: &str) -> IResult<&str, Self> {
        map_opt(
            take_while_m_n(2_usize, 2_usize, |c: char| c.is_ascii_uppercase()),
            |tag_str: &str| -> Option<Self> {
                tag_str.as_bytes().try_into().ok().map(Self)
            },
        )(input)
    }
}

#[derive(Debug, PartialEq)]
struct Valve {
    tag: ValveTag,
    flow: u16,
    tunnels: Vec<ValveTag>,
}

impl Parse for Valve {
    fn parse(input: &str) -> IResult<&str, Self> {
        map(
            tuple((
                tag("Valve "),
                ValveTag::parse,
                tag(" has flow rate="),
                parse_integer::<u16>,
                alt((
                    tag("; tunnels lead to valves "),
                    tag("; tunnel leads to valve "),
                )),
                separated_list1(tag(", "), ValveTag::parse),
            )),
            |(_, valve_tag, _, flow, _, tunnels)| Self {
                tag: valve_tag,
                flow,
                tunnels,
            },
        )(input)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Agent {
    /// An index into the useful valves, or the one-past-the-end start index.
    valve: u8,

    /// Minutes remaining for this agent.
    time: u8,
}

#[derive(Clone)]
struct ValveSearchState {
    agents: [Agent; 2_usize],
    open: OpenValves,
    released: u32,
}

/// Branch and bound over which useful valve each agent opens next, after collapsing the tunnel
/// graph to pairwise travel times between useful valves.
struct ValveSearch {
    /// Flows of the useful (non-zero flow) valves.
    flows: Vec<u16>,

    /// `distances[from][to]`: travel minutes between useful valves; the final row starts from
    /// `AA`.
    distances: Vec<Vec<u8>>,

    times: [u8; 2_usize],
}

impl ValveSearch {
    fn start_index(&self) -> u8 {
        self.flows.len() as u8
    }
}

impl BranchAndBound for ValveSearch {
    type State = ValveSearchState;
    type Score = u32;

    fn root(&self) -> Self::State {
        ValveSearchState {
            agents: [
                Agent {
                    valve: self.start_index(),
                    time: self.times[0_usize],
                },
                Agent {
                    valve: self.start_index(),
                    time: self.times[1_usize],
                },
            ],
            open: OpenValves::ZERO,
            released: 0_u32,
        }
    }

    fn score(&self, state: &Self::State) -> Self::Score {
        state.released
    }

    fn bound(&self, state: &Self::State) -> Self::Score {
        // Pretend every closed valve could be opened one minute from now by whichever agent has
        // the most time. Never an underestimate: a real opening costs at least one travel minute
        // on top of the opening minute.
        let max_time: u32 = (state.agents[0_usize].time.max(state.agents[1_usize].time) as u32)
            .saturating_sub(1_u32);

        state.released
            + self
                .flows
                .iter()
                .enumerate()
                .filter(|(valve, _)| !state.open[*valve])
                .map(|(_, flow)| *flow as u32 * max_time)
                .sum::<u32>()
    }

    fn branch(&mut self, state: &Self::State, branches: &mut Vec<Self::State>) {
        let symmetric: bool = state.agents[0_usize] == state.agents[1_usize];

        for (agent_index, agent) in state.agents.iter().copied().enumerate() {
            if agent_index > 0_usize && symmetric {
                // Identical agents produce mirrored subtrees; walking one of them suffices.
                break;
            }

            for (valve, flow) in self.flows.iter().copied().enumerate() {
                if state.open[valve] {
                    continue;
                }

                let distance: u8 = self.distances[agent.valve as usize][valve];
                let time: u8 = agent.time.saturating_sub(distance + 1_u8);

                if time == 0_u8 {
                    continue;
                }

                let mut branch: ValveSearchState = state.clone();

                branch.agents[agent_index] = Agent {
                    valve: valve as u8,
                    time,
                };
                branch.open.set(valve, true);
                branch.released += flow as u32 * time as u32;
                branches.push(branch);
            }
        }

        // Most pressure released first.
        branches.sort_unstable_by(|a, b| b.released.cmp(&a.released));
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution(Vec<Valve>);

#[derive(Debug)]
pub enum ValveParseError<'s> {
    FailedToParse(Err<Error<&'s str>>),
    UnknownTunnelTag(ValveTag),
    NoStartValve,
    TooManyUsefulValves(usize),
}

impl Solution {
    fn valve_search(&self, times: [u8; 2_usize]) -> ValveSearch {
        let tag_indices: HashMap<ValveTag, usize> = self
            .0
            .iter()
            .enumerate()
            .map(|(index, valve)| (valve.tag, index))
            .collect();

        let useful: Vec<usize> = (0_usize..self.0.len())
            .filter(|index| self.0[*index].flow > 0_u16)
            .collect();

        let flows: Vec<u16> = useful.iter().map(|index| self.0[*index].flow).collect();

        // Pairwise travel times over the full tunnel graph, one search per (source, useful
        // destination) pair.
        let distances: Vec<Vec<u8>> = useful
            .iter()
            .copied()
            .chain([tag_indices[&ValveTag::AA]])
            .map(|from: usize| {
                useful
                    .iter()
                    .copied()
                    .map(|to: usize| {
                        if from == to {
                            0_u8
                        } else {
                            shortest_path(
                                from,
                                Some(to),
                                |valve: &usize,
                                 neighbors: &mut Vec<OpenSetElement<usize, u32>>| {
                                    neighbors.extend(self.0[*valve].tunnels.iter().map(
                                        |tunnel_tag: &ValveTag| {
                                            OpenSetElement(tag_indices[tunnel_tag], 1_u32)
                                        },
                                    ));
                                },
                            )
                            .distance
                            .unwrap() as u8
                        }
                    })
                    .collect()
            })
            .collect();

        ValveSearch {
            flows,
            distances,
            times,
        }
    }

    fn max_released_pressure(&self, times: [u8; 2_usize]) -> u32 {
        self.valve_search(times).run()
    }

    fn max_released_pressure_alone(&self) -> u32 {
        self.max_released_pressure([30_u8, 0_u8])
    }

    fn max_released_pressure_with_elephant(&self) -> u32 {
        self.max_released_pressure([26_u8, 26_u8])
    }
}

impl RunParts for Solution {
    fn p1_internal(&mut self, _args: &PartArgs) {
        dbg!(self.max_released_pressure_alone());
    }

    fn p2_internal(&mut self, _args: &PartArgs) {
        dbg!(self.max_released_pressure_with_elephant());
    }
}

impl<'i> TryFrom<&'i str> for Solution {
    type Error = ValveParseError<'i>;

    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        use ValveParseError::*;

        let (_, valves): (&str, Vec<Valve>) =
            separated_list1(line_ending, Valve::parse)(input).map_err(FailedToParse)?;

        let tags: Vec<ValveTag> = valves.iter().map(|valve| valve.tag).collect();

        if !tags.contains(&ValveTag::AA) {
            return Err(NoStartValve);
        }

        for valve in valves.iter() {
            if let Some(unknown_tag) = valve
                .tunnels
                .iter()
                .find(|tunnel_tag| !tags.contains(tunnel_tag))
            {
                return Err(UnknownTunnelTag(*unknown_tag));
            }
        }

        let useful_count: usize = valves.iter().filter(|valve| valve.flow > 0_u16).count();

        if useful_count > u64::BITS as usize {
            return Err(TooManyUsefulValves(useful_count));
        }

        Ok(Self(valves))
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::sync::OnceLock};

    const VALVES_STR: &str = concat!(
        "Valve AA has flow rate=0; tunnels lead to valves DD, II, BB\n",
        "Valve BB has flow rate=13; tunnels lead to valves CC, AA\n",
        "Valve CC has flow rate=2; tunnels lead to valves DD, BB\n",
        "Valve DD has flow rate=20; tunnels lead to valves CC, AA, EE\n",
        "Valve EE has flow rate=3; tunnels lead to valves FF, DD\n",
        "Valve FF has flow rate=0; tunnels lead to valves EE, GG\n",
        "Valve GG has flow rate=0; tunnels lead to valves FF, HH\n",
        "Valve HH has flow rate=22; tunnel leads to valve GG\n",
        "Valve II has flow rate=0; tunnels lead to valves AA, JJ\n",
        "Valve JJ has flow rate=21; tunnel leads to valve II",
    );

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| Solution::try_from(VALVES_STR).unwrap())
    }

    #[test]
    fn test_valve_parse() {
        let valve: Valve = Valve::parse("Valve HH has flow rate=22; tunnel leads to valve GG")
            .unwrap()
            .1;

        assert_eq!(
            valve,
            Valve {
                tag: ValveTag([b'H', b'H']),
                flow: 22_u16,
                tunnels: vec![ValveTag([b'G', b'G'])],
            }
        );
    }

    #[test]
    fn test_travel_times() {
        let valve_search: ValveSearch = solution().valve_search([30_u8, 0_u8]);

        // Useful valves in input order: BB, CC, DD, EE, HH, JJ; the last row starts from AA.
        let from_aa: &Vec<u8> = valve_search.distances.last().unwrap();

        assert_eq!(from_aa[..], [1_u8, 2_u8, 1_u8, 2_u8, 5_u8, 2_u8]);
    }

    #[test]
    fn test_max_released_pressure_alone() {
        assert_eq!(solution().max_released_pressure_alone(), 1651_u32);
    }

    #[test]
    fn test_max_released_pressure_with_elephant() {
        assert_eq!(solution().max_released_pressure_with_elephant(), 1707_u32);
    }
}
