/// Reusable scratch for a branch-and-bound run: the explicit work stack and a buffer for each
/// node's successors.
pub struct BranchAndBoundState<S> {
    stack: Vec<S>,
    branches: Vec<S>,
}

impl<S> BranchAndBoundState<S> {
    fn clear(&mut self) {
        self.stack.clear();
        self.branches.clear();
    }
}

impl<S> Default for BranchAndBoundState<S> {
    fn default() -> Self {
        Self {
            stack: Default::default(),
            branches: Default::default(),
        }
    }
}

/// Depth-first [branch and bound][bnb] over a tree of partial states, walked with an explicit
/// work stack rather than recursion.
///
/// One best-known objective value is shared across the whole exploration. A node whose `bound`
/// cannot exceed it is pruned without branching. Pruning order affects which nodes get visited,
/// but never the final optimum, provided `bound` never underestimates what is reachable.
///
/// [bnb]: https://en.wikipedia.org/wiki/Branch_and_bound
pub trait BranchAndBound {
    type State: Clone;
    type Score: Copy + Ord;

    fn root(&self) -> Self::State;

    /// The objective value already guaranteed by `state`, with no further choices.
    fn score(&self, state: &Self::State) -> Self::Score;

    /// An upper estimate of the best objective reachable from `state`, assuming maximally
    /// favorable future choices. Must never underestimate, or the optimum may be pruned away.
    fn bound(&self, state: &Self::State) -> Self::Score;

    /// Pushes the legal successors of `state` in preference order, most promising first. An
    /// implementation may cut enumeration short once a dominant choice is generated, as long as
    /// some optimal completion survives the cutoff.
    fn branch(&mut self, state: &Self::State, branches: &mut Vec<Self::State>);

    fn run_internal(&mut self, state: &mut BranchAndBoundState<Self::State>) -> Self::Score {
        state.clear();

        let root: Self::State = self.root();
        let mut best: Self::Score = self.score(&root);

        state.stack.push(root);

        while let Some(current) = state.stack.pop() {
            best = best.max(self.score(&current));

            if self.bound(&current) <= best {
                continue;
            }

            self.branch(&current, &mut state.branches);

            // Reversed so that the preferred branch is popped first.
            while let Some(branch) = state.branches.pop() {
                state.stack.push(branch);
            }
        }

        best
    }

    fn run(&mut self) -> Self::Score {
        self.run_internal(&mut BranchAndBoundState::default())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::triangle_number};

    /// A miniature collector game: one fixed ore robot yields an ore per minute, and a gem robot
    /// may be built for an ore at the start of any minute. Robots built this minute don't collect
    /// this minute. Building at every opportunity is optimal, for 4 + 3 + 2 + 1 = 10 gems over 6
    /// minutes.
    #[derive(Clone)]
    struct CollectorState {
        time_left: u8,
        ore: u8,
        gem_robots: u8,
        gems: u8,
    }

    struct CollectorSearch {
        reverse_branches: bool,
    }

    impl CollectorSearch {
        fn advance(state: &CollectorState, build_gem_robot: bool) -> CollectorState {
            let mut state: CollectorState = state.clone();

            if build_gem_robot {
                state.ore -= 1_u8;
            }

            state.ore += 1_u8;
            state.gems += state.gem_robots;
            state.gem_robots += build_gem_robot as u8;
            state.time_left -= 1_u8;

            state
        }
    }

    impl BranchAndBound for CollectorSearch {
        type State = CollectorState;
        type Score = u8;

        fn root(&self) -> Self::State {
            CollectorState {
                time_left: 6_u8,
                ore: 0_u8,
                gem_robots: 0_u8,
                gems: 0_u8,
            }
        }

        fn score(&self, state: &Self::State) -> Self::Score {
            state.gems + state.gem_robots * state.time_left
        }

        fn bound(&self, state: &Self::State) -> Self::Score {
            self.score(state)
                + triangle_number((state.time_left as usize).saturating_sub(1_usize)) as u8
        }

        fn branch(&mut self, state: &Self::State, branches: &mut Vec<Self::State>) {
            if state.time_left == 0_u8 {
                return;
            }

            if state.ore >= 1_u8 {
                branches.push(Self::advance(state, true));
            }

            branches.push(Self::advance(state, false));

            if self.reverse_branches {
                branches.reverse();
            }
        }
    }

    #[test]
    fn test_collector_optimum() {
        assert_eq!(
            CollectorSearch {
                reverse_branches: false
            }
            .run(),
            10_u8
        );
    }

    #[test]
    fn test_optimum_is_enumeration_order_independent() {
        assert_eq!(
            CollectorSearch {
                reverse_branches: true
            }
            .run(),
            10_u8
        );
    }
}
