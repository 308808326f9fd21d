use {
    crate::*,
    nom::{
        bytes::complete::tag,
        character::complete::line_ending,
        combinator::map,
        error::Error,
        multi::separated_list1,
        sequence::separated_pair,
        Err, IResult,
    },
    std::ops::Range,
};

/// A pair of section ranges, one per elf, stored half-open.
#[derive(Clone, Debug, PartialEq)]
struct AssignmentPair {
    first: Range<u32>,
    second: Range<u32>,
}

impl AssignmentPair {
    fn parse_range(input: &str) -> IResult<&str, Range<u32>> {
        map(
            separated_pair(parse_integer::<u32>, tag("-"), parse_integer::<u32>),
            |(start, end)| start..end + 1_u32,
        )(input)
    }

    /// True iff one range fully contains the other.
    fn is_fully_contained(&self) -> bool {
        match try_intersection(self.first.clone(), self.second.clone()) {
            Some(intersection) => intersection == self.first || intersection == self.second,
            None => false,
        }
    }

    fn overlaps(&self) -> bool {
        try_non_empty_intersection(self.first.clone(), self.second.clone()).is_some()
    }
}

impl Parse for AssignmentPair {
    fn parse(input: &str) -> IResult<&str, Self> {
        map(
            separated_pair(Self::parse_range, tag(","), Self::parse_range),
            |(first, second)| Self { first, second },
        )(input)
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution(Vec<AssignmentPair>);

impl Solution {
    fn fully_contained_pair_count(&self) -> usize {
        self.0
            .iter()
            .filter(|assignment_pair| assignment_pair.is_fully_contained())
            .count()
    }

    fn overlapping_pair_count(&self) -> usize {
        self.0
            .iter()
            .filter(|assignment_pair| assignment_pair.overlaps())
            .count()
    }
}

impl RunParts for Solution {
    fn p1_internal(&mut self, _args: &PartArgs) {
        dbg!(self.fully_contained_pair_count());
    }

    fn p2_internal(&mut self, _args: &PartArgs) {
        dbg!(self.overlapping_pair_count());
    }
}

impl<'i> TryFrom<&'i str> for Solution {
    type Error = Err<Error<&'i str>>;

    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        separated_list1(line_ending, AssignmentPair::parse)(input)
            .map(|(_, assignment_pairs)| Self(assignment_pairs))
    }
}
