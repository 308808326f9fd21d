use {crate::*, derive_deref::Deref, std::ops::BitAnd};

/// A set of item types, one bit per priority.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct ItemSet(u64);

impl ItemSet {
    const MIN_PRIORITY: u32 = 1_u32;
    const MAX_PRIORITY: u32 = 52_u32;

    fn try_priority(item: char) -> Option<u32> {
        if item.is_ascii_lowercase() {
            Some((item as u8 - LOWERCASE_A_OFFSET) as u32 + 1_u32)
        } else if item.is_ascii_uppercase() {
            Some((item as u8 - UPPERCASE_A_OFFSET) as u32 + 27_u32)
        } else {
            None
        }
    }

    fn try_from_items(items: &[u8]) -> Result<Self, char> {
        let mut item_set: Self = Self::default();

        for item in items.iter().copied() {
            item_set.0 |= 1_u64 << Self::try_priority(item as char).ok_or(item as char)?;
        }

        Ok(item_set)
    }

    fn priority_sum(self) -> u32 {
        (Self::MIN_PRIORITY..=Self::MAX_PRIORITY)
            .filter(|priority| self.0 & (1_u64 << priority) != 0_u64)
            .sum()
    }
}

impl BitAnd for ItemSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rucksack {
    compartments: [ItemSet; 2_usize],
}

impl Rucksack {
    fn all_items(self) -> ItemSet {
        let [first, second]: [ItemSet; 2_usize] = self.compartments;

        ItemSet(first.0 | second.0)
    }

    fn shared_item_priority(self) -> u32 {
        let [first, second]: [ItemSet; 2_usize] = self.compartments;

        (first & second).priority_sum()
    }
}

#[derive(Debug, PartialEq)]
pub enum RucksackParseError<'s> {
    OddItemCount(&'s str),
    NonAlphabeticItem(char),
}

impl<'s> TryFrom<&'s str> for Rucksack {
    type Error = RucksackParseError<'s>;

    fn try_from(rucksack_str: &'s str) -> Result<Self, Self::Error> {
        use RucksackParseError::*;

        let items: &[u8] = rucksack_str.as_bytes();

        if items.len() % 2_usize != 0_usize {
            return Err(OddItemCount(rucksack_str));
        }

        let (first_items, second_items): (&[u8], &[u8]) = items.split_at(items.len() / 2_usize);

        Ok(Self {
            compartments: [
                ItemSet::try_from_items(first_items).map_err(NonAlphabeticItem)?,
                ItemSet::try_from_items(second_items).map_err(NonAlphabeticItem)?,
            ],
        })
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
#[derive(Deref)]
pub struct Solution(Vec<Rucksack>);

impl Solution {
    const GROUP_LEN: usize = 3_usize;

    fn shared_item_priority_sum(&self) -> u32 {
        self.iter()
            .copied()
            .map(Rucksack::shared_item_priority)
            .sum()
    }

    fn badge_priority_sum(&self) -> u32 {
        self.chunks_exact(Self::GROUP_LEN)
            .map(|group: &[Rucksack]| {
                group
                    .iter()
                    .copied()
                    .map(Rucksack::all_items)
                    .reduce(|badge, all_items| badge & all_items)
                    .unwrap_or_default()
                    .priority_sum()
            })
            .sum()
    }
}

impl RunParts for Solution {
    fn p1_internal(&mut self, _args: &PartArgs) {
        dbg!(self.shared_item_priority_sum());
    }

    fn p2_internal(&mut self, _args: &PartArgs) {
        dbg!(self.badge_priority_sum());
    }
}

impl<'i> TryFrom<&'i str> for Solution {
    type Error = RucksackParseError<'i>;

    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        input
            .lines()
            .map(Rucksack::try_from)
            .collect::<Result<Vec<Rucksack>, Self::Error>>()
            .map(Self)
    }
}
