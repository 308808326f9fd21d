use {
    crate::*,
    serde_json::{Number, Value},
    std::{cmp::Ordering, slice::from_ref},
};

/// A packet: an integer or an arbitrarily nested list of packets, exactly the shape of a JSON
/// array of non-negative integers.
#[derive(Clone, Debug, Eq, PartialEq)]
enum Packet {
    Integer(u64),
    List(Vec<Packet>),
}

impl Packet {
    fn divider(value: u64) -> Self {
        Self::List(vec![Self::List(vec![Self::Integer(value)])])
    }
}

#[allow(dead_code)]
#[derive(Debug)]
pub enum PacketParseError {
    FailedToDeserialize(serde_json::Error),
    NonIntegerNumber(Number),
    UnexpectedValue(Value),
}

impl TryFrom<&Value> for Packet {
    type Error = PacketParseError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        use PacketParseError::*;

        match value {
            Value::Number(number) => number
                .as_u64()
                .map(Self::Integer)
                .ok_or_else(|| NonIntegerNumber(number.clone())),
            Value::Array(values) => values
                .iter()
                .map(Self::try_from)
                .collect::<Result<Vec<Self>, Self::Error>>()
                .map(Self::List),
            _ => Err(UnexpectedValue(value.clone())),
        }
    }
}

impl TryFrom<&str> for Packet {
    type Error = PacketParseError;

    fn try_from(packet_str: &str) -> Result<Self, Self::Error> {
        serde_json::from_str::<Value>(packet_str)
            .map_err(PacketParseError::FailedToDeserialize)?
            .try_into()
    }
}

impl TryFrom<Value> for Packet {
    type Error = PacketParseError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        (&value).try_into()
    }
}

impl Ord for Packet {
    fn cmp(&self, other: &Self) -> Ordering {
        use Packet::*;

        match (self, other) {
            (Integer(left), Integer(right)) => left.cmp(right),
            (List(left), List(right)) => left.cmp(right),

            // A lone integer compares as a one-element list.
            (Integer(_), List(right)) => from_ref(self).cmp(&right[..]),
            (List(left), Integer(_)) => left[..].cmp(from_ref(other)),
        }
    }
}

impl PartialOrd for Packet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution(Vec<[Packet; 2_usize]>);

impl Solution {
    fn ordered_pair_index_sum(&self) -> usize {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(index, [left, right])| (left < right).then_some(index + 1_usize))
            .sum()
    }

    /// Sorts every packet together with the two divider packets; the decoder key is the product
    /// of the dividers' 1-based sorted positions.
    fn decoder_key(&self) -> usize {
        let dividers: [Packet; 2_usize] = [Packet::divider(2_u64), Packet::divider(6_u64)];

        let mut packets: Vec<&Packet> = self.0.iter().flatten().chain(dividers.iter()).collect();

        packets.sort_unstable();

        dividers
            .iter()
            .map(|divider: &Packet| {
                packets
                    .iter()
                    .position(|packet: &&Packet| *packet == divider)
                    .unwrap()
                    + 1_usize
            })
            .product()
    }
}

impl RunParts for Solution {
    fn p1_internal(&mut self, _args: &PartArgs) {
        dbg!(self.ordered_pair_index_sum());
    }

    fn p2_internal(&mut self, _args: &PartArgs) {
        dbg!(self.decoder_key());
    }
}

impl<'i> TryFrom<&'i str> for Solution {
    type Error = PacketParseError;

    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        input
            .split("\n\n")
            .map(|pair_str: &str| -> Result<[Packet; 2_usize], PacketParseError> {
                let mut line_iter = pair_str.lines();
                let left: Packet = line_iter.next().unwrap_or_default().try_into()?;
                let right: Packet = line_iter.next().unwrap_or_default().try_into()?;

                Ok([left, right])
            })
            .collect::<Result<Vec<[Packet; 2_usize]>, Self::Error>>()
            .map(Self)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::sync::OnceLock};

    const PACKET_PAIRS_STR: &str = concat!(
        "[1,1,3,1,1]\n",
        "[1,1,5,1,1]\n",
        "\n",
        "[[1],[2,3,4]]\n",
        "[[1],4]\n",
        "\n",
        "[9]\n",
        "[[8,7,6]]\n",
        "\n",
        "[[4,4],4,4]\n",
        "[[4,4],4,4,4]\n",
        "\n",
        "[7,7,7,7]\n",
        "[7,7,7]\n",
        "\n",
        "[]\n",
        "[3]\n",
        "\n",
        "[[[]]]\n",
        "[[]]\n",
        "\n",
        "[1,[2,[3,[4,[5,6,7]]]],8,9]\n",
        "[1,[2,[3,[4,[5,6,0]]]],8,9]",
    );

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| Solution::try_from(PACKET_PAIRS_STR).unwrap())
    }

    #[test]
    fn test_packet_ordering() {
        use Packet::{Integer as I, List as L};

        assert!(L(vec![I(1_u64)]) < L(vec![I(2_u64)]));
        assert!(I(9_u64) > L(vec![I(8_u64), I(7_u64), I(6_u64)]));
        assert!(L(vec![]) < I(3_u64));
        assert_eq!(
            L(vec![I(7_u64)]).cmp(&L(vec![I(7_u64), I(7_u64)])),
            Ordering::Less
        );
    }

    #[test]
    fn test_ordered_pair_index_sum() {
        assert_eq!(solution().ordered_pair_index_sum(), 13_usize);
    }

    #[test]
    fn test_decoder_key() {
        assert_eq!(solution().decoder_key(), 140_usize);
    }
}
