use std::{collections::HashMap, hash::Hash};

/// A result cache for one deterministic pure function, keyed by the owned argument value.
///
/// Arguments are taken by value, so a key captures the argument contents as of the call; callers
/// remain free to keep mutating whatever the key was built from. The cache grows monotonically for
/// its whole lifetime and nothing is ever evicted — callers are expected to bound the distinct
/// argument space themselves.
///
/// Unsound for functions whose output depends on anything but the key: side effects and external
/// mutable state silently poison later hits.
pub struct Memo<A, R> {
    cache: HashMap<A, R>,
}

impl<A: Eq + Hash, R: Clone> Memo<A, R> {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn get(&self, args: &A) -> Option<&R> {
        self.cache.get(args)
    }

    pub fn insert(&mut self, args: A, result: R) -> Option<R> {
        self.cache.insert(args, result)
    }

    /// The memoized call: returns the cached result for `args`, computing and storing it first if
    /// this is the first time `args` has been seen.
    pub fn get_or_insert_with<F: FnOnce() -> R>(&mut self, args: A, f: F) -> R {
        self.cache.entry(args).or_insert_with(f).clone()
    }
}

impl<A: Eq + Hash, R: Clone> Default for Memo<A, R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structurally_equal_args_compute_once() {
        let mut memo: Memo<Vec<i32>, i32> = Memo::new();
        let mut invocations: usize = 0_usize;

        // Two structurally equal but separately built argument values.
        let first_result: i32 = memo.get_or_insert_with(vec![1_i32, 2_i32, 3_i32], || {
            invocations += 1_usize;

            6_i32
        });
        let second_result: i32 = memo.get_or_insert_with((1_i32..=3_i32).collect(), || {
            invocations += 1_usize;

            unreachable!("the second call must be served from the cache");
        });

        assert_eq!(invocations, 1_usize);
        assert_eq!(first_result, second_result);
        assert_eq!(memo.len(), 1_usize);
    }

    #[test]
    fn test_distinct_args_compute_separately() {
        let mut memo: Memo<(i32, i32), i32> = Memo::new();

        assert_eq!(memo.get_or_insert_with((2_i32, 3_i32), || 5_i32), 5_i32);
        assert_eq!(memo.get_or_insert_with((3_i32, 2_i32), || 1_i32), 1_i32);
        assert_eq!(memo.len(), 2_usize);
    }
}
