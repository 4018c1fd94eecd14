//! A roller that replays fixed values.

use std::collections::VecDeque;

use super::Roller;

/// Replays queued values in order.
///
/// Each queued value is clamped into the requested range. Once the queue is
/// empty every roll returns the low end of its range, which makes every
/// [`Roller::chance`] succeed.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRoller {
    values: VecDeque<i32>,
}

impl ScriptedRoller {
    /// A roller that replays `values`.
    pub fn new(values: impl IntoIterator<Item = i32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Queue more values.
    pub fn push(&mut self, value: i32) {
        self.values.push_back(value);
    }

    /// Values not yet consumed.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl Roller for ScriptedRoller {
    fn range(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        match self.values.pop_front() {
            Some(value) => value.clamp(low, high - 1),
            None => low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_in_order() {
        let mut roller = ScriptedRoller::new([3, 70, 12]);
        assert_eq!(roller.range(0, 10), 3);
        assert_eq!(roller.percent(), 70);
        assert_eq!(roller.range(10, 20), 12);
        assert_eq!(roller.remaining(), 0);
    }

    #[test]
    fn clamps_into_range() {
        let mut roller = ScriptedRoller::new([500, -4]);
        assert_eq!(roller.range(5, 10), 9);
        assert_eq!(roller.range(5, 10), 5);
    }

    #[test]
    fn exhausted_returns_low() {
        let mut roller = ScriptedRoller::default();
        assert_eq!(roller.range(8, 13), 8);
        assert!(roller.chance(1));
    }

    #[test]
    fn chance_compares_against_percent() {
        let mut roller = ScriptedRoller::new([49, 50]);
        assert!(roller.chance(50));
        assert!(!roller.chance(50));
    }
}
