use crate::axis::Axis;

/// One concrete combination of values, one drawn from each axis, in axis
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterTuple {
    values: Vec<String>,
}

impl ParameterTuple {
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn join(&self, separator: &str) -> String {
        self.values.join(separator)
    }

    /// The argument words handed to the target program. Values are split on
    /// whitespace, the same way a shell would split the joined command
    /// line, but nothing else is interpreted.
    pub fn argv(&self) -> Vec<&str> {
        self.values
            .iter()
            .flat_map(|v| v.split_whitespace())
            .collect()
    }
}

/// Lazy Cartesian product over a list of axes.
///
/// Tuples come out in odometer order: the last axis varies fastest and the
/// first axis slowest. An empty axes list produces exactly one empty tuple.
/// The iterator is finite and can be restarted by building a new one (or
/// cloning a fresh one) over the same axes. A product too large for
/// `usize` stops after `usize::MAX` tuples.
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    axes: &'a [Axis],
    // index of the current value on each axis
    odometer: Vec<usize>,
    remaining: usize,
}

impl<'a> Combinations<'a> {
    pub fn new(axes: &'a [Axis]) -> Self {
        Self {
            axes,
            odometer: vec![0; axes.len()],
            remaining: combination_count(axes).unwrap_or(usize::MAX),
        }
    }

    fn current(&self) -> ParameterTuple {
        ParameterTuple::new(
            self.axes
                .iter()
                .zip(self.odometer.iter())
                .map(|(axis, &i)| axis.values()[i].clone())
                .collect(),
        )
    }

    fn advance(&mut self) {
        for position in (0..self.axes.len()).rev() {
            self.odometer[position] += 1;
            if self.odometer[position] < self.axes[position].len() {
                return;
            }
            self.odometer[position] = 0;
        }
    }
}

impl<'a> Iterator for Combinations<'a> {
    type Item = ParameterTuple;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let tuple = self.current();
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(tuple)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a> ExactSizeIterator for Combinations<'a> {}

/// Number of tuples in the product of the given axes, 1 for no axes, or
/// `None` when it does not fit in a `usize`.
pub fn combination_count(axes: &[Axis]) -> Option<usize> {
    axes.iter().try_fold(1usize, |count, axis| count.checked_mul(axis.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::parse_axes;
    use std::collections::HashSet;

    fn tuples(tokens: &[&str]) -> Vec<Vec<String>> {
        let axes = parse_axes(tokens).unwrap();
        Combinations::new(&axes)
            .map(|t| t.values().to_vec())
            .collect()
    }

    #[test]
    fn test_odometer_order() {
        assert_eq!(
            tuples(&["[1,2]", "[a,b]"]),
            vec![
                vec!["1", "a"],
                vec!["1", "b"],
                vec!["2", "a"],
                vec!["2", "b"]
            ]
        );
    }

    #[test]
    fn test_singleton_axis_in_the_middle() {
        assert_eq!(
            tuples(&["[1,2]", "x", "[p,q]"]),
            vec![
                vec!["1", "x", "p"],
                vec!["1", "x", "q"],
                vec!["2", "x", "p"],
                vec!["2", "x", "q"]
            ]
        );
    }

    #[test]
    fn test_empty_axes_yield_one_empty_tuple() {
        let axes: Vec<Axis> = vec![];
        let all: Vec<ParameterTuple> = Combinations::new(&axes).collect();
        assert_eq!(all.len(), 1);
        assert!(all[0].is_empty());
        assert_eq!(combination_count(&axes), Some(1));
    }

    #[test]
    fn test_count_length_and_uniqueness() {
        let axes = parse_axes(&["[1,2,3]", "[a,b]", "z", "[x,y,w,v]"]).unwrap();
        let all: Vec<ParameterTuple> = Combinations::new(&axes).collect();
        assert_eq!(all.len(), 3 * 2 * 1 * 4);
        assert_eq!(Some(all.len()), combination_count(&axes));
        assert!(all.iter().all(|t| t.len() == 4));
        let unique: HashSet<Vec<String>> =
            all.iter().map(|t| t.values().to_vec()).collect();
        assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn test_exact_size_is_reported() {
        let axes = parse_axes(&["[1,2]", "[a,b,c]"]).unwrap();
        let mut combinations = Combinations::new(&axes);
        assert_eq!(combinations.len(), 6);
        combinations.next();
        assert_eq!(combinations.len(), 5);
        assert_eq!(combinations.by_ref().count(), 5);
        assert_eq!(combinations.next(), None);
    }

    #[test]
    fn test_restart_gives_same_sequence() {
        let axes = parse_axes(&["[1,2]", "[a,b]"]).unwrap();
        let first: Vec<ParameterTuple> = Combinations::new(&axes).collect();
        let second: Vec<ParameterTuple> = Combinations::new(&axes).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_count_overflow_is_reported() {
        let tokens = vec!["[a,b]"; 64];
        let axes = parse_axes(&tokens).unwrap();
        assert_eq!(combination_count(&axes), None);
        assert_eq!(combination_count(&axes[..10]), Some(1024));
        assert_eq!(Combinations::new(&axes).len(), usize::MAX);
    }

    #[test]
    fn test_argv_splits_on_whitespace() {
        let tuple =
            ParameterTuple::new(vec!["-n 5".to_string(), "x".to_string()]);
        assert_eq!(tuple.argv(), vec!["-n", "5", "x"]);
        assert_eq!(tuple.join(","), "-n 5,x");
    }
}
