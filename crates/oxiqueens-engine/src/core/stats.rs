use serde::{Deserialize, Serialize};

/// Best, worst and average fitness of a group of boards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FitnessStats {
    /// The highest fitness in the group.
    pub best: u32,
    /// The lowest fitness in the group.
    pub worst: u32,
    /// The arithmetic mean of the group's fitness values.
    pub average: f64,
}

impl FitnessStats {
    /// Computes fitness statistics from a sequence of fitness values.
    ///
    /// Returns `None` if the sequence is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use oxiqueens_engine::FitnessStats;
    /// let stats = FitnessStats::new([20, 28, 24]).unwrap();
    /// assert_eq!(stats.best, 28);
    /// assert_eq!(stats.worst, 20);
    /// assert_eq!(stats.average, 24.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut values = values.into_iter();
        let first = values.next()?;
        let (best, worst, sum, count) = values.fold(
            (first, first, u64::from(first), 1usize),
            |(best, worst, sum, count), value| {
                (
                    best.max(value),
                    worst.min(value),
                    sum + u64::from(value),
                    count + 1,
                )
            },
        );
        Some(Self {
            best,
            worst,
            average: sum as f64 / count as f64,
        })
    }
}
