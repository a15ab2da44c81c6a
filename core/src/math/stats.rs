use crate::prelude::WINDOW_LEN;

pub struct StatsHelper;

impl StatsHelper {
    /// Median of the last three values of `values`, or 0 when fewer are available.
    pub fn median_of_last_three(values: &[i32]) -> i32 {
        if values.len() < WINDOW_LEN {
            return 0;
        }
        let mut sorted = [0i32; WINDOW_LEN];
        sorted.copy_from_slice(&values[values.len() - WINDOW_LEN..]);
        sorted.sort_unstable();
        sorted[WINDOW_LEN / 2]
    }

    /// Absolute distance between two readings, widened so extreme values cannot overflow.
    pub fn deviation(reading: i32, median: i32) -> i64 {
        (i64::from(reading) - i64::from(median)).abs()
    }
}
