use std::collections::VecDeque;

use anyhow::{bail, Result};
use tracing::{debug, info};
use util::{parse_line, parse_number};

pub const SMOOTHING_WINDOW: usize = 3;

/// Counts how often the sum of the last `window` depths is larger than the
/// sum one line earlier. Comparisons start once the window is full.
pub fn count_increases_over(
    input: impl Iterator<Item = impl Into<String>>,
    window: usize,
) -> Result<usize> {
    if window == 0 {
        bail!("window size must be at least 1");
    }

    let mut values = VecDeque::with_capacity(window + 1);
    let mut sum = 0_i128;
    let mut prev_sum = None;
    let mut increases = 0;

    for (i, line) in input.enumerate() {
        let line: String = line.into();
        let depth = parse_line(i + 1, &line, parse_number)?;

        if values.len() == window {
            sum -= i128::from(values.pop_front().unwrap_or_default());
        }
        values.push_back(depth);
        sum += i128::from(depth);
        if values.len() < window {
            continue;
        }

        if let Some(prev) = prev_sum {
            if sum > prev {
                increases += 1;
            }
        }
        debug!(line = i + 1, sum, increases);
        prev_sum = Some(sum);
    }

    info!(window, increases, "done");

    Ok(increases)
}

pub fn count_increases(input: impl Iterator<Item = impl Into<String>>) -> Result<usize> {
    count_increases_over(input, 1)
}

pub fn count_window_increases(input: impl Iterator<Item = impl Into<String>>) -> Result<usize> {
    count_increases_over(input, SMOOTHING_WINDOW)
}

pub fn part1(input: &str) -> Result<String> {
    let increases = count_increases(input.lines())?;
    Ok(format!("Increases: {increases}"))
}

pub fn part2(input: &str) -> Result<String> {
    let increases = count_window_increases(input.lines())?;
    Ok(format!("Increases: {increases}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use util::BadInput;

    const TEST_INPUT: &str = include_str!("../data/test_input");

    #[test]
    fn example_raw() {
        let res = count_increases(TEST_INPUT.lines());
        assert!(res.is_ok());
        assert_eq!(res.unwrap(), 7);
    }

    #[test]
    fn example_windowed() {
        let res = count_window_increases(TEST_INPUT.lines());
        assert!(res.is_ok());
        assert_eq!(res.unwrap(), 5);
    }

    #[rstest]
    #[case("1\n2\n3", 2)]
    #[case("3\n2\n1", 0)]
    #[case("", 0)]
    #[case("5", 0)]
    #[case("5\n5\n5", 0)]
    #[case("-3\n-1\n-2\n0", 2)]
    #[case("9223372036854775807\n1", 0)]
    #[case("-9223372036854775808\n9223372036854775807", 1)]
    fn raw(#[case] input: &str, #[case] expected: usize) {
        let res = count_increases(input.lines());
        assert!(res.is_ok());
        assert_eq!(res.unwrap(), expected);
    }

    #[rstest]
    #[case("1\n2\n3\n4\n5", 2)]
    #[case("", 0)]
    #[case("1\n2\n3", 0)]
    #[case("9\n1\n1\n10", 1)]
    #[case("3\n2\n1\n0", 0)]
    #[case("9223372036854775807\n9223372036854775807\n9223372036854775807\n9223372036854775807", 0)]
    #[case("9223372036854775806\n9223372036854775807\n9223372036854775807\n9223372036854775807", 1)]
    fn windowed(#[case] input: &str, #[case] expected: usize) {
        let res = count_window_increases(input.lines());
        assert!(res.is_ok());
        assert_eq!(res.unwrap(), expected);
    }

    #[test]
    fn answer_lines() {
        let res = part1(TEST_INPUT);
        assert!(res.is_ok());
        assert_eq!(res.unwrap(), "Increases: 7");

        let res = part2(TEST_INPUT);
        assert!(res.is_ok());
        assert_eq!(res.unwrap(), "Increases: 5");
    }

    #[test]
    fn zero_window() {
        assert!(count_increases_over(TEST_INPUT.lines(), 0).is_err());
    }

    #[test]
    fn window_larger_than_input() {
        let res = count_increases_over(TEST_INPUT.lines(), 11);
        assert!(res.is_ok());
        assert_eq!(res.unwrap(), 0);
    }

    #[test]
    fn bad_line_is_named() {
        let err = count_increases("1\n2\nthree\n4".lines()).unwrap_err();
        let bad = err.downcast_ref::<BadInput>();
        assert!(bad.is_some());
        assert_eq!(bad.unwrap().line_no(), 3);
    }
}
