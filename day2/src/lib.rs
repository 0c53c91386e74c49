use std::fmt;

use anyhow::{anyhow, Result};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{digit1, space1},
    combinator::{map, map_res, value},
    error::{FromExternalError, ParseError},
    sequence::separated_pair,
    IResult,
};
use tracing::{debug, info};
use util::{parse_line, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Forward(i64),
    Down(i64),
    Up(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Down,
    Up,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub horizontal: i64,
    pub depth: i64,
    pub aim: i64,
}

impl Position {
    pub fn product(&self) -> i128 {
        i128::from(self.horizontal) * i128::from(self.depth)
    }

    // `None` when a coordinate leaves the i64 range.
    fn apply(&mut self, cmd: Command) -> Option<()> {
        match cmd {
            Command::Forward(x) => self.horizontal = self.horizontal.checked_add(x)?,
            Command::Down(x) => self.depth = self.depth.checked_add(x)?,
            Command::Up(x) => self.depth = self.depth.checked_sub(x)?,
        }
        Some(())
    }

    fn apply_with_aim(&mut self, cmd: Command) -> Option<()> {
        match cmd {
            Command::Forward(x) => {
                self.horizontal = self.horizontal.checked_add(x)?;
                self.depth = self.depth.checked_add(self.aim.checked_mul(x)?)?;
            }
            Command::Down(x) => self.aim = self.aim.checked_add(x)?,
            Command::Up(x) => self.aim = self.aim.checked_sub(x)?,
        }
        Some(())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.horizontal, self.depth, self.product())
    }
}

fn parse_amount<'a, E>(i: Span<'a>) -> IResult<Span<'a>, i64, E>
where
    E: ParseError<Span<'a>> + FromExternalError<Span<'a>, std::num::ParseIntError>,
{
    map_res(digit1, |s: Span<'a>| s.fragment().parse::<i64>())(i)
}

fn parse_command<'a, E>(i: Span<'a>) -> IResult<Span<'a>, Command, E>
where
    E: ParseError<Span<'a>> + FromExternalError<Span<'a>, std::num::ParseIntError>,
{
    map(
        separated_pair(
            alt((
                value(Direction::Forward, tag("forward")),
                value(Direction::Down, tag("down")),
                value(Direction::Up, tag("up")),
            )),
            space1,
            parse_amount,
        ),
        |(dir, x)| match dir {
            Direction::Forward => Command::Forward(x),
            Direction::Down => Command::Down(x),
            Direction::Up => Command::Up(x),
        },
    )(i)
}

fn follow_course<F>(input: impl Iterator<Item = impl Into<String>>, mut step: F) -> Result<Position>
where
    F: FnMut(&mut Position, Command) -> Option<()>,
{
    let mut pos = Position::default();

    for (i, line) in input.enumerate() {
        let line: String = line.into();
        let cmd = parse_line(i + 1, &line, parse_command)?;
        step(&mut pos, cmd).ok_or_else(|| anyhow!("position overflows on line {}: {line:?}", i + 1))?;
        debug!(?cmd, ?pos);
    }

    info!(%pos, "course finished");

    Ok(pos)
}

pub fn final_position(input: impl Iterator<Item = impl Into<String>>) -> Result<Position> {
    follow_course(input, Position::apply)
}

pub fn final_position_with_aim(input: impl Iterator<Item = impl Into<String>>) -> Result<Position> {
    follow_course(input, Position::apply_with_aim)
}

pub fn part1(input: &str) -> Result<String> {
    Ok(final_position(input.lines())?.to_string())
}

pub fn part2(input: &str) -> Result<String> {
    Ok(final_position_with_aim(input.lines())?.to_string())
}
