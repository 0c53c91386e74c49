use std::{
    fs,
    num::ParseIntError,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use miette::GraphicalReportHandler;
use nom::{
    character::complete::{char, digit1},
    combinator::{map_res, opt, recognize},
    error::{FromExternalError, ParseError},
    sequence::tuple,
    IResult,
};
use nom_locate::LocatedSpan;
use nom_supreme::{
    error::{ErrorTree, GenericErrorTree},
    final_parser::final_parser,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Thanks to FasterThanLime! https://fasterthanli.me/series/advent-of-code-2022/part-11

pub type Span<'a> = LocatedSpan<&'a str>;

pub const DEFAULT_INPUT: &str = "input";

#[derive(thiserror::Error, Debug, miette::Diagnostic)]
#[error("bad input on line {line_no}: {src:?}")]
pub struct BadInput {
    #[source_code]
    src: String,

    #[label("{kind}")]
    bad_bit: miette::SourceSpan,

    kind: String,

    line_no: usize,
}

impl BadInput {
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    pub fn offset(&self) -> usize {
        self.bad_bit.offset()
    }

    pub fn render(&self) -> String {
        let mut s = String::new();
        match GraphicalReportHandler::new().render_report(&mut s, self) {
            Ok(()) => s,
            Err(_) => self.to_string(),
        }
    }
}

pub fn parse_number<'a, E>(i: Span<'a>) -> IResult<Span<'a>, i64, E>
where
    E: ParseError<Span<'a>> + FromExternalError<Span<'a>, ParseIntError>,
{
    map_res(recognize(tuple((opt(char('-')), digit1))), |i: Span<'a>| {
        i.fragment().parse::<i64>()
    })(i)
}

// Alternatives report the branch that got furthest.
fn locate(e: &ErrorTree<Span>) -> (usize, String) {
    match e {
        GenericErrorTree::Base { location, kind } => (location.location_offset(), kind.to_string()),
        GenericErrorTree::Stack { base, .. } => locate(base),
        GenericErrorTree::Alt(alts) => alts
            .iter()
            .map(locate)
            .max_by_key(|(offset, _)| *offset)
            .unwrap_or_else(|| (0, "no alternative matched".to_string())),
    }
}

// `line_no` is 1-based.
pub fn parse_line<'a, T, F>(line_no: usize, line: &'a str, parse_fun: F) -> Result<T, BadInput>
where
    F: FnMut(Span<'a>) -> IResult<Span<'a>, T, ErrorTree<Span<'a>>>,
{
    let line_span = Span::new(line);
    let parsed: Result<_, ErrorTree<Span>> = final_parser(parse_fun)(line_span);
    parsed.map_err(|e| {
        let (offset, kind) = locate(&e);
        BadInput {
            src: line.to_string(),
            bad_bit: miette::SourceSpan::new(offset.into(), 0.into()),
            kind,
            line_no,
        }
    })
}

pub fn input_path() -> PathBuf {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT))
}

pub fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read input file {}", path.display()))
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second call keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}

pub fn report(err: &anyhow::Error) {
    match err.downcast_ref::<BadInput>() {
        Some(bad) => eprintln!("{}", bad.render()),
        None => eprintln!("Error: {err:?}"),
    }
}

pub fn run_at<F>(path: &Path, solve: F) -> u8
where
    F: FnOnce(&str) -> Result<String>,
{
    tracing::debug!(path = %path.display(), "reading input");

    match read_input(path).and_then(|input| solve(&input)) {
        Ok(answer) => {
            println!("{answer}");
            0
        }
        Err(e) => {
            report(&e);
            1
        }
    }
}

pub fn run<F>(solve: F) -> ExitCode
where
    F: FnOnce(&str) -> Result<String>,
{
    init_tracing();
    ExitCode::from(run_at(&input_path(), solve))
}
