use std::process::ExitCode;

fn main() -> ExitCode {
    util::run(day1::part2)
}
