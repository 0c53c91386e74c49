use std::process::ExitCode;

fn main() -> ExitCode {
    util::run(day2::part2)
}
