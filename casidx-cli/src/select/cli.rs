use clap::{Arg, Command, arg};

use crate::common::with_input_args;

pub const SELECT_CMD: &str = "select";

pub const AT: &str = "at";
pub const COVERED_BY: &str = "covered-by";
pub const COVERING: &str = "covering";
pub const OVERLAPPING: &str = "overlapping";
pub const FOLLOWING: &str = "following";
pub const PRECEDING: &str = "preceding";

pub fn create_select_cli() -> Command {
    with_input_args(
        Command::new(SELECT_CMD)
            .about("List the annotations in a positional relation to a span")
            .arg(
                Arg::new("relation")
                    .required(true)
                    .value_parser([AT, COVERED_BY, COVERING, OVERLAPPING, FOLLOWING, PRECEDING])
                    .help("How the annotations relate to the span"),
            )
            .arg(arg!(--span <span> "Query offsets as begin:end").required(true)),
    )
}
