use clap::{Command, arg};

use crate::common::with_input_args;

pub const ITERATE_CMD: &str = "iterate";

pub fn create_iterate_cli() -> Command {
    with_input_args(
        Command::new(ITERATE_CMD)
            .about("List every annotation in index order")
            .arg(arg!(--unambiguous "Skip annotations overlapping an already listed one")),
    )
}
