use clap::{Command, arg, value_parser};

use crate::common::with_input_args;

pub const SUBITERATE_CMD: &str = "subiterate";

pub fn create_subiterate_cli() -> Command {
    with_input_args(
        Command::new(SUBITERATE_CMD)
            .about("List the annotations inside a container annotation or span")
            .arg(
                arg!(--container <id> "Id of the container annotation (its position in the annotation file)")
                    .required(false)
                    .value_parser(value_parser!(u32))
                    .conflicts_with("span"),
            )
            .arg(arg!(--span <span> "Container offsets as begin:end").required(false))
            .group(
                clap::ArgGroup::new("bounds")
                    .args(["container", "span"])
                    .required(true),
            )
            .arg(arg!(--relaxed "Only require the begin offset to fall within the container"))
            .arg(arg!(--unambiguous "Skip annotations overlapping an already listed one")),
    )
}
