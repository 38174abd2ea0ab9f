use clap::{Command, arg, value_parser};

use crate::common::with_input_args;

pub const TREE_CMD: &str = "tree";

pub fn create_tree_cli() -> Command {
    with_input_args(
        Command::new(TREE_CMD)
            .about("Print the containment tree under an annotation")
            .arg(
                arg!(--container <id> "Id of the root annotation (its position in the annotation file)")
                    .required(true)
                    .value_parser(value_parser!(u32)),
            ),
    )
}
