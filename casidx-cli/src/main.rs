mod common;
mod iterate;
mod select;
mod subiterate;
mod tree;

use anyhow::Result;
use clap::Command;
use tracing_subscriber::EnvFilter;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "casidx";
    pub const DEFAULT_LOG_DIRECTIVE: &str = "casidx=info";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("casidx developers")
        .about("Query annotations over a text buffer through an ordered annotation index.")
        .subcommand_required(true)
        .subcommand(iterate::cli::create_iterate_cli())
        .subcommand(subiterate::cli::create_subiterate_cli())
        .subcommand(tree::cli::create_tree_cli())
        .subcommand(select::cli::create_select_cli())
}

fn init_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(consts::DEFAULT_LOG_DIRECTIVE.parse()?),
        )
        .init();
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // ITERATE
        //
        Some((iterate::cli::ITERATE_CMD, matches)) => {
            iterate::handlers::run_iterate(matches)?;
        }

        //
        // SUBITERATE
        //
        Some((subiterate::cli::SUBITERATE_CMD, matches)) => {
            subiterate::handlers::run_subiterate(matches)?;
        }

        //
        // TREE
        //
        Some((tree::cli::TREE_CMD, matches)) => {
            tree::handlers::run_tree(matches)?;
        }

        //
        // SELECT
        //
        Some((select::cli::SELECT_CMD, matches)) => {
            select::handlers::run_select(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    fn test_parser_is_consistent() {
        build_parser().debug_assert();
    }
}
