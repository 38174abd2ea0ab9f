use std::io::{self, BufWriter, Write};

use anyhow::{Result, anyhow};
use clap::ArgMatches;

use crate::common::{Inputs, span_arg};
use crate::select::cli::*;

pub fn run_select(matches: &ArgMatches) -> Result<()> {
    let inputs = Inputs::from_matches(matches)?;
    let relation = matches
        .get_one::<String>("relation")
        .ok_or_else(|| anyhow!("A relation is required."))?;
    let span = matches
        .get_one::<String>("span")
        .ok_or_else(|| anyhow!("A span is required."))?;
    let span = span_arg(span)?;

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    write_select(&inputs, relation, span, &mut writer)?;
    writer.flush()?;

    Ok(())
}

pub fn write_select<W: Write>(
    inputs: &Inputs,
    relation: &str,
    span: (u32, u32),
    writer: &mut W,
) -> Result<()> {
    let index = &inputs.index;
    match relation {
        AT => inputs.write_records(index.at(span), writer),
        COVERED_BY => inputs.write_records(index.covered_by(span), writer),
        COVERING => inputs.write_records(index.covering(span), writer),
        OVERLAPPING => inputs.write_records(index.overlapping(span), writer),
        FOLLOWING => inputs.write_records(index.following(span), writer),
        PRECEDING => inputs.write_records(index.preceding(span), writer),
        _ => Err(anyhow!("Invalid relation: {}", relation)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::common::test_support::{inputs, output};

    #[rstest]
    #[case(AT, (13, 15), vec![7])]
    #[case(COVERED_BY, (13, 23), vec![6, 7, 8, 9])]
    #[case(COVERING, (4, 7), vec![0, 1, 3])]
    #[case(OVERLAPPING, (10, 14), vec![0, 1, 4, 5, 6, 7])]
    #[case(FOLLOWING, (16, 22), vec![9])]
    #[case(PRECEDING, (8, 11), vec![2, 3])]
    fn test_relations(#[case] relation: &str, #[case] span: (u32, u32), #[case] expected: Vec<u32>) {
        let inputs = inputs(false, false);
        let lines = output(|w| write_select(&inputs, relation, span, w));
        let ids: Vec<u32> = lines
            .iter()
            .map(|l| l.split('\t').next().unwrap().parse().unwrap())
            .collect();
        assert_eq!(ids, expected);
    }

    #[rstest]
    fn test_invalid_relation() {
        let inputs = inputs(false, false);
        let mut buf = Vec::new();
        assert_eq!(write_select(&inputs, "near", (0, 1), &mut buf).is_err(), true);
    }
}
