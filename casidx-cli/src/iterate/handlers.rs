use std::io::{self, BufWriter, Write};

use anyhow::Result;
use clap::ArgMatches;

use crate::common::Inputs;

pub fn run_iterate(matches: &ArgMatches) -> Result<()> {
    let inputs = Inputs::from_matches(matches)?;
    let unambiguous = matches.get_flag("unambiguous");

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    write_iterate(&inputs, unambiguous, &mut writer)?;
    writer.flush()?;

    Ok(())
}

pub fn write_iterate<W: Write>(inputs: &Inputs, unambiguous: bool, writer: &mut W) -> Result<()> {
    inputs.write_records(inputs.index.iterator(!unambiguous), writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::common::test_support::{inputs, output};

    #[rstest]
    fn test_iterate_all() {
        let inputs = inputs(false, false);
        let lines = output(|w| write_iterate(&inputs, false, w));
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "0\tParagraph\t0\t23");
        assert_eq!(lines[1], "1\tSentence\t0\t12");
        assert_eq!(lines[2], "2\tToken\t0\t3");
    }

    #[rstest]
    fn test_iterate_unambiguous() {
        let inputs = inputs(true, false);
        let lines = output(|w| write_iterate(&inputs, true, w));
        assert_eq!(lines, vec!["0\tParagraph\t0\t23\tThe cat sat. It purred."]);
    }
}
