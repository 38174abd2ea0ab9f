use std::io::{self, BufWriter, Write};

use anyhow::Result;
use clap::ArgMatches;
use log::debug;

use crate::common::{Inputs, span_arg};

/// What bounds the walk.
pub enum Container {
    Annotation(u32),
    Span(u32, u32),
}

pub fn run_subiterate(matches: &ArgMatches) -> Result<()> {
    let inputs = Inputs::from_matches(matches)?;

    let container = match matches.get_one::<u32>("container") {
        Some(id) => Container::Annotation(*id),
        None => {
            let span = matches
                .get_one::<String>("span")
                .ok_or_else(|| anyhow::anyhow!("Either --container or --span is required."))?;
            let (begin, end) = span_arg(span)?;
            Container::Span(begin, end)
        }
    };
    let strict = !matches.get_flag("relaxed");
    let ambiguous = !matches.get_flag("unambiguous");

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    write_subiterate(&inputs, &container, ambiguous, strict, &mut writer)?;
    writer.flush()?;

    Ok(())
}

pub fn write_subiterate<W: Write>(
    inputs: &Inputs,
    container: &Container,
    ambiguous: bool,
    strict: bool,
    writer: &mut W,
) -> Result<()> {
    debug!("Subiterating with ambiguous={} strict={}", ambiguous, strict);
    match container {
        Container::Annotation(id) => {
            let annotation = inputs.annotation(*id)?;
            let records = inputs.index.subiterator(&annotation, ambiguous, strict);
            inputs.write_records(records, writer)
        }
        Container::Span(begin, end) => {
            let records = inputs
                .index
                .subiterator_span(*begin, *end, ambiguous, strict);
            inputs.write_records(records, writer)
        }
    }
}
