use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use clap::{ArgMatches, Command, arg};
use log::info;

use casidx_core::models::{Annotation, AnnotationSet, FsId};
use casidx_core::utils::{get_dynamic_reader_w_stdin, parse_span, read_text};
use casidx_index::{AnnotationIndex, IndexConfig, SameSpanPolicy, Schema};

pub const CONFIG_ARG: &str = "config";
pub const ANNOTATIONS_ARG: &str = "annotations";
pub const TEXT_ARG: &str = "text";
pub const POLICY_ARG: &str = "same-span-policy";
pub const JSON_ARG: &str = "json";

///
/// Add the arguments every subcommand needs to load an index.
///
pub fn with_input_args(cmd: Command) -> Command {
    cmd.arg(
        arg!(-c --config <config> "TOML file declaring the types, their priorities and the same span policy")
            .required(true),
    )
    .arg(
        arg!(-a --annotations <annotations> "Annotation file with `type<TAB>begin<TAB>end` lines, optionally gzipped, or - for stdin")
            .required(true),
    )
    .arg(arg!(-t --text <text> "Text file the offsets point into; adds the covered text to the output").required(false))
    .arg(
        arg!(--"same-span-policy" <policy> "Override the configured same span policy (exclude, include or index-order)")
            .required(false),
    )
    .arg(arg!(--json "Write one JSON object per record"))
}

/// Everything a subcommand works on.
pub struct Inputs {
    pub schema: Schema,
    pub set: AnnotationSet,
    pub index: AnnotationIndex,
    pub text: Option<String>,
    pub json: bool,
}

impl Inputs {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let config = matches
            .get_one::<String>(CONFIG_ARG)
            .ok_or_else(|| anyhow!("A path to a config file is required."))?;
        let annotations = matches
            .get_one::<String>(ANNOTATIONS_ARG)
            .ok_or_else(|| anyhow!("A path to an annotation file is required."))?;

        let mut schema = IndexConfig::try_from(Path::new(config))
            .with_context(|| format!("Failed to read config {}", config))?
            .build()?;

        if let Some(policy) = matches.get_one::<String>(POLICY_ARG) {
            schema.options.same_span_policy =
                policy.parse::<SameSpanPolicy>().map_err(|e| anyhow!(e))?;
        }

        let reader = get_dynamic_reader_w_stdin(annotations)?;
        let set = AnnotationSet::from_reader(reader, &schema.type_system)
            .with_context(|| format!("Failed to read annotations from {}", annotations))?;

        let text = matches
            .get_one::<String>(TEXT_ARG)
            .map(|path| read_text(Path::new(path)))
            .transpose()?;

        Ok(Self::new(schema, set, text, matches.get_flag(JSON_ARG)))
    }

    pub fn new(schema: Schema, set: AnnotationSet, text: Option<String>, json: bool) -> Self {
        let mut index = schema.index();
        index.extend(set.iter().copied());
        info!("Indexed {} annotations", index.len());

        Inputs {
            schema,
            set,
            index,
            text,
            json,
        }
    }

    /// Look up a record by its position in the annotation file.
    pub fn annotation(&self, id: u32) -> Result<Annotation> {
        self.index
            .get(FsId(id))
            .copied()
            .ok_or_else(|| anyhow!("No annotation with id {} (the file has {})", id, self.set.len()))
    }

    ///
    /// Render one record: `id type begin end [text]`, or a JSON object.
    ///
    pub fn format(&self, a: &Annotation) -> Result<String> {
        let type_name = self
            .schema
            .type_system
            .name(a.type_id)
            .ok_or_else(|| anyhow!("Unknown type id {}", a.type_id))?;
        let text = self
            .text
            .as_deref()
            .map(|t| a.covered_text(t))
            .transpose()?;

        if self.json {
            let value = serde_json::json!({
                "id": a.id,
                "type": type_name,
                "begin": a.begin,
                "end": a.end,
                "text": text,
            });
            return Ok(value.to_string());
        }

        let mut line = format!("{}\t{}\t{}\t{}", a.id, type_name, a.begin, a.end);
        if let Some(text) = text {
            line.push('\t');
            line.push_str(&text.replace(['\t', '\n'], " "));
        }
        Ok(line)
    }

    pub fn write_records<'a, W: Write>(
        &self,
        records: impl Iterator<Item = &'a Annotation>,
        writer: &mut W,
    ) -> Result<()> {
        for a in records {
            writeln!(writer, "{}", self.format(a)?)?;
        }
        Ok(())
    }
}

/// Parse a `begin:end` argument.
pub fn span_arg(value: &str) -> Result<(u32, u32)> {
    let (begin, end) =
        parse_span(value).ok_or_else(|| anyhow!("Invalid span {}: expected begin:end", value))?;
    if begin > end {
        return Err(anyhow!("Invalid span {}: begin is greater than end", value));
    }
    Ok((begin, end))
}
