use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use souk_catalog::{FieldWidget, StorageShape, classify_field};
use souk_form::{
    FormSession, build_render_payload, listing_schema, render_json_ui, render_text,
};

use crate::cmd::i18n::{tr_key, tr_with};
use crate::cmd::{SourceArgs, block_on, language};

#[derive(clap::Args, Debug)]
pub struct PostArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Category slug to post under
    #[arg(value_name = "SLUG")]
    pub slug: String,

    /// Answer one field, as attribute=value; repeatable
    #[arg(long = "answer", value_name = "ATTR=VALUE")]
    pub answers: Vec<String>,

    /// Read answers from a JSON object file
    #[arg(long = "answers-file", value_name = "FILE")]
    pub answers_file: Option<PathBuf>,

    /// Print the listing JSON Schema instead of the form
    #[arg(long)]
    pub schema: bool,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PostArgs) -> Result<()> {
    if args.slug.is_empty() {
        println!("{}", tr_key("cli.post.select_category"));
        return Ok(());
    }

    let source = args.source.connect()?;
    let mut session = FormSession::new();
    block_on(session.load_category(source.as_ref(), &args.slug))?
        .with_context(|| tr_key("cli.post.failed"))?;

    let ordered: Vec<(String, FieldWidget)> = session
        .visible_fields()
        .into_iter()
        .filter_map(|field| classify_field(field).map(|widget| (field.attribute.clone(), widget)))
        .collect();

    let mut answers = collect_answers(&args, &ordered)?;
    // Answers land in display order so parents are in place before their
    // dependents; anything left over goes in afterwards.
    for (attribute, _) in &ordered {
        if let Some(value) = answers.remove(attribute) {
            session.set_value(attribute, value);
        }
    }
    for (attribute, value) in answers {
        session.set_value(&attribute, value);
    }

    if args.schema {
        let schema = listing_schema::generate(&session);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    let payload = build_render_payload(&session, language());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&render_json_ui(&payload))?);
        return Ok(());
    }

    println!("{}", render_text(&payload));
    let hints: Vec<(&str, &str)> = payload
        .fields
        .iter()
        .filter_map(|field| match field.attribute.as_str() {
            "title" => Some(("title", "cli.post.hint.title")),
            "description" => Some(("description", "cli.post.hint.description")),
            _ => None,
        })
        .collect();
    if !hints.is_empty() {
        println!();
        println!("{}:", tr_key("cli.post.tips"));
        for (attribute, key) in hints {
            println!("  {attribute}: {}", tr_key(key));
        }
    }
    Ok(())
}

fn collect_answers(
    args: &PostArgs,
    ordered: &[(String, FieldWidget)],
) -> Result<BTreeMap<String, Value>> {
    let mut answers = BTreeMap::new();
    if let Some(path) = &args.answers_file {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read answers file {}", path.display()))?;
        let object: BTreeMap<String, Value> = serde_json::from_str(&raw)
            .with_context(|| format!("parse answers file {}", path.display()))?;
        answers.extend(object);
    }
    for pair in &args.answers {
        let Some((attribute, value)) = pair.split_once('=') else {
            bail!("{}", tr_with("cli.post.bad_answer", "answer", pair));
        };
        let widget = ordered
            .iter()
            .find(|(candidate, _)| candidate.as_str() == attribute)
            .map(|(_, widget)| *widget);
        answers.insert(attribute.to_string(), coerce_answer(widget, value));
    }
    Ok(answers)
}

/// Shapes a raw command-line answer for its target widget: lists split on
/// commas, numeric inputs parse when they can, everything else stays text.
fn coerce_answer(widget: Option<FieldWidget>, raw: &str) -> Value {
    match widget.map(|widget| widget.storage()) {
        Some(StorageShape::ChoiceValues) => Value::Array(
            raw.split(',')
                .map(|item| Value::String(item.trim().to_string()))
                .collect(),
        ),
        Some(StorageShape::NumericText) => serde_json::from_str(raw)
            .ok()
            .filter(Value::is_number)
            .unwrap_or_else(|| Value::String(raw.to_string())),
        _ => Value::String(raw.to_string()),
    }
}
