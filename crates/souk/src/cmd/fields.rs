use anyhow::{Context, Result};

use souk_form::{FormSession, build_render_payload, render_json_ui, render_text};

use crate::cmd::i18n::tr_key;
use crate::cmd::{SourceArgs, block_on, language};

#[derive(clap::Args, Debug)]
pub struct FieldsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Category slug, e.g. cars-for-sale
    #[arg(value_name = "SLUG")]
    pub slug: String,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: FieldsArgs) -> Result<()> {
    let source = args.source.connect()?;
    let mut session = FormSession::new();
    block_on(session.load_category(source.as_ref(), &args.slug))?
        .with_context(|| tr_key("cli.post.failed"))?;

    if session.visible_fields().is_empty() {
        println!("{}", tr_key("cli.fields.empty"));
        return Ok(());
    }

    let payload = build_render_payload(&session, language());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&render_json_ui(&payload))?);
    } else {
        println!("{}", render_text(&payload));
    }
    Ok(())
}
