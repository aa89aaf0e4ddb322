use anyhow::{Result, bail};
use serde_json::json;

use souk_catalog::CategoryTree;

use crate::cmd::i18n::tr_with;
use crate::cmd::{SourceArgs, block_on, language};

#[derive(clap::Args, Debug)]
pub struct CategoriesArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Show the children of this category instead of the top level
    #[arg(long, value_name = "ID")]
    pub under: Option<u64>,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: CategoriesArgs) -> Result<()> {
    let source = args.source.connect()?;
    let roots = block_on(async { source.categories().await })??;
    let tree = CategoryTree::new(roots);
    let language = language();

    if let Some(id) = args.under {
        if tree.find(id).is_none() {
            bail!(
                "{}",
                tr_with("cli.categories.not_found", "id", &id.to_string())
            );
        }
        let children = tree.children_of(id);
        if args.json {
            let entries: Vec<_> = children
                .iter()
                .map(|category| {
                    json!({
                        "id": category.id,
                        "slug": category.slug,
                        "label": category.label(language),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        } else {
            for category in children {
                println!(
                    "{:>10}  {}  ({})",
                    category.id,
                    category.label(language),
                    category.slug
                );
            }
        }
        return Ok(());
    }

    let entries = tree.navigation(language);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for entry in entries {
            let marker = if entry.has_dropdown { "+" } else { " " };
            println!("{marker} {}  ({})", entry.label, entry.slug);
        }
    }
    Ok(())
}
