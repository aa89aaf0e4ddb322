pub mod categories;
pub mod fields;
pub mod i18n;
pub mod post;

use std::future::Future;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use souk_api::{ApiClient, FileSource, MarketSource};
use souk_catalog::Language;

/// Where a command reads marketplace data from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Marketplace origin to query
    #[arg(long, value_name = "URL", conflicts_with = "from_dir")]
    pub origin: Option<String>,

    /// Read captured API payloads from a directory instead of the network
    #[arg(long = "from-dir", value_name = "DIR")]
    pub from_dir: Option<PathBuf>,
}

impl SourceArgs {
    pub fn connect(&self) -> Result<Box<dyn MarketSource>> {
        if let Some(dir) = &self.from_dir {
            debug!(dir = %dir.display(), "reading captured payloads");
            return Ok(Box::new(FileSource::new(dir)));
        }
        let client = match &self.origin {
            Some(origin) => ApiClient::from_origin_str(origin)?,
            None => ApiClient::from_env()?,
        };
        debug!(origin = %client.origin(), "using marketplace origin");
        Ok(Box::new(client))
    }
}

/// Runs one command future to completion on a fresh runtime.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;
    Ok(runtime.block_on(future))
}

/// Language the selected locale renders catalog content in.
pub(crate) fn language() -> Language {
    Language::from_locale(i18n::selected_locale())
}
