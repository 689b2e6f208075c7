//! `albkit kinds`: the object kind registry, no controller needed.

use albkit_api::ResourceKind;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{GlobalOpts, KindsArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct KindEntry {
    name: &'static str,
    token: &'static str,
    path: String,
}

impl From<ResourceKind> for KindEntry {
    fn from(kind: ResourceKind) -> Self {
        Self {
            name: kind.name(),
            token: kind.token(),
            path: kind.path(None),
        }
    }
}

#[derive(Tabled)]
struct KindRow {
    #[tabled(rename = "Kind")]
    name: &'static str,
    #[tabled(rename = "Path")]
    path: String,
}

pub fn handle(args: &KindsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let entries: Vec<KindEntry> = util::filter_kinds(args.filter.as_deref())
        .into_iter()
        .map(KindEntry::from)
        .collect();
    let out = output::render_list(
        global.output_format(),
        &entries,
        |e| KindRow {
            name: e.name,
            path: e.path.clone(),
        },
        |e| e.token.to_owned(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
