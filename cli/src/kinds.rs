use anyhow::{Context, Result};
use camelk_model::constants::API_VERSION;
use camelk_model::CamelKind;
use clap::Parser;
use serde::Serialize;
use tabled::{Alignment, Full, Modify, Style, Table, Tabled};

/// List the supported kinds.
#[derive(Debug, Parser)]
pub(crate) struct Kinds {
    /// Output the kinds in JSON format.
    #[clap(long = "json")]
    json: bool,
}

#[derive(Tabled, Serialize)]
#[serde(rename_all = "camelCase")]
struct KindRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "KIND")]
    kind: &'static str,
    #[tabled(rename = "API VERSION")]
    api_version: &'static str,
    #[tabled(rename = "TYPE")]
    type_name: &'static str,
}

impl Kinds {
    pub(crate) fn run(self) -> Result<()> {
        let rows: Vec<KindRow> = CamelKind::ALL
            .iter()
            .map(|kind| KindRow {
                name: kind.to_string(),
                kind: kind.kind(),
                api_version: API_VERSION,
                type_name: kind.type_name(),
            })
            .collect();
        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&rows).context("Could not create string from kinds.")?
            );
        } else {
            let table = Table::new(rows)
                .with(Style::blank())
                .with(Modify::new(Full).with(Alignment::left()));
            println!("{}", table);
        }
        Ok(())
    }
}
