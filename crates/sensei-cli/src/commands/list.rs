//! `sensei list` command.

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use sensei_catalog::Catalog;
use sensei_types::ArgumentSpec;

use crate::{output, shared};

/// Which part of the catalog to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
    All,
    Tools,
    Prompts,
    Resources,
}

/// List the tools, prompts and resources in the catalog.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Catalog TOML file (defaults to the built-in catalog).
    #[arg(long)]
    pub catalog: Option<PathBuf>,
    /// Restrict output to one section.
    #[arg(long, value_enum, default_value = "all")]
    pub kind: ListKind,
    /// Filter by name (substring match).
    #[arg(short, long)]
    pub filter: Option<String>,
    /// Print the selected entries as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Executes the list command.
pub fn execute(args: &ListArgs) -> anyhow::Result<()> {
    let catalog = shared::load_catalog(args.catalog.as_deref())?;
    if args.json {
        let value = to_json(&catalog, args.kind, args.filter.as_deref());
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }
    let text = render(&catalog, args.kind, args.filter.as_deref());
    if text.is_empty() {
        output::print_error("nothing matches");
    } else {
        print!("{text}");
    }
    Ok(())
}

fn render(catalog: &Catalog, kind: ListKind, filter: Option<&str>) -> String {
    let keep = |name: &str| filter.map_or(true, |f| name.contains(f));
    let mut out = String::new();

    if matches!(kind, ListKind::All | ListKind::Tools) {
        let rows: Vec<_> = catalog.tools().iter().filter(|t| keep(&t.name)).collect();
        if !rows.is_empty() {
            let _ = writeln!(out, "Tools:");
            for t in rows {
                let _ = writeln!(
                    out,
                    "  {:<24} {}  {}",
                    t.name,
                    output::truncate(&t.description, 48),
                    signature(&t.arguments)
                );
            }
        }
    }

    if matches!(kind, ListKind::All | ListKind::Prompts) {
        let rows: Vec<_> = catalog.prompts().iter().filter(|p| keep(&p.name)).collect();
        if !rows.is_empty() {
            let _ = writeln!(out, "Prompts:");
            for p in rows {
                let _ = writeln!(
                    out,
                    "  {:<24} {}  {}",
                    p.name,
                    output::truncate(&p.description, 48),
                    signature(&p.arguments)
                );
            }
        }
    }

    if matches!(kind, ListKind::All | ListKind::Resources) {
        let rows: Vec<_> = catalog
            .resources()
            .iter()
            .filter(|r| keep(&r.uri) || keep(&r.name))
            .collect();
        if !rows.is_empty() {
            let _ = writeln!(out, "Resources:");
            for r in rows {
                let _ = writeln!(out, "  {:<34} {}", r.uri, r.name);
            }
        }
    }

    out
}

fn to_json(catalog: &Catalog, kind: ListKind, filter: Option<&str>) -> serde_json::Value {
    let keep = |name: &str| filter.map_or(true, |f| name.contains(f));
    let mut out = serde_json::Map::new();
    if matches!(kind, ListKind::All | ListKind::Tools) {
        let tools: Vec<_> = catalog.tools().iter().filter(|t| keep(&t.name)).collect();
        out.insert("tools".into(), serde_json::json!(tools));
    }
    if matches!(kind, ListKind::All | ListKind::Prompts) {
        let prompts: Vec<_> = catalog.prompts().iter().filter(|p| keep(&p.name)).collect();
        out.insert("prompts".into(), serde_json::json!(prompts));
    }
    if matches!(kind, ListKind::All | ListKind::Resources) {
        let resources: Vec<_> = catalog
            .resources()
            .iter()
            .filter(|r| keep(&r.uri) || keep(&r.name))
            .collect();
        out.insert("resources".into(), serde_json::json!(resources));
    }
    serde_json::Value::Object(out)
}

/// `(code, language=python, context?)`, in declaration order.
fn signature(args: &[ArgumentSpec]) -> String {
    let parts: Vec<String> = args
        .iter()
        .map(|a| match (&a.default, a.required) {
            (_, true) => a.name.clone(),
            (Some(d), false) => format!("{}={}", a.name, d),
            (None, false) => format!("{}?", a.name),
        })
        .collect();
    format!("({})", parts.join(", "))
}
