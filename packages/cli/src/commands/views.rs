use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use textsweep_engine::{ViewFilter, ViewScope};
use textsweep_model::{Document, ElementKind};

#[derive(Debug, Args)]
pub struct ViewsArgs {
    /// Document to inspect (JSON)
    pub document: PathBuf,

    /// Treat view templates as ineligible
    #[arg(long)]
    pub exclude_templates: bool,
}

pub fn views(args: ViewsArgs, _cwd: &str) -> Result<()> {
    let document = Document::load(&args.document)
        .with_context(|| format!("Failed to load document {}", args.document.display()))?;

    let scope = if args.exclude_templates {
        ViewScope::ExcludeTemplates
    } else {
        ViewScope::All
    };
    let filter = scope.filter();

    println!(
        "{} {}",
        "Views in".bright_blue().bold(),
        document.title.bright_white()
    );

    for view in document.views() {
        let status = if filter.is_eligible(Some(view)) {
            "scanned".green()
        } else if !view.is_valid() {
            "invalid".red()
        } else {
            "skipped".yellow()
        };

        let count = |kind| document.collect(view.id, kind).map(|ids| ids.len()).unwrap_or(0);

        println!(
            "  {:>8}  {:<24} {:<8} notes: {}, tags: {}, instances: {}{}",
            view.id.0,
            view.name,
            status,
            count(ElementKind::TextNote),
            count(ElementKind::Tag),
            count(ElementKind::FamilyInstance),
            if view.is_template() { " (template)".dimmed().to_string() } else { String::new() }
        );
    }

    Ok(())
}
