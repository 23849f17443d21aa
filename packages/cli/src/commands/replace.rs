use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use textsweep_engine::{
    Disposition, RecordKind, ReplaceOptions, ReplacementEngine, ReplacementOutcome, ViewScope,
};
use textsweep_model::Document;
use tracing::info;

#[derive(Debug, Args)]
pub struct ReplaceArgs {
    /// Document to edit (JSON)
    pub document: PathBuf,

    /// Text to find (literal, case-sensitive)
    #[arg(short, long)]
    pub find: String,

    /// Replacement text
    #[arg(short, long)]
    pub replace: String,

    /// Scan and report without keeping any change
    #[arg(short, long)]
    pub preview: bool,

    /// Write the edited document here instead of in place
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,

    /// Skip view templates
    #[arg(long)]
    pub exclude_templates: bool,

    /// Config file (defaults to textsweep.config.json in the current directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub fn replace(args: ReplaceArgs, cwd: &str) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load(cwd)?,
    };
    let options = resolve_options(&config, &args);

    let mut document = Document::load(&args.document)
        .with_context(|| format!("Failed to load document {}", args.document.display()))?;

    let engine = ReplacementEngine::new(options);
    info!(
        transaction = %engine.options().transaction_name,
        scope = ?engine.options().view_scope,
        "Running replacement"
    );
    let outcome = engine.run(&mut document, &args.find, &args.replace, args.preview)?;

    if outcome.committed() {
        let target = args.output.as_deref().unwrap_or(args.document.as_path());
        save(&document, &args.document, target, config.backup)?;
        info!(path = %target.display(), "Saved document");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if outcome.disposition != Disposition::Failed {
        print_report(&outcome);
    }

    match outcome.top_level_error {
        Some(message) => Err(anyhow!("{}", message)),
        None => Ok(()),
    }
}

/// Config file settings with command-line overrides applied
fn resolve_options(config: &Config, args: &ReplaceArgs) -> ReplaceOptions {
    let mut options = config.options.clone();
    if args.exclude_templates {
        options.view_scope = ViewScope::ExcludeTemplates;
    }
    options
}

fn save(document: &Document, source: &Path, target: &Path, backup: bool) -> Result<()> {
    if backup && target == source {
        let backup_path = source.with_extension("json.bak");
        std::fs::copy(source, &backup_path)
            .with_context(|| format!("Failed to write backup {}", backup_path.display()))?;
    }

    document
        .save(target)
        .with_context(|| format!("Failed to save document {}", target.display()))
}

fn print_report(outcome: &ReplacementOutcome) {
    let report = outcome.report();
    let title = match outcome.disposition {
        Disposition::Committed => report.title.green().bold(),
        Disposition::Previewed => report.title.bright_blue().bold(),
        Disposition::NoMatches | Disposition::Failed => report.title.yellow().bold(),
    };
    println!("{}", title);

    if outcome.log.is_empty() || outcome.disposition == Disposition::NoMatches {
        println!("  {}", report.body.dimmed());
        return;
    }

    for record in outcome.log.iter() {
        let marker = match record.kind {
            RecordKind::Replace => "✓".green(),
            RecordKind::Match => "•".bright_blue(),
            RecordKind::Error => "✗".red(),
        };
        println!("  {} {}", marker, record);
    }

    println!();
    println!(
        "{} replacements, {} errors",
        outcome.log.replacements().count(),
        outcome.log.errors().count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use textsweep_model::{Element, ElementId, View};

    fn write_document(dir: &Path) -> PathBuf {
        let mut doc = Document::new("CLI");
        let plan = doc.add_view(View::new(100, "Plan1"));
        let note = doc.add_element(Element::text_note(1, "Door-01"));
        doc.place(plan, note).unwrap();

        let path = dir.join("project.json");
        doc.save(&path).unwrap();
        path
    }

    fn args(document: PathBuf) -> ReplaceArgs {
        ReplaceArgs {
            document,
            find: "Door".to_string(),
            replace: "Opening".to_string(),
            preview: false,
            output: None,
            json: false,
            exclude_templates: false,
            config: None,
        }
    }

    fn note_text(path: &Path) -> String {
        let doc = Document::load(path).unwrap();
        doc.element(ElementId(1)).unwrap().text().unwrap().to_string()
    }

    #[test]
    fn test_commit_rewrites_document_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_document(dir.path());
        let cwd = dir.path().to_str().unwrap();

        replace(args(path.clone()), cwd).unwrap();
        assert_eq!(note_text(&path), "Opening-01");
    }

    #[test]
    fn test_preview_does_not_touch_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_document(dir.path());
        let cwd = dir.path().to_str().unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        let mut preview = args(path.clone());
        preview.preview = true;
        replace(preview, cwd).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_output_path_and_backup() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_document(dir.path());
        let cwd = dir.path().to_str().unwrap();
        std::fs::write(dir.path().join(crate::config::DEFAULT_CONFIG_NAME), r#"{ "backup": true }"#).unwrap();

        let output = dir.path().join("out.json");
        let mut to_output = args(path.clone());
        to_output.output = Some(output.clone());
        replace(to_output, cwd).unwrap();

        assert_eq!(note_text(&path), "Door-01");
        assert_eq!(note_text(&output), "Opening-01");
        assert!(!path.with_extension("json.bak").exists());

        replace(args(path.clone()), cwd).unwrap();
        assert_eq!(note_text(&path), "Opening-01");
        assert_eq!(note_text(&path.with_extension("json.bak")), "Door-01");
    }

    #[test]
    fn test_empty_find_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_document(dir.path());
        let cwd = dir.path().to_str().unwrap();

        let mut empty = args(path.clone());
        empty.find = String::new();
        let err = replace(empty, cwd).unwrap_err();
        assert_eq!(err.to_string(), "Find text must not be empty");
    }

    #[test]
    fn test_exclude_templates_flag_overrides_config() {
        let config = Config::default();
        let mut flagged = args(PathBuf::from("unused.json"));
        flagged.exclude_templates = true;

        assert_eq!(resolve_options(&config, &flagged).view_scope, ViewScope::ExcludeTemplates);
        assert_eq!(
            resolve_options(&config, &args(PathBuf::from("unused.json"))).view_scope,
            ViewScope::All
        );
    }
}
