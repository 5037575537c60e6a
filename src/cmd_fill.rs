//! `fill` subcommand.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use formfill_core::{Command, FillReport, FillSource, Outcome};
use formfill_dom::Document;
use formfill_protocols::Profile;

use crate::cli::OutputFormat;
use crate::engine::{run_to_completion, Engine};

/// Fill `page` from `profile` (or the stored profile) and print the report.
pub(crate) async fn handle_fill(
    engine: &Engine,
    page: &Path,
    profile: Option<&Path>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let html = tokio::fs::read_to_string(page).await?;
    let document = Arc::new(Document::parse(&html));

    let command = match profile {
        Some(path) => {
            let json = tokio::fs::read_to_string(path).await?;
            let profile: Profile = serde_json::from_str(&json)?;
            Command::Fill {
                profile: Box::new(profile),
            }
        }
        None => Command::FillFromStore,
    };

    let dispatcher = engine.dispatcher(document);
    let Outcome::Filled(report) = run_to_completion(&dispatcher, command).await? else {
        return Err("fill finished without a report".into());
    };
    info!(
        "Filled {} element(s) on {}",
        report.distinct_elements(),
        page.display()
    );

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print!("{}", render_table(&report)),
    }
    Ok(())
}

fn describe_source(source: &FillSource) -> String {
    match source {
        FillSource::Learned { profile_key, .. } => format!("learned:{}", profile_key),
        FillSource::Keyword { field } => field.to_string(),
        FillSource::SectionItem {
            section,
            index,
            field,
        } => format!("{} #{}:{}", section, index + 1, field),
    }
}

fn render_table(report: &FillReport) -> String {
    let mut out = String::new();
    if report.filled.is_empty() {
        out.push_str("Nothing was filled.\n");
    } else {
        out.push_str(&format!("{:<24} {:<32} {}\n", "ELEMENT", "SOURCE", "VALUE"));
        out.push_str(&format!("{}\n", "-".repeat(80)));
        for field in &report.filled {
            let value: String = field.value.chars().take(40).collect();
            out.push_str(&format!(
                "{:<24} {:<32} {}\n",
                field.label,
                describe_source(&field.source),
                value
            ));
        }
    }
    if !report.diagnostics.is_empty() {
        out.push_str("\nDiagnostics:\n");
        for diagnostic in &report.diagnostics {
            out.push_str(&format!("  - {}\n", diagnostic));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use formfill_core::FilledField;
    use formfill_protocols::{ElementId, FillError, ScalarField};

    #[test]
    fn test_render_table() {
        let report = FillReport {
            filled: vec![
                FilledField {
                    element: ElementId(4),
                    label: "fname".to_string(),
                    value: "Ada".to_string(),
                    source: FillSource::Keyword {
                        field: ScalarField::FirstName,
                    },
                },
                FilledField {
                    element: ElementId(9),
                    label: "company_0".to_string(),
                    value: "Babbage & Co".to_string(),
                    source: FillSource::SectionItem {
                        section: "work experience".to_string(),
                        index: 0,
                        field: "company".to_string(),
                    },
                },
            ],
            diagnostics: vec![FillError::NoElementForSelector("#gone".to_string())],
        };

        let table = render_table(&report);
        assert!(table.contains("firstName"));
        assert!(table.contains("work experience #1:company"));
        assert!(table.contains("No element matches selector: #gone"));
    }

    #[test]
    fn test_render_empty_report() {
        assert_eq!(render_table(&FillReport::default()), "Nothing was filled.\n");
    }
}
