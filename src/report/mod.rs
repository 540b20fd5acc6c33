use crate::client::types::{AnalysisResult, ImplementationStep, RelevantFile, SetupInstruction};
use colored::Colorize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report file: {0}")]
    FileWrite(#[from] std::io::Error),
}

/// Build the markdown document shown in the summary view.
///
/// Sections come out in a fixed order (title, feature summary, implementation
/// steps, setup instructions, potential challenges, relevant files). Every list
/// is emitted in the order received, without filtering. Optional fields that
/// are absent simply drop their line.
pub fn format_document(result: &AnalysisResult) -> String {
    let mut md = String::new();
    md.push_str(&format!("# {}\n\n", result.repository_name));
    md.push_str(&format!("## Feature Summary\n{}\n\n", result.feature_summary));

    md.push_str("## Implementation Steps\n");
    for step in &result.implementation_steps {
        push_implementation_step(&mut md, step);
    }

    md.push_str("## Setup Instructions\n");
    for instruction in &result.setup_instructions {
        push_setup_instruction(&mut md, instruction);
    }

    md.push_str("## Potential Challenges\n");
    for challenge in &result.potential_challenges {
        md.push_str(&format!("- {}\n", challenge));
    }
    md.push('\n');

    md.push_str("## Relevant Files\n");
    for file in &result.relevant_files {
        push_relevant_file(&mut md, file);
    }

    md
}

fn push_implementation_step(md: &mut String, step: &ImplementationStep) {
    md.push_str(&format!("{}. {}\n", step.step_number, step.description));
    if let Some(snippet) = &step.code_snippet {
        push_fenced(md, "ts", snippet);
    }
    if let Some(path) = &step.file_path {
        md.push_str(&format!("File: `{}`\n", path));
    }
    md.push('\n');
}

fn push_setup_instruction(md: &mut String, instruction: &SetupInstruction) {
    md.push_str(&format!("{}. {}\n", instruction.step_number, instruction.description));
    if let Some(code) = &instruction.code {
        push_fenced(md, "sh", code);
    }
    md.push('\n');
}

fn push_relevant_file(md: &mut String, file: &RelevantFile) {
    md.push_str(&format!("- **Path:** `{}`\n", file.path));
    md.push_str(&format!("  - **Importance:** {}\n", file.importance));
    md.push_str(&format!("  - **Reason:** {}\n", file.reason));
    if let Some(preview) = &file.content_preview {
        md.push_str("  - **Content Preview:**\n\n");
        push_fenced(md, "", preview);
    }
    md.push('\n');
}

fn push_fenced(md: &mut String, lang: &str, body: &str) {
    md.push_str(&format!("```{}\n{}\n```\n", lang, body));
}

/// Output a formatted document to the terminal (default) or to a markdown file.
#[instrument(skip(document), fields(bytes = document.len()))]
pub fn output(document: &str, output_path: Option<&Path>) -> Result<(), ReportError> {
    match output_path {
        None => {
            debug!("writing document to terminal");
            print!("{}", render_terminal(document));
            Ok(())
        }
        Some(path) => {
            debug!(path = %path.display(), "writing document to file");
            write_markdown(document, path)
        }
    }
}

/// Colour markdown headings for terminal display. Lines inside fenced
/// blocks are left alone so `# comment` lines in shell snippets stay plain.
pub fn render_terminal(document: &str) -> String {
    let mut out = String::with_capacity(document.len());
    let mut in_fence = false;
    for line in document.lines() {
        if line.starts_with("```") {
            in_fence = !in_fence;
            out.push_str(&line.dimmed().to_string());
        } else if in_fence {
            out.push_str(line);
        } else if line.starts_with("## ") {
            out.push_str(&line.cyan().bold().to_string());
        } else if line.starts_with("# ") {
            out.push_str(&line.green().bold().to_string());
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

fn write_markdown(document: &str, path: &Path) -> Result<(), ReportError> {
    std::fs::write(path, document)?;
    Ok(())
}
