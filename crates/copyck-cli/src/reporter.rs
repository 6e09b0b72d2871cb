use colored::Colorize;
use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use copyck_common::diagnostics::CODE_PREFIX;
use copyck_common::{Diagnostic, DiagnosticCategory, DiagnosticRelatedInformation};
use copyck_model::NodeArena;

use crate::line_map::LineMap;

pub struct Reporter {
    color: bool,
    sources: HashMap<String, String>,
    line_maps: HashMap<String, LineMap>,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter {
            color,
            sources: HashMap::new(),
            line_maps: HashMap::new(),
        }
    }

    /// Register the rendered source text of every file in `arena`.
    pub fn with_arena_sources(mut self, arena: &NodeArena) -> Self {
        for file in arena.files() {
            if let Some(text) = arena.source_text(file) {
                self.add_source(arena.file_name(file), text);
            }
        }
        self
    }

    pub fn add_source(&mut self, file: &str, text: &str) {
        self.sources.insert(file.to_string(), text.to_string());
        self.line_maps.remove(file);
    }

    pub fn render(&mut self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for diagnostic in diagnostics {
            out.push_str(&self.format_diagnostic(diagnostic));
            out.push_str("\n\n");
        }
        if !diagnostics.is_empty() {
            out.push_str(&self.format_summary(diagnostics));
            out.push('\n');
        }
        out
    }

    pub fn format_diagnostic(&mut self, diagnostic: &Diagnostic) -> String {
        let location = self.format_location(&diagnostic.file, diagnostic.start);
        let category = self.format_category(diagnostic.category);
        let code = self.format_code(diagnostic.code);

        let mut output = String::new();
        if let Some(location) = location {
            output.push_str(&location);
        } else if !diagnostic.file.is_empty() {
            output.push_str(&diagnostic.file);
        } else {
            output.push_str("<unknown>");
        }

        output.push_str(" - ");
        output.push_str(&category);
        if !code.is_empty() {
            output.push(' ');
            output.push_str(&code);
        }
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        if let Some(snippet) =
            self.format_snippet(&diagnostic.file, diagnostic.start, diagnostic.length)
        {
            output.push_str(&snippet);
        }

        for related in &diagnostic.related_information {
            output.push('\n');
            output.push_str(&self.format_related(related));
            if let Some(snippet) = self.format_snippet(&related.file, related.start, related.length)
            {
                output.push_str(&snippet);
            }
        }

        output
    }

    /// `Found 2 advisories in 1 file.`
    pub fn format_summary(&self, diagnostics: &[Diagnostic]) -> String {
        let count = diagnostics.len();
        let mut files: Vec<&str> = diagnostics.iter().map(|d| d.file.as_str()).collect();
        files.sort_unstable();
        files.dedup();
        let noun = if count == 1 { "advisory" } else { "advisories" };
        let file_noun = if files.len() == 1 { "file" } else { "files" };
        let summary = format!("Found {count} {noun} in {} {file_noun}.", files.len());
        if self.color {
            summary.bold().to_string()
        } else {
            summary
        }
    }

    /// Source line with the span underlined:
    ///   3       Point(Point other) {
    ///           ~~~~~
    fn format_snippet(&mut self, file: &str, start: u32, length: u32) -> Option<String> {
        if file.is_empty() || length == 0 {
            return None;
        }

        let (line_num, column) = self.position_for(file, start)?;
        let source = self.sources.get(file)?;
        let line_text = source.lines().nth((line_num - 1) as usize)?;
        let first = (column - 1) as usize;

        let mut underline = String::new();
        for (i, ch) in line_text.chars().enumerate() {
            if i < first {
                underline.push_str(if ch == '\t' { "    " } else { " " });
            } else if i < first + length as usize {
                underline.push_str(if ch == '\t' { "~~~~" } else { "~" });
            } else {
                break;
            }
        }
        if !underline.contains('~') {
            underline.push('~');
        }

        let underline = if self.color {
            underline.yellow().to_string()
        } else {
            underline
        };
        Some(format!("\n  {line_num:>3}   {line_text}\n        {underline}"))
    }

    fn format_related(&mut self, related: &DiagnosticRelatedInformation) -> String {
        let location = self
            .format_location(&related.file, related.start)
            .unwrap_or_else(|| related.file.clone());
        let prefix = if self.color {
            "  Related".dimmed().to_string()
        } else {
            "  Related".to_string()
        };

        format!("{}: {} - {}", prefix, location, related.message_text)
    }

    fn format_location(&mut self, file: &str, offset: u32) -> Option<String> {
        if file.is_empty() {
            return None;
        }

        let (line, column) = self.position_for(file, offset)?;
        let location = format!("{file}:{line}:{column}");
        if self.color {
            Some(location.cyan().to_string())
        } else {
            Some(location)
        }
    }

    fn position_for(&mut self, file: &str, offset: u32) -> Option<(u32, u32)> {
        self.ensure_source(file)?;
        let source = self.sources.get(file)?;
        let line_map = self
            .line_maps
            .entry(file.to_string())
            .or_insert_with(|| LineMap::build(source));
        let (line, column) = line_map.position(offset, source);
        Some((line + 1, column + 1))
    }

    fn ensure_source(&mut self, file: &str) -> Option<()> {
        if !self.sources.contains_key(file) {
            let contents = std::fs::read_to_string(Path::new(file)).ok()?;
            self.sources.insert(file.to_string(), contents);
        }
        Some(())
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = category.as_str();
        if !self.color {
            return label.to_string();
        }

        match category {
            DiagnosticCategory::Advisory => label.yellow().bold().to_string(),
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        if code == 0 {
            return String::new();
        }

        let label = format!("{CODE_PREFIX}{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}

/// Diagnostics as a JSON array.
pub fn render_json(diagnostics: &[Diagnostic], pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(diagnostics)
    } else {
        serde_json::to_string(diagnostics)
    };
    rendered.context("failed to serialize diagnostics")
}
