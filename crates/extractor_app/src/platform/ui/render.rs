use extractor_core::{AppViewModel, Focus, ResultRegion, ValidationIssue};

use super::constants::*;
use super::frame::{printable, Body, StyledLine, Tone};

/// Form body for the current view: the two fields, the submit control and
/// the single result region.
pub fn render(view: &AppViewModel) -> Body {
    let mut lines = Vec::new();

    render_field(
        &mut lines,
        LABEL_QUERY,
        &view.query,
        None,
        view.focus == Focus::Query,
    );
    if view.validation == Some(ValidationIssue::MissingQuery) {
        lines.push(validation_line(ValidationIssue::MissingQuery));
    }
    lines.push(StyledLine::new(format!("  {HINT_QUERY}"), Tone::Muted));
    lines.push(StyledLine::blank());

    render_field(
        &mut lines,
        LABEL_DESTINATION,
        &view.destination,
        Some(PLACEHOLDER_DESTINATION),
        view.focus == Focus::Destination,
    );
    if let Some(issue @ (ValidationIssue::MissingDestination | ValidationIssue::InvalidDestination)) =
        view.validation
    {
        lines.push(validation_line(issue));
    }
    lines.push(StyledLine::new(format!("  {HINT_DESTINATION}"), Tone::Muted));
    lines.push(StyledLine::blank());

    lines.push(submit_line(view));

    let region = render_result(&view.result);
    let mut result = None;
    if !region.is_empty() {
        lines.push(StyledLine::blank());
        let start = lines.len();
        lines.extend(region);
        result = Some(start..lines.len());
    }

    Body { lines, result }
}

fn render_field(
    lines: &mut Vec<StyledLine>,
    label: &str,
    value: &str,
    placeholder: Option<&str>,
    focused: bool,
) {
    let marker = if focused { ">" } else { " " };
    let tone = if focused { Tone::Focused } else { Tone::Plain };
    lines.push(StyledLine::new(format!("{marker} {label}"), Tone::Heading));

    if value.is_empty() {
        let text = match placeholder {
            Some(placeholder) => format!("  │ {placeholder}"),
            None => "  │".to_string(),
        };
        lines.push(StyledLine::new(text, Tone::Muted));
        return;
    }
    // `lines()` drops a trailing empty line; keep it so a fresh newline is visible.
    let mut rows: Vec<&str> = value.lines().collect();
    if value.ends_with('\n') {
        rows.push("");
    }
    lines.extend(
        rows.into_iter()
            .map(|row| StyledLine::new(format!("  │ {}", printable(row)), tone)),
    );
}

fn validation_line(issue: ValidationIssue) -> StyledLine {
    StyledLine::new(format!("  ! {}", issue.hint()), Tone::Warning)
}

fn submit_line(view: &AppViewModel) -> StyledLine {
    let marker = if view.focus == Focus::Submit { ">" } else { " " };
    let tone = match (view.submit_enabled, view.focus == Focus::Submit) {
        (false, _) => Tone::Disabled,
        (true, true) => Tone::Focused,
        (true, false) => Tone::Plain,
    };
    StyledLine::new(format!("{marker} [ {} ]", view.submit_label), tone)
}

/// Lines for the result region; empty at idle.
pub fn render_result(region: &ResultRegion) -> Vec<StyledLine> {
    match region {
        ResultRegion::None => Vec::new(),
        ResultRegion::Loading { status } => {
            vec![StyledLine::new(format!("⟳ {}", printable(status)), Tone::Info)]
        }
        ResultRegion::Error { message } => {
            vec![StyledLine::new(
                format!("Error: {}", printable(message)),
                Tone::Error,
            )]
        }
        ResultRegion::Success {
            status,
            preview,
            total_records,
        } => {
            let mut lines = vec![
                StyledLine::new(printable(status), Tone::Success),
                StyledLine::new(SHEET_WRITTEN, Tone::Success),
            ];
            if !preview.is_empty() {
                lines.push(StyledLine::new(PREVIEW_HEADING, Tone::Muted));
                let pretty = serde_json::to_string_pretty(preview)
                    .unwrap_or_else(|err| format!("<preview unavailable: {err}>"));
                lines.extend(
                    pretty
                        .lines()
                        .map(|row| StyledLine::new(format!("  {}", printable(row)), Tone::Plain)),
                );
                if *total_records > preview.len() {
                    lines.push(StyledLine::new(
                        format!("  (showing {} of {} records)", preview.len(), total_records),
                        Tone::Muted,
                    ));
                }
            }
            lines
        }
    }
}
