//! Page shell shared by every screen: metadata, header and the static
//! information panels around the form body.

use std::fs;
use std::path::Path;

use extractor_logging::extractor_debug;

use super::constants::*;
use super::frame::{Body, Frame, StyledLine, Tone};

/// Optional text-art logo, relative to the working directory.
pub const LOGO_PATH: &str = "assets/logo.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub title: &'static str,
    pub description: &'static str,
}

pub const PAGE_META: PageMeta = PageMeta {
    title: "AlphaTechAI - USPTO Trademark Scraper",
    description:
        "AI-powered automated USPTO trademark data extraction to Google Sheets by AlphaTechAI",
};

#[derive(Debug, Clone)]
pub struct PageShell {
    meta: PageMeta,
    logo: Option<Vec<String>>,
}

impl PageShell {
    pub fn new(meta: PageMeta, logo: Option<Vec<String>>) -> Self {
        Self { meta, logo }
    }

    pub fn meta(&self) -> PageMeta {
        self.meta
    }

    /// Places `body` between the header and the information panels.
    pub fn wrap(&self, body: Body) -> Frame {
        let mut lines = Vec::new();

        if let Some(logo) = &self.logo {
            lines.extend(logo.iter().map(|row| StyledLine::new(row.clone(), Tone::Info)));
        }
        lines.push(StyledLine::new(BRAND, Tone::Heading));
        lines.push(StyledLine::new(HEADLINE, Tone::Heading));
        lines.push(StyledLine::new(TAGLINE, Tone::Muted));
        lines.push(StyledLine::blank());

        let offset = lines.len();
        let result = body
            .result
            .map(|range| range.start + offset..range.end + offset);
        lines.extend(body.lines);

        lines.push(StyledLine::blank());
        lines.push(StyledLine::new("How it works", Tone::Heading));
        lines.extend(
            HOW_IT_WORKS
                .iter()
                .enumerate()
                .map(|(i, step)| StyledLine::new(format!("  {}. {step}", i + 1), Tone::Plain)),
        );
        lines.push(StyledLine::new("Extracted Fields:", Tone::Warning));
        lines.extend(
            EXTRACTED_FIELDS
                .iter()
                .map(|field| StyledLine::new(format!("  • {field}"), Tone::Warning)),
        );
        lines.push(StyledLine::blank());
        lines.push(StyledLine::new(KEY_HELP, Tone::Muted));

        Frame {
            title: self.meta.title.to_string(),
            lines,
            result,
        }
    }
}

/// Loads the logo rows. Missing or unreadable files hide the logo.
pub fn load_logo(path: &Path) -> Option<Vec<String>> {
    match fs::read_to_string(path) {
        Ok(text) => {
            let rows: Vec<String> = text.lines().map(str::to_owned).collect();
            if rows.is_empty() {
                None
            } else {
                Some(rows)
            }
        }
        Err(err) => {
            extractor_debug!("Logo not shown, could not read {:?}: {}", path, err);
            None
        }
    }
}
