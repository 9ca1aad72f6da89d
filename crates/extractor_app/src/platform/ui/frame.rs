use std::io::{self, Write};
use std::ops::Range;

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType, SetTitle},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Heading,
    Muted,
    Focused,
    Disabled,
    Info,
    Error,
    Success,
    Warning,
}

impl Tone {
    fn color(self) -> Color {
        match self {
            Tone::Plain => Color::Reset,
            Tone::Heading => Color::White,
            Tone::Muted => Color::DarkGrey,
            Tone::Focused => Color::Cyan,
            Tone::Disabled => Color::DarkGrey,
            Tone::Info => Color::Blue,
            Tone::Error => Color::Red,
            Tone::Success => Color::Green,
            Tone::Warning => Color::Yellow,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLine {
    pub text: String,
    pub tone: Tone,
}

impl StyledLine {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    pub fn blank() -> Self {
        Self::new(String::new(), Tone::Plain)
    }
}

/// Form body lines plus the line range of the result region, if one is shown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Body {
    pub lines: Vec<StyledLine>,
    pub result: Option<Range<usize>>,
}

/// A full page of text, top to bottom, before wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    pub title: String,
    pub lines: Vec<StyledLine>,
    /// Lines of the result region within `lines`.
    pub result: Option<Range<usize>>,
}

impl Frame {
    /// Plain text of every line, newline separated.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Wraps every line to `width` columns. The returned range is the
    /// result region in rows.
    pub fn rows(&self, width: usize) -> (Vec<StyledLine>, Option<Range<usize>>) {
        let mut rows = Vec::with_capacity(self.lines.len());
        let mut result = None;
        for (index, line) in self.lines.iter().enumerate() {
            let first_row = rows.len();
            rows.extend(
                wrap_text(&line.text, width)
                    .into_iter()
                    .map(|text| StyledLine::new(text, line.tone)),
            );
            if let Some(range) = &self.result {
                if index == range.start {
                    result = Some(first_row..first_row);
                }
                if index + 1 == range.end {
                    if let Some(rows_range) = result.as_mut() {
                        rows_range.end = rows.len();
                    }
                }
            }
        }
        (rows, result)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollRequest {
    PageUp,
    PageDown,
    Top,
    Bottom,
}

/// First visible row of the wrapped frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    scroll: usize,
}

impl Viewport {
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn apply(&mut self, request: ScrollRequest, total_rows: usize, height: usize) {
        let page = height.saturating_sub(1).max(1);
        self.scroll = match request {
            ScrollRequest::PageUp => self.scroll.saturating_sub(page),
            ScrollRequest::PageDown => self.scroll + page,
            ScrollRequest::Top => 0,
            ScrollRequest::Bottom => usize::MAX,
        };
        self.clamp(total_rows, height);
    }

    /// Scrolls so `rows` is on screen; keeps the position when it already is.
    pub fn reveal(&mut self, rows: Range<usize>, total_rows: usize, height: usize) {
        let in_view = rows.start >= self.scroll && rows.end <= self.scroll + height;
        if !in_view {
            self.scroll = rows.start;
        }
        self.clamp(total_rows, height);
    }

    fn clamp(&mut self, total_rows: usize, height: usize) {
        self.scroll = self.scroll.min(total_rows.saturating_sub(height));
    }
}

/// Draws the rows of `frame` visible through `viewport` at `width` x `height`.
pub fn paint(
    out: &mut impl Write,
    frame: &Frame,
    viewport: &mut Viewport,
    width: u16,
    height: u16,
) -> io::Result<()> {
    let (rows, _) = frame.rows(width as usize);
    viewport.clamp(rows.len(), height as usize);

    queue!(out, SetTitle(&frame.title), Clear(ClearType::All))?;
    for (screen_row, line) in rows
        .iter()
        .skip(viewport.scroll())
        .take(height as usize)
        .enumerate()
    {
        queue!(
            out,
            MoveTo(0, screen_row as u16),
            SetForegroundColor(line.tone.color()),
            Print(&line.text),
            ResetColor
        )?;
    }
    out.flush()
}

/// Replaces control characters with their escaped form so server text
/// cannot drive the terminal.
pub fn printable(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_control() {
            out.extend(ch.escape_default());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Word-wraps `text` to `width` display columns. Continuation rows keep the
/// leading indent; words wider than a row are split.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 || UnicodeWidthStr::width(text) <= width {
        return vec![text.to_string()];
    }

    let indent_len = text.len() - text.trim_start_matches(' ').len();
    let indent = if indent_len * 2 > width {
        ""
    } else {
        &text[..indent_len]
    };

    let mut rows = Vec::new();
    let mut current = indent.to_string();
    let mut current_width = indent.len();
    let mut has_word = false;

    for word in text[indent_len..].split(' ').filter(|word| !word.is_empty()) {
        let word_width = UnicodeWidthStr::width(word);
        let gap = usize::from(has_word);
        if has_word && current_width + gap + word_width > width {
            rows.push(std::mem::replace(&mut current, indent.to_string()));
            current_width = indent.len();
            has_word = false;
        }
        if has_word {
            current.push(' ');
            current_width += 1;
        }
        for ch in word.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if current_width + ch_width > width && current_width > indent.len() {
                rows.push(std::mem::replace(&mut current, indent.to_string()));
                current_width = indent.len();
            }
            current.push(ch);
            current_width += ch_width;
        }
        has_word = true;
    }
    if has_word || rows.is_empty() {
        rows.push(current);
    }
    rows
}
