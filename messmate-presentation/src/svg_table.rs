use std::{borrow::Cow, fmt::Write};

const FONT_SIZE: u32 = 13;
const CELL_PADDING: u32 = 9;
const ROW_HEIGHT: u32 = FONT_SIZE + CELL_PADDING * 2;
const HEADER_BG: &str = "#2d3748";
const HEADER_TEXT: &str = "#f7fafc";
const ROW_BG_EVEN: &str = "#ffffff";
const ROW_BG_ODD: &str = "#edf2f7";
const ROW_TEXT: &str = "#1a202c";
const FRAME: &str = "#a0aec0";
const FONT_FAMILY: &str = "Noto Sans";
const CHAR_WIDTH: f32 = 7.8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

/// Renders a header-plus-rows table as a standalone SVG string.
#[derive(Default)]
pub struct SvgTable<'a> {
    columns: Vec<(Cow<'a, str>, Alignment)>,
    rows: Vec<Vec<Cow<'a, str>>>,
}

impl<'a> SvgTable<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(mut self, label: impl Into<Cow<'a, str>>, alignment: Alignment) -> Self {
        self.columns.push((label.into(), alignment));
        self
    }

    pub fn row<I, C>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cow<'a, str>>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> String {
        if self.columns.is_empty() {
            return String::new();
        }

        let mut widths: Vec<u32> = self
            .columns
            .iter()
            .map(|(label, _)| text_width(label))
            .collect();
        for row in &self.rows {
            for (idx, cell) in row.iter().enumerate().take(widths.len()) {
                widths[idx] = widths[idx].max(text_width(cell));
            }
        }

        let table_width: u32 =
            widths.iter().sum::<u32>() + (self.columns.len() as u32 + 1) * CELL_PADDING;
        let table_height = ROW_HEIGHT * (1 + self.rows.len() as u32) + 2;
        let baseline = ROW_HEIGHT / 2 + FONT_SIZE / 2 - 2;

        let mut svg = String::with_capacity(2048);
        let _ = writeln!(
            &mut svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{table_width}" height="{table_height}" viewBox="0 0 {table_width} {table_height}">"#
        );
        let _ = writeln!(
            &mut svg,
            r#"<style>text {{ font-family: {FONT_FAMILY}; font-size: {FONT_SIZE}px; }}</style>"#
        );
        let _ = writeln!(
            &mut svg,
            r#"<rect width="{table_width}" height="{table_height}" fill="{FRAME}" rx="4" />"#
        );
        let _ = writeln!(
            &mut svg,
            r#"<rect x="1" y="1" width="{}" height="{ROW_HEIGHT}" fill="{HEADER_BG}" rx="3" />"#,
            table_width - 2
        );

        let mut x = CELL_PADDING;
        for ((label, alignment), width) in self.columns.iter().zip(&widths) {
            let _ = writeln!(
                &mut svg,
                r#"<text x="{}" y="{baseline}" fill="{HEADER_TEXT}" text-anchor="{}">{}</text>"#,
                anchored_x(x, *width, *alignment),
                anchor(*alignment),
                escape_xml(label)
            );
            x += width + CELL_PADDING;
        }

        for (row_idx, row) in self.rows.iter().enumerate() {
            let y = ROW_HEIGHT * (1 + row_idx as u32) + 1;
            let bg = if row_idx % 2 == 0 {
                ROW_BG_EVEN
            } else {
                ROW_BG_ODD
            };
            let _ = writeln!(
                &mut svg,
                r#"<rect x="1" y="{y}" width="{}" height="{ROW_HEIGHT}" fill="{bg}" />"#,
                table_width - 2
            );

            let mut x = CELL_PADDING;
            for (idx, cell) in row.iter().enumerate().take(self.columns.len()) {
                let alignment = self.columns[idx].1;
                let _ = writeln!(
                    &mut svg,
                    r#"<text x="{}" y="{}" fill="{ROW_TEXT}" text-anchor="{}">{}</text>"#,
                    anchored_x(x, widths[idx], alignment),
                    y + baseline,
                    anchor(alignment),
                    escape_xml(cell)
                );
                x += widths[idx] + CELL_PADDING;
            }
        }

        svg.push_str("</svg>");
        svg
    }
}

fn text_width(text: &str) -> u32 {
    let width: f32 = text
        .chars()
        .map(|c| if c.is_ascii() { CHAR_WIDTH } else { CHAR_WIDTH * 2.0 })
        .sum();
    (width.ceil() as u32).max(24) + CELL_PADDING * 2
}

fn anchored_x(cell_x: u32, cell_width: u32, alignment: Alignment) -> u32 {
    match alignment {
        Alignment::Left => cell_x,
        Alignment::Right => cell_x + cell_width,
    }
}

fn anchor(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "start",
        Alignment::Right => "end",
    }
}

fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
