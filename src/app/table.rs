use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Rect},
    symbols::line,
    text::{Line, Span},
    widgets::{Cell, Row, Table, Widget},
};

const COLUMN_SPACING: u16 = 2;

/// A plain-text table drawn with ratatui's [`Table`] widget into an
/// off-screen [`Buffer`], framed with light box-drawing lines.
#[derive(Clone, Debug, Default)]
pub struct TextTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    right_aligned: Vec<usize>,
}

impl TextTable {
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn align_right(mut self, columns: &[usize]) -> Self {
        self.right_aligned.extend_from_slice(columns);
        self
    }

    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let spacing = COLUMN_SPACING * widths.len().saturating_sub(1) as u16;
        let inner = widths.iter().sum::<u16>().saturating_add(spacing).max(1);
        let rule = line::NORMAL.horizontal.repeat(inner as usize);

        let mut out = String::new();
        out.push_str(&format!("{}{}{}\n", line::NORMAL.top_left, rule, line::NORMAL.top_right));
        self.push_lines(&mut out, std::slice::from_ref(&self.header), &widths, inner);
        out.push_str(&format!(
            "{}{}{}\n",
            line::NORMAL.vertical_right,
            rule,
            line::NORMAL.vertical_left
        ));

        // Keep every off-screen buffer within u16::MAX cells.
        let rows_per_chunk = (u16::MAX / inner).max(1) as usize;
        for chunk in self.rows.chunks(rows_per_chunk) {
            self.push_lines(&mut out, chunk, &widths, inner);
        }

        out.push_str(&format!(
            "{}{}{}\n",
            line::NORMAL.bottom_left,
            rule,
            line::NORMAL.bottom_right
        ));
        out
    }

    fn column_widths(&self) -> Vec<u16> {
        (0..self.header.len())
            .map(|idx| {
                let widest = std::iter::once(&self.header)
                    .chain(self.rows.iter())
                    .filter_map(|row| row.get(idx))
                    .map(|value| Span::raw(value.as_str()).width())
                    .max()
                    .unwrap_or(0);
                u16::try_from(widest).unwrap_or(u16::MAX).max(1)
            })
            .collect()
    }

    fn row<'a>(&self, cells: &'a [String]) -> Row<'a> {
        let cells = cells.iter().enumerate().map(|(idx, value)| {
            let line = Line::from(value.as_str());
            if self.right_aligned.contains(&idx) {
                Cell::from(line.alignment(Alignment::Right))
            } else {
                Cell::from(line)
            }
        });
        Row::new(cells).height(1)
    }

    fn push_lines(&self, out: &mut String, rows: &[Vec<String>], widths: &[u16], inner: u16) {
        if rows.is_empty() {
            return;
        }

        let area = Rect::new(0, 0, inner, rows.len() as u16);
        let mut buf = Buffer::empty(area);
        let table = Table::new(
            rows.iter().map(|cells| self.row(cells)),
            widths.iter().map(|width| Constraint::Length(*width)),
        )
        .column_spacing(COLUMN_SPACING);
        Widget::render(table, area, &mut buf);

        for cells in buf.content().chunks(inner as usize) {
            out.push_str(line::NORMAL.vertical);
            // Cells hidden behind a wide grapheme hold a filler space.
            let mut hidden = 0;
            for cell in cells {
                if hidden > 0 {
                    hidden -= 1;
                    continue;
                }
                let symbol = cell.symbol();
                out.push_str(symbol);
                hidden = Span::raw(symbol).width().saturating_sub(1);
            }
            out.push_str(line::NORMAL.vertical);
            out.push('\n');
        }
    }
}
