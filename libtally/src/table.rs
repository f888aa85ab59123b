use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub content: String,
    pub pad_left: usize,
    pub pad_right: usize,
    pub align: Align,
}

impl Cell {
    pub fn new(content: impl Into<String>) -> Self {
        Cell {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn right(content: impl Into<String>) -> Self {
        Cell::new(content).align(Align::Right)
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn pad_left(mut self, pad: usize) -> Self {
        self.pad_left = pad;
        self
    }

    pub fn pad_right(mut self, pad: usize) -> Self {
        self.pad_right = pad;
        self
    }

    fn width(&self) -> usize {
        self.pad_left + self.content.chars().count() + self.pad_right
    }

    fn render(&self, width: usize) -> String {
        let padded = format!(
            "{}{}{}",
            " ".repeat(self.pad_left),
            self.content,
            " ".repeat(self.pad_right)
        );
        let slack = width.saturating_sub(self.width());
        let (left, right) = match self.align {
            Align::Left => (0, slack),
            Align::Right => (slack, 0),
            Align::Center => (slack / 2, slack - slack / 2),
        };
        format!("{}{}{}", " ".repeat(left), padded, " ".repeat(right))
    }
}

pub type Row = Vec<Cell>;

/// Column aligned plain text table. Rows may have differing cell counts,
/// missing cells render empty.
#[derive(Clone, Debug, Default)]
pub struct Table {
    titles: Option<Row>,
    rows: Vec<Row>,
}

const COLUMN_SEPARATOR: &str = " | ";

impl Table {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn set_titles(&mut self, titles: Row) {
        self.titles = Some(titles);
    }

    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    fn all_rows(&self) -> impl Iterator<Item = &Row> {
        self.titles.iter().chain(self.rows.iter())
    }

    fn column_widths(&self) -> Vec<usize> {
        let columns = self.all_rows().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0; columns];
        for row in self.all_rows() {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }
        widths
    }

    fn render_row(out: &mut String, row: &Row, widths: &[usize]) {
        let empty = Cell::default();
        let line = widths
            .iter()
            .enumerate()
            .map(|(idx, &width)| row.get(idx).unwrap_or(&empty).render(width))
            .collect::<Vec<_>>()
            .join(COLUMN_SEPARATOR);
        out.push_str(line.trim_end());
        out.push('\n');
    }

    fn render_separator(out: &mut String, widths: &[usize]) {
        let last = widths.len().saturating_sub(1);
        let line = widths
            .iter()
            .enumerate()
            .map(|(idx, &width)| {
                let gaps = usize::from(idx > 0) + usize::from(idx < last);
                "-".repeat(width + gaps)
            })
            .collect::<Vec<_>>()
            .join("+");
        out.push_str(&line);
        out.push('\n');
    }

    pub fn render_text(&self) -> String {
        let widths = self.column_widths();
        let mut out = String::new();

        if let Some(titles) = &self.titles {
            Self::render_row(&mut out, titles, &widths);
            Self::render_separator(&mut out, &widths);
        }
        for row in &self.rows {
            Self::render_row(&mut out, row, &widths);
        }
        out
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_text())
    }
}
