use crate::core::{ResolvedVariables, Variable};
use std::fmt;
use yansi::{Color, Paint, Style};

const HEADERS: [&str; 6] = ["Name", "Value", "Type", "Original", "Source", "Path"];
const DEFAULT_WRAP: usize = 50;
const GAP: &str = "  ";

/// Tabular view of resolved variables.
///
/// Long values and originals are wrapped at 50 characters by default.
///
/// # Examples
///
/// ```rust
/// use kosei::console::Table;
/// use kosei::prelude::*;
///
/// # fn example() -> Result<()> {
/// let mut config = Configuration::new(Vec::new());
/// config.declare(Declaration::new("PORT", Type::Integer))?;
/// config.bind([("PORT", "8080")])?;
/// config.validate()?;
///
/// let vars = config.snapshot()?;
/// let table = Table::new(&vars).colored(false).to_string();
/// assert!(table.contains("OVERRIDDEN"));
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Table<'a> {
    vars: &'a ResolvedVariables,
    colored: bool,
    wrap: usize,
}

impl<'a> Table<'a> {
    /// Create a colored table.
    pub fn new(vars: &'a ResolvedVariables) -> Self {
        Self {
            vars,
            colored: true,
            wrap: DEFAULT_WRAP,
        }
    }

    /// Enable or disable ANSI colors.
    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Wrap values and originals at `width` characters.
    pub fn wrap_at(mut self, width: usize) -> Self {
        self.wrap = width.max(1);
        self
    }

    fn row(&self, var: &Variable) -> [(Vec<String>, Style); 6] {
        let path = var
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        [
            (vec![var.name.clone()], Style::new().fg(Color::Blue).bold()),
            (
                wrap(&var.value.to_string(), self.wrap),
                Style::new().fg(Color::Yellow),
            ),
            (vec![var.ty.name().to_string()], Style::new().fg(Color::Cyan)),
            (
                wrap(&format!("\"{}\"", var.original), self.wrap),
                Style::new(),
            ),
            (
                vec![var.source.as_str().to_string()],
                Style::new().fg(var.source.color()),
            ),
            (vec![path], Style::new()),
        ]
    }

    fn write_line(
        &self,
        f: &mut fmt::Formatter<'_>,
        widths: &[usize; 6],
        cells: [(&str, Style); 6],
    ) -> fmt::Result {
        let mut line = String::new();
        for (i, (text, style)) in cells.into_iter().enumerate() {
            if i > 0 {
                line.push_str(GAP);
            }
            if self.colored && !text.is_empty() {
                line.push_str(&text.paint(style).to_string());
            } else {
                line.push_str(text);
            }
            let len = text.chars().count();
            line.extend(std::iter::repeat_n(' ', widths[i].saturating_sub(len)));
        }
        writeln!(f, "{}", line.trim_end())
    }
}

impl fmt::Display for Table<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<_> = self.vars.iter().map(|var| self.row(var)).collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &rows {
            for (i, (lines, _)) in row.iter().enumerate() {
                for line in lines {
                    widths[i] = widths[i].max(line.chars().count());
                }
            }
        }

        let bold = Style::new().bold();
        self.write_line(f, &widths, HEADERS.map(|h| (h, bold)))?;

        let rules = widths.map(|w| "-".repeat(w));
        self.write_line(
            f,
            &widths,
            std::array::from_fn(|i| (rules[i].as_str(), Style::new())),
        )?;

        for row in &rows {
            let height = row.iter().map(|(lines, _)| lines.len()).max().unwrap_or(1);
            for n in 0..height {
                let cells = std::array::from_fn(|i| {
                    let (lines, style) = &row[i];
                    (lines.get(n).map(String::as_str).unwrap_or(""), *style)
                });
                self.write_line(f, &widths, cells)?;
            }
        }
        Ok(())
    }
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(width).map(|chunk| chunk.iter().collect()).collect()
}
