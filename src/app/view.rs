use crate::domain::model::Board;
use std::collections::HashMap;
use std::fmt::Write;

const COLUMN_WIDTH: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPosition {
    pub category: usize,
    pub clue: usize,
}

/// Terminal rendering of a board. Cell labels (`A1`, `B3`, …) are assigned once
/// when the view is built and map straight to board coordinates.
#[derive(Debug, Clone)]
pub struct BoardView {
    cells: HashMap<String, CellPosition>,
    columns: usize,
    rows: usize,
}

impl BoardView {
    pub fn new(board: &Board) -> Self {
        let shape = board.shape();
        let mut cells = HashMap::with_capacity(shape.categories * shape.clues_per_category);

        for category in 0..shape.categories {
            for clue in 0..shape.clues_per_category {
                cells.insert(cell_label(category, clue), CellPosition { category, clue });
            }
        }

        Self {
            cells,
            columns: shape.categories,
            rows: shape.clues_per_category,
        }
    }

    /// Case-insensitive lookup of a rendered cell label.
    pub fn resolve(&self, label: &str) -> Option<CellPosition> {
        self.cells.get(&label.trim().to_ascii_uppercase()).copied()
    }

    pub fn render(&self, board: &Board, placeholder: &str, recent_clue: Option<&str>) -> String {
        let mut out = String::new();

        let header: Vec<String> = board
            .categories()
            .iter()
            .take(self.columns)
            .enumerate()
            .map(|(i, c)| fit(&format!("{}: {}", column_label(i), c.title().to_uppercase())))
            .collect();
        let _ = writeln!(out, "    | {}", header.join(" | "));
        let _ = writeln!(
            out,
            "----+-{}",
            vec!["-".repeat(COLUMN_WIDTH); header.len()].join("-+-")
        );

        for row in 0..self.rows {
            let cells: Vec<String> = board
                .categories()
                .iter()
                .take(self.columns)
                .enumerate()
                .map(|(col, category)| {
                    let text = category
                        .clues()
                        .get(row)
                        .and_then(|clue| clue.display_text())
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("{} {}", cell_label(col, row), placeholder));
                    fit(&text)
                })
                .collect();
            let _ = writeln!(out, "{:>3} | {}", row + 1, cells.join(" | "));
        }

        if let Some(clue) = recent_clue {
            let _ = writeln!(out, "\nRecent clue: {}", clue);
        }

        out
    }
}

/// Column letters run A..Z, then AA, AB, …
pub fn column_label(index: usize) -> String {
    let mut label = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8(label).unwrap_or_default()
}

pub fn cell_label(category: usize, clue: usize) -> String {
    format!("{}{}", column_label(category), clue + 1)
}

fn fit(text: &str) -> String {
    let count = text.chars().count();
    if count <= COLUMN_WIDTH {
        format!("{:<width$}", text, width = COLUMN_WIDTH)
    } else {
        let truncated: String = text.chars().take(COLUMN_WIDTH - 1).collect();
        format!("{}…", truncated)
    }
}
