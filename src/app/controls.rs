/// A line of user input from the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Restart,
    Quit,
    Help,
    Show,
    /// A cell label as rendered on the board, resolved by `BoardView::resolve`.
    Reveal(String),
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let input = line.trim();
        match input.to_ascii_lowercase().as_str() {
            "" => Self::Empty,
            "restart" | "r" | "new" => Self::Restart,
            "quit" | "q" | "exit" => Self::Quit,
            "help" | "h" | "?" => Self::Help,
            "show" | "board" | "ls" => Self::Show,
            _ => Self::Reveal(input.to_string()),
        }
    }
}

pub const HELP: &str = "\
Commands:
  <cell>    reveal a cell, e.g. A1 (question, then answer)
  show      redraw the board
  restart   start a new game with fresh categories
  help      show this message
  quit      leave the game";
