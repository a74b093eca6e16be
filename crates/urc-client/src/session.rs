//! Interactive session commands

/// One line of interactive input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `:list`
    List,
    /// `:division <name>` or `:d <name>`
    Select(String),
    /// `:reload`
    Reload,
    /// `:help`
    Help,
    /// `:quit` / `:q`, or end of input
    Quit,
    /// Anything else is a car number query (may be empty)
    Query(String),
    /// A `:`-command that is not recognised
    Unknown(String),
}

pub const HELP: &str = "\
Type a car number to look up a driver.
  :list              show divisions
  :division <name>   select a division (alias :d)
  :reload            fetch the current division again
  :quit              exit";

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(rest) = line.trim_start().strip_prefix(':') else {
            return Command::Query(line.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name.to_lowercase().as_str() {
            "list" | "l" => Command::List,
            "division" | "d" if !arg.is_empty() => Command::Select(arg.to_string()),
            "reload" | "r" => Command::Reload,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => Command::Unknown(line.trim().to_string()),
        }
    }
}
