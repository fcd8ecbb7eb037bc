//! Line commands for the terminal client.
//!
//! ```text
//! category <name|all>   change the category selector
//! max <price>           move the max-price range control
//! cart <n>              press "Add to Cart" on the n-th visible card (1-based)
//! quit                  tear down the widget
//! search <text>         replace the search box text, even if it reads like a command
//! <anything else>       replace the search box text
//! ```

use shopfront_products::{CategoryFilter, Price};

use crate::controller::UiEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(UiEvent),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("invalid price: {0}")]
    InvalidPrice(String),
    #[error("invalid card number: {0}")]
    InvalidCard(String),
    #[error("missing argument for `{0}`")]
    MissingArgument(&'static str),
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let trimmed = line.trim();
    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (trimmed, ""),
    };

    match head {
        "quit" | "exit" if rest.is_empty() => Ok(Command::Quit),
        "search" => Ok(Command::Event(UiEvent::QueryInput(rest.to_string()))),
        "category" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("category"));
            }
            Ok(Command::Event(UiEvent::CategoryChanged(CategoryFilter::parse(rest))))
        }
        "max" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("max"));
            }
            let digits: String = rest.chars().filter(|c| *c != ',').collect();
            let amount = digits
                .parse::<u64>()
                .map_err(|_| CommandError::InvalidPrice(rest.to_string()))?;
            Ok(Command::Event(UiEvent::MaxPriceChanged(Price::new(amount))))
        }
        "cart" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("cart"));
            }
            let number = rest
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| CommandError::InvalidCard(rest.to_string()))?;
            Ok(Command::Event(UiEvent::AddToCart(number - 1)))
        }
        // Search box text is taken verbatim, including surrounding spaces.
        _ => Ok(Command::Event(UiEvent::QueryInput(line.to_string()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_control_commands() {
        assert_eq!(
            parse_command("category shoes"),
            Ok(Command::Event(UiEvent::CategoryChanged(CategoryFilter::parse("shoes"))))
        );
        assert_eq!(
            parse_command("category all"),
            Ok(Command::Event(UiEvent::CategoryChanged(CategoryFilter::All)))
        );
        assert_eq!(
            parse_command("max 1,00,000"),
            Ok(Command::Event(UiEvent::MaxPriceChanged(Price::new(100_000))))
        );
        assert_eq!(parse_command("cart 2"), Ok(Command::Event(UiEvent::AddToCart(1))));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
    }

    #[test]
    fn other_lines_are_query_text() {
        assert_eq!(
            parse_command("air max"),
            Ok(Command::Event(UiEvent::QueryInput("air max".to_string())))
        );
        assert_eq!(parse_command(""), Ok(Command::Event(UiEvent::QueryInput(String::new()))));
    }

    #[test]
    fn search_form_escapes_command_words() {
        for word in ["max", "category", "cart", "quit", "exit"] {
            assert_eq!(
                parse_command(&format!("search {word}")),
                Ok(Command::Event(UiEvent::QueryInput(word.to_string())))
            );
        }
        assert_eq!(
            parse_command("search air max"),
            Ok(Command::Event(UiEvent::QueryInput("air max".to_string())))
        );
        // A bare `search` clears the box.
        assert_eq!(parse_command("search"), Ok(Command::Event(UiEvent::QueryInput(String::new()))));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert_eq!(parse_command("max cheap"), Err(CommandError::InvalidPrice("cheap".to_string())));
        assert_eq!(parse_command("max -5"), Err(CommandError::InvalidPrice("-5".to_string())));
        assert_eq!(parse_command("cart 0"), Err(CommandError::InvalidCard("0".to_string())));
        assert_eq!(parse_command("category"), Err(CommandError::MissingArgument("category")));
    }
}
