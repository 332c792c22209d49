use ranking_core::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    Select(Category),
    Refresh,
    List,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown command or category: {0} (type `help`)")]
pub struct UnknownCommand(pub String);

/// Parses one line typed at the prompt. Blank lines are `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<UserCommand>, UnknownCommand> {
    let word = line.trim();
    if word.is_empty() {
        return Ok(None);
    }
    let command = match word.to_ascii_lowercase().as_str() {
        "r" | "refresh" => UserCommand::Refresh,
        "l" | "list" => UserCommand::List,
        "h" | "help" | "?" => UserCommand::Help,
        "q" | "quit" | "exit" => UserCommand::Quit,
        _ => UserCommand::Select(
            word.parse::<Category>()
                .map_err(|_| UnknownCommand(word.to_string()))?,
        ),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::{parse_command, UnknownCommand, UserCommand};
    use ranking_core::Category;

    #[test]
    fn keywords_and_categories() {
        assert_eq!(parse_command(" R "), Ok(Some(UserCommand::Refresh)));
        assert_eq!(parse_command("quit"), Ok(Some(UserCommand::Quit)));
        assert_eq!(parse_command("l"), Ok(Some(UserCommand::List)));
        assert_eq!(
            parse_command("sweets"),
            Ok(Some(UserCommand::Select(Category::Sweets)))
        );
        assert_eq!(
            parse_command("0"),
            Ok(Some(UserCommand::Select(Category::All)))
        );
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(parse_command("   "), Ok(None));
        assert_eq!(
            parse_command("garden"),
            Err(UnknownCommand("garden".to_string()))
        );
    }
}
