#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Help,
    /// Empty when the user sent `/search` without a query.
    Search(String),
    Wishlist,
    Add(String),
    Remove(String),
    Unknown,
}

impl BotCommand {
    /// `/cmd@BotName args` is accepted as well as `/cmd args`.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let Some(rest) = text.strip_prefix('/') else {
            return BotCommand::Unknown;
        };

        let (head, args) = match rest.split_once(char::is_whitespace) {
            Some((head, args)) => (head, args.trim()),
            None => (rest, ""),
        };
        let name = head.split('@').next().unwrap_or_default().to_lowercase();

        match name.as_str() {
            "start" => BotCommand::Start,
            "help" => BotCommand::Help,
            "search" | "find" => BotCommand::Search(args.to_string()),
            "wishlist" | "list" => BotCommand::Wishlist,
            "add" => BotCommand::Add(args.to_string()),
            "remove" => BotCommand::Remove(args.to_string()),
            _ => BotCommand::Unknown,
        }
    }
}
