use crate::models::{tobacco::Tobacco, wishlist_item::WishlistItem};

pub const HELP_TEXT: &str = "Available commands:\n\
/search <query> - find tobaccos in the catalog\n\
/wishlist - show your wishlist\n\
/add <id> - add a tobacco to your wishlist\n\
/remove <id> - remove a tobacco from your wishlist\n\
/help - show this message";

pub const UNKNOWN_TEXT: &str = "I don't know that command. Use /help to see what I can do.";

pub const ERROR_TEXT: &str = "Something went wrong, please try again later.";

pub fn greeting(first_name: &str, has_webapp: bool) -> String {
    if has_webapp {
        format!(
            "Hi, {}! Open the app below to search tobaccos and keep your wishlist.",
            first_name
        )
    } else {
        format!("Hi, {}!\n\n{}", first_name, HELP_TEXT)
    }
}

pub fn tobacco_line(tobacco: &Tobacco) -> String {
    let title = match tobacco.brand.as_deref() {
        Some(brand) => format!("{} - {}", brand, tobacco.name),
        None => tobacco.name.clone(),
    };
    match tobacco.strength.as_deref() {
        Some(strength) => format!("{} [{}] (id: {})", title, strength, tobacco.id),
        None => format!("{} (id: {})", title, tobacco.id),
    }
}

pub fn search_results(query: &str, items: &[Tobacco], total: u64) -> String {
    if items.is_empty() {
        return format!("Nothing found for \"{}\".", query);
    }
    let mut lines = vec![format!("Results for \"{}\" ({} total):", query, total)];
    lines.extend(
        items
            .iter()
            .enumerate()
            .map(|(i, t)| format!("{}. {}", i + 1, tobacco_line(t))),
    );
    lines.join("\n")
}

pub fn wishlist(items: &[WishlistItem]) -> String {
    if items.is_empty() {
        return "Your wishlist is empty. Try /search to find something.".to_string();
    }
    let mut lines = vec![format!("Your wishlist ({}):", items.len())];
    for (i, item) in items.iter().enumerate() {
        let title = match (item.brand.as_deref(), item.name.as_deref()) {
            (Some(brand), Some(name)) => format!("{} - {}", brand, name),
            (None, Some(name)) => name.to_string(),
            (Some(brand), None) => brand.to_string(),
            (None, None) => "Unnamed".to_string(),
        };
        let mut line = format!("{}. {} (id: {})", i + 1, title, item.tobacco_id);
        if let Some(note) = &item.note {
            line.push_str(&format!("\n   {}", note));
        }
        lines.push(line);
    }
    lines.join("\n")
}
