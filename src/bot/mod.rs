//! Chat-bot front end: turns incoming updates into replies.
//!
//! The dispatcher only builds [`BotReply`] values; delivering them is the
//! webhook route's job, which keeps command handling testable offline.

pub mod commands;
pub mod format;

use serde_json::json;

use crate::dto::{
    telegram_dto::{BotReply, TelegramMessage, TelegramUpdate},
    wishlist_dto::AddWishlistItemPayload,
};
use crate::error::{Error, Result};
use crate::services::{catalog_service::CatalogService, wishlist_service::WishlistService};
use commands::BotCommand;

const BOT_SEARCH_LIMIT: u32 = 5;

#[derive(Clone)]
pub struct BotService {
    wishlist: WishlistService,
    catalog: CatalogService,
    webapp_url: Option<String>,
}

impl BotService {
    pub fn new(
        wishlist: WishlistService,
        catalog: CatalogService,
        webapp_url: Option<String>,
    ) -> Self {
        Self {
            wishlist,
            catalog,
            webapp_url,
        }
    }

    /// `None` for updates that need no answer (no text, no sender, bots).
    pub async fn handle_update(&self, update: &TelegramUpdate) -> Option<BotReply> {
        let message = update.message.as_ref()?;
        let text = message.text.as_deref()?;
        let from = message.from.as_ref().filter(|u| !u.is_bot)?;

        let command = BotCommand::parse(text);
        tracing::info!(
            update_id = update.update_id,
            user_id = from.id,
            command = ?command,
            "Handling bot command"
        );

        let reply = match self.dispatch(message, from.id, &from.first_name, command).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, user_id = from.id, "Bot command failed");
                text_reply(message, format::ERROR_TEXT)
            }
        };
        Some(reply)
    }

    async fn dispatch(
        &self,
        message: &TelegramMessage,
        user_id: i64,
        first_name: &str,
        command: BotCommand,
    ) -> Result<BotReply> {
        match command {
            BotCommand::Start => Ok(self.start(message, first_name)),
            BotCommand::Help => Ok(text_reply(message, format::HELP_TEXT)),
            BotCommand::Unknown => Ok(text_reply(message, format::UNKNOWN_TEXT)),
            BotCommand::Search(query) if query.is_empty() => {
                Ok(text_reply(message, "Usage: /search <query>"))
            }
            BotCommand::Search(query) => {
                let (page, _) = self
                    .catalog
                    .search(&query, Some(1), Some(BOT_SEARCH_LIMIT))
                    .await?;
                Ok(text_reply(
                    message,
                    &format::search_results(&query, &page.items, page.total),
                ))
            }
            BotCommand::Wishlist => {
                let items = self.wishlist.list(user_id).await?;
                Ok(text_reply(message, &format::wishlist(&items)))
            }
            BotCommand::Add(id) if id.is_empty() => Ok(text_reply(message, "Usage: /add <id>")),
            BotCommand::Add(id) => {
                let tobacco = self.catalog.get_tobacco(&id).await?;
                let title = format::tobacco_line(&tobacco);
                let (_, created) = self
                    .wishlist
                    .add(
                        user_id,
                        AddWishlistItemPayload {
                            tobacco_id: tobacco.id,
                            brand: tobacco.brand,
                            name: Some(tobacco.name),
                            note: None,
                        },
                    )
                    .await?;
                let text = if created {
                    format!("Added {} to your wishlist.", title)
                } else {
                    format!("{} is already on your wishlist.", title)
                };
                Ok(text_reply(message, &text))
            }
            BotCommand::Remove(id) if id.is_empty() => {
                Ok(text_reply(message, "Usage: /remove <id>"))
            }
            BotCommand::Remove(id) => match self.wishlist.remove(user_id, &id).await {
                Ok(item) => Ok(text_reply(
                    message,
                    &format!("Removed {} from your wishlist.", item.tobacco_id),
                )),
                Err(Error::NotFound(_)) => Ok(text_reply(
                    message,
                    &format!("{} is not on your wishlist.", id),
                )),
                Err(e) => Err(e),
            },
        }
    }

    fn start(&self, message: &TelegramMessage, first_name: &str) -> BotReply {
        let mut reply = text_reply(
            message,
            &format::greeting(first_name, self.webapp_url.is_some()),
        );
        if let Some(url) = &self.webapp_url {
            reply.reply_markup = Some(json!({
                "inline_keyboard": [[
                    {
                        "text": "Open wishlist",
                        "web_app": { "url": url }
                    }
                ]]
            }));
        }
        reply
    }
}

fn text_reply(message: &TelegramMessage, text: &str) -> BotReply {
    BotReply {
        chat_id: message.chat.id,
        text: text.to_string(),
        reply_markup: None,
    }
}
