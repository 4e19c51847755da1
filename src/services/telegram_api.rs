use reqwest::Client;

use crate::dto::telegram_dto::BotReply;
use crate::error::{Error, Result};
use crate::telegram_auth::BotToken;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Outbound Bot API calls.
#[derive(Clone)]
pub struct TelegramApi {
    client: Client,
    bot_token: BotToken,
    api_base: String,
}

impl TelegramApi {
    pub fn new(client: Client, bot_token: BotToken) -> Self {
        Self::with_base(client, bot_token, TELEGRAM_API_BASE.to_string())
    }

    pub fn with_base(client: Client, bot_token: BotToken, api_base: String) -> Self {
        Self {
            client,
            bot_token,
            api_base,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.bot_token.expose(), method)
    }

    pub async fn send_message(&self, reply: &BotReply) -> Result<()> {
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(reply)
            .send()
            .await
            // reqwest errors embed the URL, which carries the token.
            .map_err(|e| Error::Upstream(format!("sendMessage failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(chat_id = reply.chat_id, %status, body = %body, "Telegram API rejected message");
            return Err(Error::Upstream(format!("sendMessage returned {}", status)));
        }

        tracing::debug!(chat_id = reply.chat_id, "Sent Telegram message");
        Ok(())
    }
}
