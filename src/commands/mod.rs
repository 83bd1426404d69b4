pub mod chart;
pub mod hello;
pub mod help;
pub mod market;
pub mod reply;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use serenity::model::channel::Message;
use serenity::prelude::Context;
use tracing::{debug, error, info};

use crate::services::chart_backend::ChartRenderer;
use crate::services::market_service::MarketData;
use reply::{ChannelReply, Reply};

/// A recognised chat command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Hello,
    Market,
    /// `!chart`, optionally followed by a lower-cased symbol
    Chart(Option<String>),
    Help,
}

impl Command {
    const CHART_PREFIX: &'static str = "!chart ";

    /// Exact matches only; `!chart <symbol>` is the one prefix form.
    pub fn parse(content: &str) -> Option<Command> {
        match content {
            "!HELLO" => Some(Command::Hello),
            "!Market" => Some(Command::Market),
            "!chart" => Some(Command::Chart(None)),
            "!Help" => Some(Command::Help),
            _ => content.strip_prefix(Self::CHART_PREFIX).map(|arg| {
                let symbol = arg.trim().to_lowercase();
                if symbol.is_empty() {
                    Command::Chart(None)
                } else {
                    Command::Chart(Some(symbol))
                }
            }),
        }
    }
}

/// Routes each inbound message to its command. Holds no per-message state.
pub struct Dispatcher {
    market: Arc<dyn MarketData>,
    charts: Arc<dyn ChartRenderer>,
    listing_limit: u32,
}

impl Dispatcher {
    pub fn new(market: Arc<dyn MarketData>, charts: Arc<dyn ChartRenderer>, listing_limit: u32) -> Self {
        Self {
            market,
            charts,
            listing_limit,
        }
    }

    pub async fn dispatch(&self, bot_id: u64, author_id: u64, content: &str, reply: &dyn Reply) {
        if author_id == bot_id {
            return;
        }

        let Some(command) = Command::parse(content) else {
            return;
        };
        info!("📨 {:?} from user {}", command, author_id);

        let result = match &command {
            Command::Hello => hello::execute(reply).await,
            Command::Market => market::execute(self.market.as_ref(), self.listing_limit, reply).await,
            Command::Chart(symbol) => chart::execute(self.charts.as_ref(), symbol.as_deref(), reply).await,
            Command::Help => help::execute(self.listing_limit, reply).await,
        };

        match result {
            Ok(()) => debug!("Finished {:?}", command),
            Err(e) => error!("❌ Error executing command {:?}: {}", command, e),
        }
    }
}

pub async fn handle_message(dispatcher: &Dispatcher, ctx: &Context, msg: &Message) {
    let bot_id = ctx.cache.current_user().id.get();
    let reply = ChannelReply::new(ctx, msg.channel_id);
    dispatcher
        .dispatch(bot_id, msg.author.id.get(), &msg.content, &reply)
        .await;
}
