use super::reply::{Reply, SendError};
use crate::utils::format::help_text;

pub async fn execute(listing_limit: u32, reply: &dyn Reply) -> Result<(), SendError> {
    reply.text(&help_text(listing_limit)).await
}
