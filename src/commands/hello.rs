use super::reply::{Reply, SendError};

pub const GREETING: &str = "JELLOOOOOO!";

pub async fn execute(reply: &dyn Reply) -> Result<(), SendError> {
    reply.text(GREETING).await
}
