use thiserror::Error;

/// Failure to deliver a notification to its recipient or channel.
///
/// Delivery errors are always non-fatal to a tick: the caller logs them and
/// moves on to the next recipient.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// The owner id cannot address a Discord user.
    #[error("Invalid notification recipient '{0}'")]
    InvalidRecipient(String),

    /// The recipient exists but could not be reached (DMs closed, channel gone).
    #[error("Recipient '{recipient}' is unreachable: {reason}")]
    Unreachable {
        /// Owner id or channel id the notice was addressed to
        recipient: String,
        /// Reason reported by the transport
        reason: String,
    },

    /// Discord API error from Serenity while sending.
    #[error(transparent)]
    Discord(#[from] Box<serenity::Error>),
}

impl From<serenity::Error> for DeliveryError {
    fn from(err: serenity::Error) -> Self {
        DeliveryError::Discord(Box::new(err))
    }
}
