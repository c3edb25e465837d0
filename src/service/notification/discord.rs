//! Discord-backed notification delivery.
//!
//! Owner notices go out as direct-message embeds, crash announcements as an embed
//! in the configured channel. Every event is also published on the [`EventBus`].

use std::sync::Arc;

use async_trait::async_trait;
use serenity::{
    all::{ChannelId, CreateEmbed, CreateMessage, Timestamp, UserId},
    http::Http,
};

use crate::{
    error::delivery::DeliveryError,
    model::event::{CrashEvent, MarketEvent, PriceUpdate},
    service::event_bus::EventBus,
};

use super::{NotificationDispatcher, OwnerNotice};

const ALERT_COLOR: u32 = 0x3498db;
const CANCELLED_COLOR: u32 = 0x95a5a6;
const CRASH_COLOR: u32 = 0xe74c3c;

pub struct DiscordNotifier {
    http: Arc<Http>,
    bus: EventBus,
    /// Channel receiving crash announcements; `None` publishes to the bus only.
    crash_channel_id: Option<u64>,
}

impl DiscordNotifier {
    pub fn new(http: Arc<Http>, bus: EventBus, crash_channel_id: Option<u64>) -> Self {
        Self {
            http,
            bus,
            crash_channel_id,
        }
    }

    /// Parses a stored owner id into a Discord user id.
    ///
    /// # Returns
    /// - `Ok(UserId)` - Non-zero numeric id
    /// - `Err(DeliveryError::InvalidRecipient)` - Not a number, or zero
    fn parse_recipient(owner_id: &str) -> Result<UserId, DeliveryError> {
        match owner_id.trim().parse::<u64>() {
            Ok(id) if id != 0 => Ok(UserId::new(id)),
            _ => Err(DeliveryError::InvalidRecipient(owner_id.to_string())),
        }
    }

    fn crash_embed(event: &CrashEvent) -> CreateEmbed {
        let embed = CreateEmbed::new()
            .title(format!("{} crashed", event.symbol))
            .color(CRASH_COLOR)
            .description(format!(
                "**{}** ({}) fell to {} and crashed to 0. {} alert(s) were cancelled.",
                event.name,
                event.symbol,
                event.last_price.normalize(),
                event.cancelled_alerts
            ));

        match Timestamp::from_unix_timestamp(event.crashed_at.timestamp()) {
            Ok(timestamp) => embed.timestamp(timestamp),
            Err(_) => embed,
        }
    }
}

#[async_trait]
impl NotificationDispatcher for DiscordNotifier {
    async fn notify_owner(
        &self,
        owner_id: &str,
        notice: &OwnerNotice,
    ) -> Result<(), DeliveryError> {
        let user_id = Self::parse_recipient(owner_id)?;

        let color = match notice {
            OwnerNotice::AlertTriggered { .. } => ALERT_COLOR,
            OwnerNotice::AlertCancelled { .. } => CANCELLED_COLOR,
        };
        let embed = CreateEmbed::new()
            .title(notice.title())
            .color(color)
            .description(notice.message());

        let channel = user_id
            .create_dm_channel(self.http.as_ref())
            .await
            .map_err(|e| DeliveryError::Unreachable {
                recipient: owner_id.to_string(),
                reason: e.to_string(),
            })?;

        channel
            .send_message(self.http.as_ref(), CreateMessage::new().embed(embed))
            .await?;

        tracing::debug!("Sent '{}' notice to owner {}", notice.title(), owner_id);

        Ok(())
    }

    async fn publish_crash(&self, event: &CrashEvent) -> Result<(), DeliveryError> {
        self.bus.publish(MarketEvent::TokenCrashed(event.clone()));

        let Some(channel_id) = self.crash_channel_id else {
            return Ok(());
        };

        ChannelId::new(channel_id)
            .send_message(
                self.http.as_ref(),
                CreateMessage::new().embed(Self::crash_embed(event)),
            )
            .await?;

        tracing::info!(
            "Announced crash of {} in channel {}",
            event.symbol,
            channel_id
        );

        Ok(())
    }

    async fn publish_price_update(&self, update: &PriceUpdate) {
        let receivers = self.bus.publish(MarketEvent::PriceUpdated(update.clone()));
        tracing::trace!(
            "Published {} price {} to {} subscriber(s)",
            update.symbol,
            update.new_price,
            receivers
        );
    }
}
