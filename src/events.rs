//! Server membership bookkeeping: per-shard guild counts, presence text and
//! join/leave log notices.

use crate::render::{build_join_reply, build_leave_reply, Reply};
use crate::stats::StatsManager;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// A guild-create event arrives both for new joins and for every existing
/// guild at startup; only guilds joined this recently count as joins.
const JOIN_WINDOW_SECS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildInfo {
    pub id: u64,
    pub name: String,
    pub member_count: u64,
    pub channel_count: usize,
    pub icon_url: Option<String>,
    pub region: Option<String>,
    pub joined_at: DateTime<Utc>,
}

/// Outcome of a membership event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEvent {
    /// Notice for the join-log channel, with its id.
    pub log: Option<(u64, Reply)>,
    /// New presence text, e.g. `42 servers | ;invite`.
    pub presence: String,
    pub total_servers: usize,
}

pub struct ServerTracker {
    prefix: String,
    join_log: Option<u64>,
    stats: Arc<StatsManager>,
    shards: Mutex<Vec<usize>>,
}

impl ServerTracker {
    pub fn new(prefix: &str, join_log: Option<u64>, stats: Arc<StatsManager>) -> Self {
        Self {
            prefix: prefix.to_string(),
            join_log,
            stats,
            shards: Mutex::new(Vec::new()),
        }
    }

    /// Record a shard's initial guild count. Returns the presence text once
    /// every one of `total_shards` has reported.
    pub async fn shard_ready(
        &self,
        shard_id: usize,
        guild_count: usize,
        total_shards: usize,
    ) -> Option<String> {
        info!("[Shard {shard_id}] Ready");

        let (sum, ready) = {
            let mut shards = self.shards.lock().await;
            if shards.len() <= shard_id {
                shards.resize(shard_id + 1, 0);
            }
            shards[shard_id] = guild_count;
            (shards.iter().sum::<usize>(), shards.len() >= total_shards)
        };

        if !ready {
            return None;
        }

        info!("{total_shards} shard(s) ready");
        debug!("Existing in {sum} guilds");
        if self.stats.should_track() {
            self.stats.post_servers(sum).await;
        }
        Some(self.presence(sum))
    }

    /// Returns `None` for guilds that were already joined before startup.
    pub async fn guild_join(&self, shard_id: usize, guild: &GuildInfo) -> Option<ServerEvent> {
        self.guild_join_at(shard_id, guild, Utc::now()).await
    }

    pub async fn guild_join_at(
        &self,
        shard_id: usize,
        guild: &GuildInfo,
        now: DateTime<Utc>,
    ) -> Option<ServerEvent> {
        if guild.joined_at + Duration::seconds(JOIN_WINDOW_SECS) <= now {
            return None;
        }

        self.stats.new_server().await;
        let total_servers = self.adjust(shard_id, 1).await;
        info!("Joining {}", guild.name);

        Some(ServerEvent {
            log: self.join_log.map(|channel| (channel, build_join_reply(guild))),
            presence: self.presence(total_servers),
            total_servers,
        })
    }

    pub async fn guild_leave(&self, shard_id: usize, guild_id: u64, name: Option<&str>) -> ServerEvent {
        self.stats.leave_server().await;
        let total_servers = self.adjust(shard_id, -1).await;
        info!("Leaving {guild_id}");

        ServerEvent {
            log: self
                .join_log
                .map(|channel| (channel, build_leave_reply(guild_id, name))),
            presence: self.presence(total_servers),
            total_servers,
        }
    }

    pub async fn total_servers(&self) -> usize {
        self.shards.lock().await.iter().sum()
    }

    fn presence(&self, servers: usize) -> String {
        format!("{} servers | {}invite", servers, self.prefix)
    }

    async fn adjust(&self, shard_id: usize, delta: isize) -> usize {
        let mut shards = self.shards.lock().await;
        if shards.len() <= shard_id {
            warn!("Event for unknown shard {shard_id}");
            shards.resize(shard_id + 1, 0);
        }
        shards[shard_id] = shards[shard_id].saturating_add_signed(delta);
        shards.iter().sum()
    }
}
