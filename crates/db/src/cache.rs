//! Per-context financial cache.
//!
//! Holds, for each (user, context), the context's cost centers, a window
//! of ledger entries, the most recent entries and the real cash balance.
//! Consumers call the narrowest reload after a mutation; subscribers are
//! told about every reload and clear through a broadcast channel.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use moka::future::Cache;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, DbErr};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

use caixa_core::calendar::month_window;
use caixa_core::cost_center::CostCenterContext;
use caixa_core::schedule::LedgerEntry;
use caixa_shared::config::CacheConfig;
use caixa_shared::types::UserId;

use crate::entities::centros_de_custo;
use crate::repositories::cost_center::{CostCenterFilter, CostCenterRepository};
use crate::repositories::ledger::{LedgerFilter, LedgerRepository};

/// Number of entries kept in the "recent" list.
pub const RECENT_ENTRIES: u64 = 100;

/// Capacity of the change notification channel.
const EVENT_CAPACITY: usize = 64;

/// Cache key.
type Key = (UserId, CostCenterContext);

/// What is cached for one (user, context).
#[derive(Debug, Clone, Serialize)]
pub struct ContextSnapshot {
    /// Context.
    pub context: CostCenterContext,
    /// Cost centers of the context, by name.
    pub cost_centers: Vec<centros_de_custo::Model>,
    /// Window covered by `windowed_entries`.
    pub period: (NaiveDate, NaiveDate),
    /// Entries scheduled inside `period`, in date order.
    pub windowed_entries: Vec<LedgerEntry>,
    /// Most recent entries by due date.
    pub recent_entries: Vec<LedgerEntry>,
    /// Realized balance.
    pub real_cash: Decimal,
    /// When the snapshot was built.
    pub refreshed_at: DateTime<Utc>,
}

/// Change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheEvent {
    /// Everything was refetched for a context.
    Reloaded(UserId, CostCenterContext),
    /// Only ledger entries were refetched.
    LedgerReloaded(UserId, CostCenterContext),
    /// Only the balance was recomputed.
    RealCashUpdated(UserId, CostCenterContext),
    /// Every snapshot was dropped.
    Cleared,
}

/// Financial cache service, owned by the composition root.
#[derive(Clone)]
pub struct FinancialCache {
    snapshots: Cache<Key, Arc<ContextSnapshot>>,
    ledger: LedgerRepository,
    cost_centers: CostCenterRepository,
    events: broadcast::Sender<CacheEvent>,
}

impl std::fmt::Debug for FinancialCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinancialCache")
            .field("entries", &self.snapshots.entry_count())
            .finish_non_exhaustive()
    }
}

impl FinancialCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new(db: DatabaseConnection, config: &CacheConfig) -> Self {
        let mut builder = Cache::builder().max_capacity(config.max_capacity);
        if let Some(ttl) = config.ttl_secs {
            builder = builder.time_to_live(Duration::from_secs(ttl));
        }
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            snapshots: builder.build(),
            ledger: LedgerRepository::new(db.clone()),
            cost_centers: CostCenterRepository::new(db),
            events,
        }
    }

    /// Receives an event after every reload or clear.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.events.subscribe()
    }

    /// Cached snapshot, if any, without touching the database.
    pub async fn cached(
        &self,
        user_id: UserId,
        context: CostCenterContext,
    ) -> Option<Arc<ContextSnapshot>> {
        self.snapshots.get(&(user_id, context)).await
    }

    /// Cached snapshot, loading it on a miss.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails.
    pub async fn snapshot(
        &self,
        user_id: UserId,
        context: CostCenterContext,
        today: NaiveDate,
    ) -> Result<Arc<ContextSnapshot>, DbErr> {
        match self.cached(user_id, context).await {
            Some(snapshot) => Ok(snapshot),
            None => self.reload(user_id, context, today).await,
        }
    }

    /// Refetches cost centers, the current month, recent entries and real cash.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails. The previous snapshot is kept.
    pub async fn reload(
        &self,
        user_id: UserId,
        context: CostCenterContext,
        today: NaiveDate,
    ) -> Result<Arc<ContextSnapshot>, DbErr> {
        let cost_centers = self
            .cost_centers
            .list(&CostCenterFilter {
                context: Some(context),
                ..CostCenterFilter::default()
            })
            .await?;
        let period = month_window(today);
        let (windowed_entries, recent_entries) =
            self.fetch_entries(user_id, context, period).await?;
        let real_cash = self.ledger.real_cash(user_id, context, today).await?;

        let snapshot = Arc::new(ContextSnapshot {
            context,
            cost_centers,
            period,
            windowed_entries,
            recent_entries,
            real_cash,
            refreshed_at: Utc::now(),
        });
        self.store(user_id, context, &snapshot, CacheEvent::Reloaded(user_id, context))
            .await;
        Ok(snapshot)
    }

    /// Refetches ledger entries for `period` (the current month when
    /// `None`) and the recent list, keeping cost centers and balance.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub async fn reload_ledger(
        &self,
        user_id: UserId,
        context: CostCenterContext,
        period: Option<(NaiveDate, NaiveDate)>,
        today: NaiveDate,
    ) -> Result<Arc<ContextSnapshot>, DbErr> {
        let Some(current) = self.cached(user_id, context).await else {
            return self.reload(user_id, context, today).await;
        };

        let period = period.unwrap_or_else(|| month_window(today));
        let (windowed_entries, recent_entries) =
            self.fetch_entries(user_id, context, period).await?;

        let snapshot = Arc::new(ContextSnapshot {
            period,
            windowed_entries,
            recent_entries,
            refreshed_at: Utc::now(),
            ..(*current).clone()
        });
        self.store(
            user_id,
            context,
            &snapshot,
            CacheEvent::LedgerReloaded(user_id, context),
        )
        .await;
        Ok(snapshot)
    }

    /// Recomputes only the real cash balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn update_real_cash(
        &self,
        user_id: UserId,
        context: CostCenterContext,
        today: NaiveDate,
    ) -> Result<Decimal, DbErr> {
        let Some(current) = self.cached(user_id, context).await else {
            return Ok(self.reload(user_id, context, today).await?.real_cash);
        };

        let real_cash = self.ledger.real_cash(user_id, context, today).await?;
        let snapshot = Arc::new(ContextSnapshot {
            real_cash,
            refreshed_at: Utc::now(),
            ..(*current).clone()
        });
        self.store(
            user_id,
            context,
            &snapshot,
            CacheEvent::RealCashUpdated(user_id, context),
        )
        .await;
        Ok(real_cash)
    }

    /// Drops every snapshot.
    pub fn clear(&self) {
        self.snapshots.invalidate_all();
        self.notify(CacheEvent::Cleared);
    }

    async fn fetch_entries(
        &self,
        user_id: UserId,
        context: CostCenterContext,
        (from, to): (NaiveDate, NaiveDate),
    ) -> Result<(Vec<LedgerEntry>, Vec<LedgerEntry>), DbErr> {
        let windowed = self.ledger.window(user_id, context, from, to).await?;
        let recent = self
            .ledger
            .list(
                user_id,
                &LedgerFilter {
                    context: Some(context),
                    limit: Some(RECENT_ENTRIES),
                    ..LedgerFilter::default()
                },
            )
            .await?;
        Ok((windowed, recent))
    }

    async fn store(
        &self,
        user_id: UserId,
        context: CostCenterContext,
        snapshot: &Arc<ContextSnapshot>,
        event: CacheEvent,
    ) {
        self.snapshots
            .insert((user_id, context), Arc::clone(snapshot))
            .await;
        debug!(
            user_id = %user_id,
            context = %context,
            real_cash = %snapshot.real_cash,
            entries = snapshot.windowed_entries.len(),
            "Financial cache refreshed"
        );
        self.notify(event);
    }

    fn notify(&self, event: CacheEvent) {
        // No receivers is not an error.
        let _ = self.events.send(event);
    }
}
