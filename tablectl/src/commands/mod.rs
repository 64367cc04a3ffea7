pub mod book;
pub mod cancel;
pub mod check;
pub mod edit;
pub mod list;

use anyhow::{anyhow, Context as _, Result};
use booking::Reservation;
use chrono::{DateTime, Utc};
use policy::{PolicyConfig, PolicyEngine};
use reservation_store::{FileStorage, OfflineRemote, ReservationService, StoreConfig};
use tracing::debug;

use crate::GlobalArgs;

/// Everything a subcommand needs: the routed store and the policy engine.
pub struct Context {
    pub service: ReservationService<OfflineRemote, FileStorage>,
    pub policy: PolicyEngine,
    now: Option<DateTime<Utc>>,
}

impl Context {
    pub fn from_args(args: &GlobalArgs) -> Result<Self> {
        let mut store_config = StoreConfig::from_env();
        if let Some(dir) = &args.store_dir {
            store_config.storage_dir = dir.clone();
        }
        if let Some(policy) = args.merge_policy {
            store_config.merge_policy = policy;
        }

        let mut policy_config = policy::load_from_env();
        if args.cutoff_minutes.is_some() || args.timezone.is_some() {
            let cutoff = args.cutoff_minutes.unwrap_or(policy_config.cutoff_minutes);
            let timezone = args
                .timezone
                .clone()
                .unwrap_or_else(|| policy_config.timezone.name().to_string());
            policy_config =
                PolicyConfig::new(cutoff, &timezone).context("Invalid policy options")?;
        }

        debug!(
            store_dir = %store_config.storage_dir.display(),
            merge_policy = %store_config.merge_policy,
            cutoff_minutes = policy_config.cutoff_minutes,
            timezone = policy_config.timezone.name(),
            "Resolved configuration"
        );

        let service = ReservationService::new(OfflineRemote, store_config.open_store())
            .with_merge_policy(store_config.merge_policy);

        Ok(Self {
            service,
            policy: PolicyEngine::new(policy_config),
            now: args.now,
        })
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }

    pub async fn find(&self, id: &str) -> Result<Reservation> {
        self.service
            .get(id)
            .await
            .ok_or_else(|| anyhow!("Reservation not found: {}", id))
    }

    /// Fail unless the policy still allows changing `reservation`.
    pub fn ensure_modifiable(&self, reservation: &Reservation, action: &str) -> Result<()> {
        let check = self
            .policy
            .validate_modification_allowed(reservation, self.now());
        if check.is_allowed {
            return Ok(());
        }
        let reason = check
            .reason
            .unwrap_or_else(|| policy::restriction::FALLBACK_RESTRICTION_MESSAGE.to_string());
        Err(anyhow!("Cannot {} reservation {}: {}", action, reservation.id, reason))
    }
}

pub fn clear(ctx: &Context) -> Result<()> {
    ctx.service
        .local()
        .clear()
        .context("Failed to clear local reservations")?;
    println!("All local reservations cleared");
    Ok(())
}
