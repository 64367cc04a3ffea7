use anyhow::{bail, Result};
use booking::ReservationUpdate;
use clap::Args;
use tracing::info;

use super::Context;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Reservation id
    pub id: String,
    /// New date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
    /// New slot start; requires --to
    #[arg(long = "from", requires = "time_to")]
    pub time_from: Option<String>,
    /// New slot end; requires --from
    #[arg(long = "to", requires = "time_from")]
    pub time_to: Option<String>,
    /// New number of guests
    #[arg(long = "guests")]
    pub guests_number: Option<String>,
    /// Skip the modification-window check
    #[arg(long, action)]
    pub force: bool,
}

pub async fn run(ctx: &Context, args: EditArgs) -> Result<()> {
    let update = ReservationUpdate {
        date: args.date,
        guests_number: args.guests_number,
        time_from: args.time_from,
        time_to: args.time_to,
        ..Default::default()
    };
    if update.date.is_none() && update.guests_number.is_none() && update.time_slot().is_none() {
        bail!("Nothing to change: pass --date, --from/--to or --guests");
    }

    let current = ctx.find(&args.id).await?;
    if args.force {
        info!(reservation_id = %current.id, "Skipping modification window check");
    } else {
        ctx.ensure_modifiable(&current, "edit")?;
    }

    let updated = ctx.service.update(&args.id, &update).await?;
    println!(
        "Reservation {} updated: {} {} ({} guests)",
        updated.id,
        booking::format_display_date(&updated.date),
        updated.time_slot,
        updated.guests_number
    );
    Ok(())
}
