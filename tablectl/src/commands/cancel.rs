use anyhow::Result;
use booking::ReservationActionResult;
use clap::Args;
use tracing::warn;

use super::Context;

#[derive(Args, Debug)]
pub struct CancelArgs {
    /// Reservation id
    pub id: String,
    /// Skip the modification-window check
    #[arg(long, action)]
    pub force: bool,
    #[arg(long, action)]
    pub json: bool,
}

pub async fn run(ctx: &Context, args: CancelArgs) -> Result<()> {
    let current = ctx.find(&args.id).await?;
    if !args.force {
        ctx.ensure_modifiable(&current, "cancel")?;
    } else if current.status.is_terminal() {
        warn!(
            reservation_id = %current.id,
            status = %current.status,
            "Forcing cancellation of a reservation in a terminal state"
        );
    }

    let result = match ctx.service.cancel(&args.id).await {
        Ok(()) => ReservationActionResult::ok(format!("Reservation {} cancelled", args.id)),
        Err(e) => ReservationActionResult::failed("Failed to cancel reservation", e.to_string()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.message);
    }

    if let Some(error) = result.error {
        anyhow::bail!(error);
    }
    Ok(())
}
