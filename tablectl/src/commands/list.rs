use anyhow::Result;
use clap::Args;

use super::Context;

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Output machine-readable JSON
    #[arg(long, action)]
    pub json: bool,
}

pub async fn run(ctx: &Context, args: ListArgs) -> Result<()> {
    let reservations = ctx.service.list().await;
    let now = ctx.now();

    if args.json {
        let payload: Vec<_> = reservations
            .iter()
            .map(|r| {
                let info = ctx.policy.compute_restriction(r, now);
                let badge = policy::status_badge(&r.status);
                serde_json::json!({
                    "reservation": r,
                    "badge": badge,
                    "restriction": info,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if reservations.is_empty() {
        println!("No reservations.");
        return Ok(());
    }

    println!(
        "{:<32} {:<10} {:<13} {:<22} {:<7} {}",
        "ID", "STATUS", "DATE", "TIME", "GUESTS", "NOTE"
    );
    for r in &reservations {
        let (_, message) = ctx.policy.describe(r, now);
        println!(
            "{:<32} {:<10} {:<13} {:<22} {:<7} {}",
            r.id,
            policy::status_badge(&r.status).text,
            booking::format_display_date(&r.date),
            r.time_slot,
            r.guests_number,
            message
        );
    }

    Ok(())
}
