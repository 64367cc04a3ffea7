use anyhow::Result;
use clap::Args;

use super::Context;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Reservation id
    pub id: String,
    #[arg(long, action)]
    pub json: bool,
}

pub async fn run(ctx: &Context, args: CheckArgs) -> Result<()> {
    let reservation = ctx.find(&args.id).await?;
    let (info, message) = ctx.policy.describe(&reservation, ctx.now());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Reservation:    {}", reservation.id);
    println!("Status:         {}", policy::status_badge(&reservation.status).text);
    println!("Minutes left:   {}", info.minutes_until_reservation);
    println!("Deadline:       {}", info.deadline_time);
    println!("Can modify:     {}", if info.can_modify { "yes" } else { "no" });
    println!("Can cancel:     {}", if info.can_cancel { "yes" } else { "no" });
    if info.start_defaulted {
        println!("Note:           slot start unreadable, noon assumed");
    }
    println!("{}", message);
    Ok(())
}
