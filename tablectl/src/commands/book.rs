use anyhow::{bail, Result};
use booking::{LocationContext, ReservationRequest};
use clap::Args;

use super::Context;

#[derive(Args, Debug)]
pub struct BookArgs {
    #[arg(long)]
    pub location_id: String,
    #[arg(long = "table")]
    pub table_number: String,
    /// Reservation date (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,
    /// Number of guests
    #[arg(long = "guests")]
    pub guests_number: String,
    /// Slot start, e.g. "7:00 p.m."
    #[arg(long = "from")]
    pub time_from: String,
    /// Slot end, e.g. "8:30 p.m."
    #[arg(long = "to")]
    pub time_to: String,
    /// Address shown on the reservation
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long, action)]
    pub json: bool,
}

pub async fn run(ctx: &Context, args: BookArgs) -> Result<()> {
    match args.guests_number.trim().parse::<u32>() {
        Ok(n) if n > 0 => {}
        _ => bail!("Guests must be a positive number, got '{}'", args.guests_number),
    }

    let request = ReservationRequest {
        location_id: args.location_id,
        table_number: args.table_number,
        date: args.date,
        guests_number: args.guests_number.trim().to_string(),
        time_from: args.time_from,
        time_to: args.time_to,
    };
    let context = args
        .address
        .map(LocationContext::new)
        .unwrap_or_default();

    let reservation = ctx.service.create(&request, &context).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reservation)?);
        return Ok(());
    }

    println!(
        "Reservation {} booked for {} {} ({} guests) at {}",
        reservation.id,
        booking::format_display_date(&reservation.date),
        reservation.time_slot,
        reservation.guests_number,
        reservation.location_address
    );
    let (_, message) = ctx.policy.describe(&reservation, ctx.now());
    println!("{}", message);
    Ok(())
}
