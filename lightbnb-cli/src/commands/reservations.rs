//! Reservations command - list a guest's reservations

use anyhow::Result;
use clap::Parser;
use lightbnb_db::{Store, DEFAULT_LIMIT};

use super::print_json;

#[derive(Parser, Debug)]
#[command(about = "List reservations made by a guest")]
pub struct ReservationsArgs {
    /// Guest user id
    #[arg(long)]
    pub guest_id: i32,

    /// Maximum number of reservations to return
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: u32,
}

pub async fn run_reservations(store: &dyn Store, args: ReservationsArgs) -> Result<()> {
    let reservations = store
        .get_all_reservations(args.guest_id, args.limit)
        .await?;
    tracing::debug!(count = reservations.len(), guest_id = args.guest_id, "reservations");
    print_json(&reservations)
}
