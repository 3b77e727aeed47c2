//! `desk` CLI: bookings, closures, quotes and daily reports from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Price a stay for a couple and a family of three without booking it
//! desk quote --check-in 2024-07-01 --check-out 2024-07-04 --room 2 --room 2+1
//!
//! # Book it
//! desk book --name Rossi --phone "333 1234567" \
//!     --check-in 2024-07-01 --check-out 2024-07-04 --room 2 --room 2+1
//!
//! # Close room 3 for maintenance
//! desk close --room 3 --from 2024-11-04 --to 2024-11-08 --reason "new floor"
//!
//! # Who is where today
//! desk overview
//!
//! # Use a different ledger file (or set FRONT_DESK_LEDGER)
//! desk --ledger /var/lib/desk/ledger.json list
//! ```

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use front_desk::desk::blocking_reason;
use front_desk::report::{self, RoomState};
use front_desk::{
    BookingRequest, BookingStatus, ClosureScope, CustomerType, DateRange, Desk, DeskError,
    GuestGroup, JsonFileRepository, SettingsPatch, TouristTaxStatus,
};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "desk", version, about = "Hotel front desk: rooms, bookings and stay pricing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Ledger file holding bookings, closures and rates
    #[arg(
        long,
        global = true,
        env = "FRONT_DESK_LEDGER",
        default_value = "front-desk.json"
    )]
    ledger: PathBuf,

    /// Log debug events to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the rooms and their capacity
    Rooms,
    /// Price a stay and show the rooms it would get, without booking
    Quote {
        #[command(flatten)]
        stay: StayArgs,
    },
    /// Create a booking
    Book {
        #[command(flatten)]
        guest: GuestArgs,
        #[command(flatten)]
        stay: StayArgs,
    },
    /// Replace a booking's details and re-assign its rooms
    Update {
        /// Booking id (e.g. bk-0001)
        id: String,
        #[command(flatten)]
        guest: GuestArgs,
        #[command(flatten)]
        stay: StayArgs,
    },
    /// Cancel a booking, freeing its rooms
    Cancel { id: String },
    /// Mark a booking as checked in
    CheckIn { id: String },
    /// Remove a booking from the ledger
    Delete { id: String },
    /// Print a booking as JSON
    Show { id: String },
    /// List bookings sorted by check-in
    List {
        /// Include cancelled bookings
        #[arg(long)]
        all: bool,
    },
    /// Close one room, or the whole property, over a date range
    Close {
        /// Room number (closes every room if omitted)
        #[arg(long)]
        room: Option<u32>,
        /// First closed night
        #[arg(long)]
        from: NaiveDate,
        /// Day the closure ends (exclusive)
        #[arg(long)]
        to: NaiveDate,
        #[arg(long)]
        reason: String,
    },
    /// Remove a closure
    Reopen { id: String },
    /// List closures
    Closures,
    /// Show or change nightly rates
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Room board for a day
    Overview {
        /// Day to show (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Arrivals and departures for a day
    Arrivals {
        /// Day to show (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Guest and revenue totals
    Analytics,
    /// Write the arrival notification sheet for a day
    Sheet {
        /// Day to export (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the current rates
    Show,
    /// Change one or more rates
    Set {
        #[arg(long)]
        single: Option<f64>,
        #[arg(long)]
        double: Option<f64>,
        #[arg(long)]
        third: Option<f64>,
        #[arg(long)]
        fourth: Option<f64>,
        #[arg(long)]
        child: Option<f64>,
    },
}

#[derive(Args)]
struct StayArgs {
    #[arg(long)]
    check_in: NaiveDate,
    #[arg(long)]
    check_out: NaiveDate,
    /// Guests for one room as ADULTS[+CHILDREN]; repeat for each room
    #[arg(long = "room", value_parser = parse_group, required = true)]
    rooms: Vec<GuestGroup>,
    /// Booking channel
    #[arg(long, value_enum, default_value_t = Channel::Private)]
    channel: Channel,
    /// Exempt every guest from the tourist tax
    #[arg(long)]
    exempt: bool,
}

#[derive(Args)]
struct GuestArgs {
    /// Guest name
    #[arg(long)]
    name: String,
    /// Phone number (optional for Booking.com reservations)
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Channel {
    Private,
    BookingCom,
}

impl From<Channel> for CustomerType {
    fn from(channel: Channel) -> Self {
        match channel {
            Channel::Private => CustomerType::Private,
            Channel::BookingCom => CustomerType::BookingCom,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    debug!(ledger = %cli.ledger.display(), "opening ledger");
    let mut desk = Desk::new(JsonFileRepository::new(&cli.ledger));

    match cli.command {
        Commands::Rooms => {
            for room in desk.rooms() {
                println!("{:>3}  {:<8}  sleeps {}", room.id, room.name, room.capacity);
            }
        }
        Commands::Quote { stay } => {
            let request = build_request(None, stay);
            let quote = desk
                .quote(&request, None)
                .map_err(|e| explain(&desk, &request, None, e))?;

            println!("Nights:      {}", quote.nights);
            for ar in &quote.assigned_rooms {
                println!(
                    "Room {}:      {} adults, {} children",
                    ar.room_id, ar.guests_adults, ar.guests_children
                );
            }
            println!("Price:       {:.2}", quote.price);
            println!("Tourist tax: {:.2}", quote.tourist_tax);
            println!("Total:       {:.2}", quote.total());
        }
        Commands::Book { guest, stay } => {
            let request = build_request(Some(guest), stay);
            let booking = desk
                .create_booking(request.clone())
                .map_err(|e| explain(&desk, &request, None, e))?;
            println!("Created {}", summary(&booking));
        }
        Commands::Update { id, guest, stay } => {
            let request = build_request(Some(guest), stay);
            let booking = desk
                .update_booking(&id, request.clone())
                .map_err(|e| explain(&desk, &request, Some(&id), e))?;
            println!("Updated {}", summary(&booking));
        }
        Commands::Cancel { id } => {
            let booking = desk
                .cancel_booking(&id)
                .with_context(|| format!("Failed to cancel {}", id))?;
            println!("Cancelled {}", booking.id);
        }
        Commands::CheckIn { id } => {
            let booking = desk
                .check_in(&id)
                .with_context(|| format!("Failed to check in {}", id))?;
            println!("Checked in {} ({})", booking.id, booking.name);
        }
        Commands::Delete { id } => {
            let booking = desk
                .delete_booking(&id)
                .with_context(|| format!("Failed to delete {}", id))?;
            println!("Deleted {}", booking.id);
        }
        Commands::Show { id } => {
            let booking = desk
                .get_booking(&id)?
                .with_context(|| format!("Booking not found: {}", id))?;
            println!("{}", serde_json::to_string_pretty(&booking)?);
        }
        Commands::List { all } => {
            for booking in desk.bookings()? {
                if all || booking.status != BookingStatus::Cancelled {
                    println!("{}", summary(&booking));
                }
            }
        }
        Commands::Close {
            room,
            from,
            to,
            reason,
        } => {
            let scope = room.map_or(ClosureScope::All, ClosureScope::Room);
            let closure = desk
                .add_closure(scope, DateRange::new(from, to), reason)
                .context("Failed to add closure")?;
            println!("Added closure {}", closure.id);
        }
        Commands::Reopen { id } => {
            let closure = desk
                .remove_closure(&id)
                .with_context(|| format!("Failed to remove closure {}", id))?;
            println!("Removed closure {}", closure.id);
        }
        Commands::Closures => {
            for c in desk.closures()? {
                let scope = match c.scope {
                    ClosureScope::All => "all rooms".to_string(),
                    ClosureScope::Room(id) => format!("room {}", id),
                };
                println!(
                    "{}  {}  {} -> {}  {}",
                    c.id, scope, c.period.start, c.period.end, c.reason
                );
            }
        }
        Commands::Settings { action } => {
            let settings = match action {
                SettingsAction::Show => desk.settings()?,
                SettingsAction::Set {
                    single,
                    double,
                    third,
                    fourth,
                    child,
                } => desk
                    .update_settings(&SettingsPatch {
                        single_room: single,
                        double_room: double,
                        third_adult: third,
                        fourth_adult: fourth,
                        child,
                    })
                    .context("Failed to update settings")?,
            };
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        Commands::Overview { date } => {
            let day = date.unwrap_or_else(today);
            let ledger = desk.ledger()?;
            println!("Rooms on {}", day.format("%d/%m/%Y"));
            for status in report::room_overview(desk.rooms(), day, &ledger.bookings, &ledger.closures) {
                let line = match status.state {
                    RoomState::Occupied {
                        booking_id,
                        guest_name,
                        adults,
                        children,
                    } => format!(
                        "occupied  {} ({}) {}A {}C",
                        guest_name, booking_id, adults, children
                    ),
                    RoomState::Closed { reason, .. } => format!("closed    {}", reason),
                    RoomState::Available => "available".to_string(),
                };
                println!("{:<8}  {}", status.room_name, line);
            }
        }
        Commands::Arrivals { date } => {
            let day = date.unwrap_or_else(today);
            let bookings = desk.bookings()?;
            println!("Arrivals on {}", day.format("%d/%m/%Y"));
            for b in report::arrivals_on(day, &bookings) {
                println!("  {}", summary(b));
            }
            println!("Departures on {}", day.format("%d/%m/%Y"));
            for b in report::departures_on(day, &bookings) {
                println!("  {}", summary(b));
            }
        }
        Commands::Analytics => {
            let stats = report::analytics(&desk.bookings()?);
            println!("Total guests:  {}", stats.total_guests);
            println!("Total revenue: {:.2}", stats.total_revenue);
            for m in &stats.monthly_revenue {
                println!("  {}  {:.2}", m.month, m.revenue);
            }
        }
        Commands::Sheet { date, output } => {
            let day = date.unwrap_or_else(today);
            let bookings = desk.bookings()?;
            match report::arrival_sheet(day, &bookings, desk.rooms()) {
                Some(sheet) => write_output(output.as_deref(), &sheet)?,
                None => println!("No arrivals on {}", day.format("%d/%m/%Y")),
            }
        }
    }

    Ok(())
}

/// Logs go to stderr. `RUST_LOG` sets the filter, defaulting to `warn`;
/// `--verbose` forces `debug`.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Parse `ADULTS[+CHILDREN]`, e.g. `2` or `2+1`.
fn parse_group(raw: &str) -> std::result::Result<GuestGroup, String> {
    let (adults, children) = match raw.split_once('+') {
        Some((a, c)) => (a, c),
        None => (raw, "0"),
    };
    let adults = adults
        .trim()
        .parse()
        .map_err(|_| format!("invalid adult count in '{}'", raw))?;
    let children = children
        .trim()
        .parse()
        .map_err(|_| format!("invalid child count in '{}'", raw))?;
    Ok(GuestGroup::new(adults, children))
}

fn build_request(guest: Option<GuestArgs>, stay: StayArgs) -> BookingRequest {
    let range = DateRange::new(stay.check_in, stay.check_out);
    let mut request = BookingRequest::new(String::new(), range, stay.rooms);
    request.customer_type = stay.channel.into();
    if stay.exempt {
        request.tourist_tax_status = TouristTaxStatus::Exempt;
    }
    if let Some(guest) = guest {
        request.name = guest.name;
        request.phone = guest.phone;
        request.email = guest.email;
        request.notes = guest.notes;
    }
    request
}

/// Attach the reason each room is taken when an allocation is rejected.
fn explain(
    desk: &Desk<JsonFileRepository>,
    request: &BookingRequest,
    exclude: Option<&str>,
    err: DeskError,
) -> anyhow::Error {
    if !matches!(err, DeskError::Allocation(_)) {
        return err.into();
    }
    let Ok(ledger) = desk.ledger() else {
        return err.into();
    };

    let blocked: Vec<String> = desk
        .rooms()
        .iter()
        .filter_map(|room| blocking_reason(room, &request.stay, &ledger, exclude))
        .collect();
    if blocked.is_empty() {
        return anyhow::Error::new(err).context("No room combination fits the requested guests");
    }
    anyhow::Error::new(err).context(format!(
        "No room combination fits the requested guests; unavailable: {}",
        blocked.join("; ")
    ))
}

fn summary(b: &front_desk::Booking) -> String {
    let rooms: Vec<String> = b
        .assigned_rooms
        .iter()
        .map(|ar| format!("R{} ({}A {}C)", ar.room_id, ar.guests_adults, ar.guests_children))
        .collect();
    format!(
        "{}  {}  {} -> {}  {}  price {:.2}  tax {:.2}  {:?}",
        b.id,
        b.name,
        b.stay.start,
        b.stay.end,
        rooms.join(", "),
        b.price,
        b.tourist_tax,
        b.status
    )
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
