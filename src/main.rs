use clap::{Parser, Subcommand};
use tracing::{info, warn};

mod api;
mod availability;
mod config;
mod domain;
mod error;
mod logging;
mod permissions;
mod venues;

use crate::api::{ApiClient, Session};
use crate::availability::{
    booking_allowed, compute_summary, BlockedDaySet, CandidateRange, Day,
};
use crate::config::Config;
use crate::domain::{NewBooking, VenueSubmission};
use crate::error::{BookerError, Result};
use crate::permissions::{venue_permission, Permission, Role};
use crate::venues::{extract_uuid, filter_venues, sort_venues, VenueSort};
use chrono::Local;
use uuid::Uuid;

const SESSION_FILE: &str = ".venue-booker/session.json";

#[derive(Parser)]
#[command(name = "venue-booker")]
#[command(about = "Browse holiday venues, check availability, and manage bookings")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new profile
    Register {
        name: String,
        email: String,
        password: String,
        /// Register as a venue manager
        #[arg(long)]
        manager: bool,
    },
    /// Log in and store the session locally
    Login { email: String, password: String },
    /// Drop the stored session
    Logout,
    /// List venues, optionally filtered and sorted
    Venues {
        /// Server-side search over name and description
        #[arg(long)]
        query: Option<String>,
        /// Local free-text filter, also matching location fields
        #[arg(long)]
        filter: Option<String>,
        /// Sort order: price, price-desc, rating, name, newest
        #[arg(long)]
        sort: Option<String>,
    },
    /// Show one venue with its availability calendar
    Venue {
        /// Venue id, or any text containing one (e.g. a pasted link)
        venue: String,
        /// Days of calendar to display
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
    /// Price a stay without submitting anything
    Quote {
        venue: String,
        /// Check-in date (YYYY-MM-DD)
        from: String,
        /// Check-out date (YYYY-MM-DD)
        to: String,
    },
    /// Book a stay at a venue
    Book {
        venue: String,
        /// Check-in date (YYYY-MM-DD)
        from: String,
        /// Check-out date (YYYY-MM-DD)
        to: String,
        #[arg(long, default_value_t = 1)]
        guests: u32,
    },
    /// Cancel one of your bookings
    Cancel { booking_id: Uuid },
    /// List your upcoming bookings
    MyBookings,
    /// List your venue listings and their bookings (managers)
    MyVenues,
    /// Create a venue listing (managers)
    CreateVenue {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        max_guests: u32,
    },
    /// Replace a venue listing's core details (managers)
    UpdateVenue {
        venue: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        max_guests: Option<u32>,
    },
    /// Delete a venue listing (managers)
    DeleteVenue { venue: String },
}

fn resolve_venue_id(input: &str) -> Result<Uuid> {
    let candidate = extract_uuid(input)
        .ok_or_else(|| BookerError::MissingField(format!("no venue id found in '{input}'")))?;
    candidate
        .parse()
        .map_err(|_| BookerError::MissingField(format!("'{candidate}' is not a valid venue id")))
}

fn parse_day(input: &str) -> Result<Day> {
    Day::parse_iso(input)
        .ok_or_else(|| BookerError::MissingField(format!("'{input}' is not a date (YYYY-MM-DD)")))
}

fn today() -> Day {
    Day::from_date(Local::now().date_naive())
}

/// Refuses venue edits up front when the stored session is not the
/// owning manager; the server would reject them anyway, this just
/// gives a clearer message.
fn ensure_manageable(client: &ApiClient, venue: &domain::Venue) -> Result<()> {
    let session = client
        .current_session()
        .ok_or_else(|| BookerError::Auth("this command requires `venue-booker login` first".into()))?;
    let owner = venue
        .owner
        .as_ref()
        .ok_or_else(|| BookerError::MissingField("venue owner".into()))?;
    let role = if session.venue_manager { Role::VenueManager } else { Role::Customer };
    match venue_permission(Some(&session.name), &owner.name, role) {
        Permission::Full => Ok(()),
        Permission::ReadOnly | Permission::Denied => Err(BookerError::Auth(format!(
            "venue '{}' is managed by {}, not {}",
            venue.name, owner.name, session.name
        ))),
    }
}

async fn show_venue(client: &ApiClient, venue_input: &str, days: u32) -> Result<()> {
    let id = resolve_venue_id(venue_input)?;
    let venue = client.venue_with_bookings(id).await?;
    let blocked = BlockedDaySet::build(&venue.bookings);
    if blocked.skipped_bookings() > 0 {
        warn!(
            "{} bookings had malformed or empty date ranges and were ignored",
            blocked.skipped_bookings()
        );
    }

    println!(
        "\n🏠 {}: {:.2} per night, up to {} guests",
        venue.name, venue.price, venue.max_guests
    );
    if let Some(location) = &venue.location {
        let place: Vec<&str> = [&location.city, &location.country]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect();
        if !place.is_empty() {
            println!("   {}", place.join(", "));
        }
    }
    if !venue.description.is_empty() {
        println!("   {}", venue.description);
    }

    let start = today();
    println!("\n📅 Next {days} days (✅ open, ❌ taken or past):");
    let mut day = start;
    for _ in 0..days {
        let mark = if blocked.is_selectable(day, start) { "✅" } else { "❌" };
        println!("   {mark} {day}");
        day = day.succ();
    }
    Ok(())
}

async fn book(
    client: &ApiClient,
    venue_input: &str,
    from: &str,
    to: &str,
    guests: u32,
) -> Result<()> {
    let id = resolve_venue_id(venue_input)?;
    let start = parse_day(from)?;
    let end = parse_day(to)?;

    // Fresh fetch so the index reflects the latest booking list; the
    // server still has the final say on conflicts.
    let venue = client.venue_with_bookings(id).await?;
    let blocked = BlockedDaySet::build(&venue.bookings);
    let range = CandidateRange::new(start, end);

    if let Err(reason) = booking_allowed(&range, &blocked, guests, venue.max_guests) {
        println!("❌ Cannot book: {reason}");
        return Ok(());
    }
    let summary = compute_summary(start, end, venue.price);
    if summary.nights == 0 {
        println!("❌ Cannot book: stay must be at least one night");
        return Ok(());
    }

    let booking = NewBooking {
        date_from: start.to_string(),
        date_to: end.to_string(),
        guests,
        venue_id: id,
    };
    let created = client.create_booking(&booking).await?;
    info!("Booking confirmed");
    println!(
        "✅ Booked {} for {} nights, {} guests, total {:.2}",
        venue.name, summary.nights, created.guests, summary.total
    );
    Ok(())
}

async fn quote(client: &ApiClient, venue_input: &str, from: &str, to: &str) -> Result<()> {
    let id = resolve_venue_id(venue_input)?;
    let start = parse_day(from)?;
    let end = parse_day(to)?;

    let venue = client.venue_with_bookings(id).await?;
    let blocked = BlockedDaySet::build(&venue.bookings);
    let summary = compute_summary(start, end, venue.price);

    match availability::validate_range(&CandidateRange::new(start, end), &blocked) {
        Ok(()) => println!(
            "💰 {}: {} nights at {:.2}, total {:.2}",
            venue.name, summary.nights, venue.price, summary.total
        ),
        Err(reason) => println!("❌ {reason}"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;
    let session = Session::load(SESSION_FILE)?;

    match cli.command {
        Commands::Register { name, email, password, manager } => {
            let client = ApiClient::new(&config.api, None)?;
            let profile = client.register(&name, &email, &password, manager).await?;
            println!("✅ Registered {} ({})", profile.name, profile.email);
        }
        Commands::Login { email, password } => {
            let client = ApiClient::new(&config.api, None)?;
            let session = client.login(&email, &password).await?;
            session.save(SESSION_FILE)?;
            println!("✅ Logged in as {}", session.name);
        }
        Commands::Logout => {
            Session::clear(SESSION_FILE)?;
            println!("✅ Logged out");
        }
        Commands::Venues { query, filter, sort } => {
            let client = ApiClient::new(&config.api, session)?;
            let mut venues = client.list_venues(query.as_deref()).await?;
            if let Some(needle) = &filter {
                venues = filter_venues(&venues, needle);
            }
            if let Some(order) = sort {
                match VenueSort::parse(&order) {
                    Some(order) => sort_venues(&mut venues, order),
                    None => warn!("Unknown sort order '{order}', leaving API order"),
                }
            }
            println!("\n🏠 {} venues:", venues.len());
            for venue in &venues {
                println!(
                    "   {}  {:.2}/night  ⭐{:.1}  {}",
                    venue.id, venue.price, venue.rating, venue.name
                );
            }
        }
        Commands::Venue { venue, days } => {
            let client = ApiClient::new(&config.api, session)?;
            show_venue(&client, &venue, days).await?;
        }
        Commands::Quote { venue, from, to } => {
            let client = ApiClient::new(&config.api, session)?;
            quote(&client, &venue, &from, &to).await?;
        }
        Commands::Book { venue, from, to, guests } => {
            let client = ApiClient::new(&config.api, session)?;
            book(&client, &venue, &from, &to, guests).await?;
        }
        Commands::Cancel { booking_id } => {
            let client = ApiClient::new(&config.api, session)?;
            client.delete_booking(booking_id).await?;
            println!("✅ Booking {booking_id} cancelled");
        }
        Commands::MyBookings => {
            let client = ApiClient::new(&config.api, session)?;
            let name = client.session_name()?.to_string();
            let bookings = client.profile_bookings(&name).await?;
            println!("\n📖 {} bookings for {}:", bookings.len(), name);
            for booking in &bookings {
                let venue_name = booking
                    .venue
                    .as_ref()
                    .map(|v| v.name.as_str())
                    .unwrap_or("(unknown venue)");
                println!(
                    "   {}  {} → {}  {} guests  {}",
                    booking.id.map(|id| id.to_string()).unwrap_or_default(),
                    booking.date_from,
                    booking.date_to,
                    booking.guests,
                    venue_name
                );
            }
        }
        Commands::MyVenues => {
            let client = ApiClient::new(&config.api, session)?;
            let name = client.session_name()?.to_string();
            let venues = client.profile_venues(&name).await?;
            println!("\n🏠 {} listings for {}:", venues.len(), name);
            for venue in &venues {
                println!("   {}  {}  ({} bookings)", venue.id, venue.name, venue.bookings.len());
                for booking in &venue.bookings {
                    println!(
                        "      {} → {}  {} guests",
                        booking.date_from, booking.date_to, booking.guests
                    );
                }
            }
        }
        Commands::CreateVenue { name, description, price, max_guests } => {
            let client = ApiClient::new(&config.api, session)?;
            let submission = VenueSubmission {
                name,
                description,
                price,
                max_guests,
                media: Vec::new(),
                location: None,
            };
            let created = client.create_venue(&submission).await?;
            println!("✅ Created venue {} ({})", created.name, created.id);
        }
        Commands::UpdateVenue { venue, name, description, price, max_guests } => {
            let client = ApiClient::new(&config.api, session)?;
            let id = resolve_venue_id(&venue)?;
            let current = client.venue_with_bookings(id).await?;
            ensure_manageable(&client, &current)?;
            let submission = VenueSubmission {
                name: name.unwrap_or(current.name),
                description: description.unwrap_or(current.description),
                price: price.unwrap_or(current.price),
                max_guests: max_guests.unwrap_or(current.max_guests),
                media: current.media,
                location: current.location,
            };
            let updated = client.update_venue(id, &submission).await?;
            println!("✅ Updated venue {}", updated.name);
        }
        Commands::DeleteVenue { venue } => {
            let client = ApiClient::new(&config.api, session)?;
            let id = resolve_venue_id(&venue)?;
            let current = client.venue_with_bookings(id).await?;
            ensure_manageable(&client, &current)?;
            client.delete_venue(id).await?;
            println!("✅ Deleted venue {}", current.name);
        }
    }

    Ok(())
}
