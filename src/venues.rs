//! Local presentation helpers for candidate venues: free-text
//! filtering, ordering, and pulling a venue id out of pasted text.

use crate::domain::Venue;
use once_cell::sync::Lazy;
use regex::Regex;

static UUID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}",
    )
    .unwrap()
});

/// Scans arbitrary text (a pasted link, a share message) for an
/// RFC-4122-shaped UUID substring.
pub fn extract_uuid(input: &str) -> Option<&str> {
    UUID_PATTERN.find(input).map(|m| m.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VenueSort {
    PriceAscending,
    PriceDescending,
    Rating,
    Name,
    Newest,
}

impl VenueSort {
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "price" | "price-asc" => Some(Self::PriceAscending),
            "price-desc" => Some(Self::PriceDescending),
            "rating" => Some(Self::Rating),
            "name" => Some(Self::Name),
            "newest" => Some(Self::Newest),
            _ => None,
        }
    }
}

pub fn sort_venues(venues: &mut [Venue], order: VenueSort) {
    match order {
        VenueSort::PriceAscending => {
            venues.sort_by(|a, b| a.price.total_cmp(&b.price));
        }
        VenueSort::PriceDescending => {
            venues.sort_by(|a, b| b.price.total_cmp(&a.price));
        }
        VenueSort::Rating => {
            venues.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        }
        VenueSort::Name => {
            venues.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }
        VenueSort::Newest => {
            venues.sort_by(|a, b| b.created.cmp(&a.created));
        }
    }
}

/// Case-insensitive free-text match over name, description, and
/// location fields.
pub fn filter_venues(venues: &[Venue], query: &str) -> Vec<Venue> {
    let needle = query.to_lowercase();
    venues
        .iter()
        .filter(|venue| {
            let mut haystacks = vec![venue.name.to_lowercase(), venue.description.to_lowercase()];
            if let Some(location) = &venue.location {
                haystacks.extend(
                    [&location.address, &location.city, &location.country]
                        .into_iter()
                        .flatten()
                        .map(|s| s.to_lowercase()),
                );
            }
            haystacks.iter().any(|h| h.contains(&needle))
        })
        .cloned()
        .collect()
}
