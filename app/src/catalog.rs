//! Event catalog access.
//!
//! The catalog is an external, read-only data source. The core never
//! mutates its records; it only reads them and references events by id.
//! Injecting it as a trait keeps the state machines testable against
//! synthetic catalogs.

use crate::types::{Artist, ArtistId, Event, EventId, EventStatus, PriceRange};

/// Read-only source of events and artist profiles
pub trait EventCatalog: Send + Sync {
    /// All events, in catalog order
    fn list_events(&self) -> Vec<Event>;

    /// Look up an artist profile by id
    fn get_artist(&self, id: &ArtistId) -> Option<Artist>;
}

/// In-memory catalog with the demo fixtures
#[derive(Debug, Clone)]
pub struct DemoCatalog {
    events: Vec<Event>,
    artists: Vec<Artist>,
}

impl DemoCatalog {
    /// Builds the demo catalog: two shows and one touring artist
    #[must_use]
    pub fn new() -> Self {
        let bangalore_show = Event {
            id: EventId::new("e1"),
            artist_name: "The Midnight Echo".to_string(),
            venue: "Manpho Convention Center".to_string(),
            city: "Bangalore".to_string(),
            date: "Sat, Nov 12".to_string(),
            time: "8:00 PM".to_string(),
            price: PriceRange::new(2500, 5000, "₹"),
            image: "https://picsum.photos/800/600?random=10".to_string(),
            status: EventStatus::SellingFast,
        };

        let mumbai_show = Event {
            id: EventId::new("e2"),
            artist_name: "Divine".to_string(),
            city: "Mumbai".to_string(),
            image: "https://picsum.photos/800/600?random=12".to_string(),
            ..bangalore_show.clone()
        };

        let midnight_echo = Artist {
            id: ArtistId::new("a1"),
            name: "The Midnight Echo".to_string(),
            image: "https://picsum.photos/1200/800?random=5".to_string(),
            listeners: "2.4M".to_string(),
            is_touring: true,
            upcoming_shows: vec![bangalore_show.clone()],
        };

        Self {
            events: vec![bangalore_show, mumbai_show],
            artists: vec![midnight_echo],
        }
    }
}

impl Default for DemoCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventCatalog for DemoCatalog {
    fn list_events(&self) -> Vec<Event> {
        self.events.clone()
    }

    fn get_artist(&self, id: &ArtistId) -> Option<Artist> {
        self.artists.iter().find(|a| &a.id == id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_catalog_lists_events_in_order() {
        let catalog = DemoCatalog::new();
        let events = catalog.list_events();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, EventId::new("e1"));
        assert_eq!(events[0].city, "Bangalore");
        assert_eq!(events[1].id, EventId::new("e2"));
        assert_eq!(events[1].city, "Mumbai");
    }

    #[test]
    fn demo_catalog_resolves_touring_artist() {
        let catalog = DemoCatalog::new();

        let artist = catalog.get_artist(&ArtistId::new("a1"));
        match artist {
            Some(artist) => {
                assert!(artist.is_touring);
                assert_eq!(artist.upcoming_shows.len(), 1);
                assert_eq!(artist.upcoming_shows[0].id, EventId::new("e1"));
            },
            None => unreachable!("demo catalog always has artist a1"),
        }
    }

    #[test]
    fn unknown_artist_is_none() {
        let catalog = DemoCatalog::new();
        assert!(catalog.get_artist(&ArtistId::new("nope")).is_none());
    }
}
