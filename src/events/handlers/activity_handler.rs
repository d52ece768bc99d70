// src/events/handlers/activity_handler.rs
//
// Activity Log Handler
//
// Writes one info line per catalog change so a session can be followed in
// the log output.
//
// RULES:
// - Only observes; never calls back into services
// - Never panics on event content

use log::info;

use crate::events::types::{
    CatalogExported, CatalogLoaded, MovieCreated, MovieDeleted, MovieUpdated,
};
use crate::events::EventBus;

/// Registers the activity log handlers with the event bus.
pub fn register_activity_handlers(bus: &EventBus) {
    bus.subscribe::<CatalogLoaded, _>(|event| {
        info!("[CATALOG] Loaded {} movies", event.movie_count);
    });

    bus.subscribe::<MovieCreated, _>(|event| match &event.movie_id {
        Some(id) => info!("[MOVIE] Created '{}' (id={})", event.name, id),
        None => info!("[MOVIE] Created '{}'", event.name),
    });

    bus.subscribe::<MovieUpdated, _>(|event| {
        info!("[MOVIE] Updated '{}' (id={})", event.name, event.movie_id);
    });

    bus.subscribe::<MovieDeleted, _>(|event| {
        info!("[MOVIE] Deleted id={}", event.movie_id);
    });

    bus.subscribe::<CatalogExported, _>(|event| {
        info!(
            "[EXPORT] Wrote {} movies as {} to {}",
            event.movie_count,
            event.format,
            event.path.display()
        );
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MovieId;

    #[test]
    fn test_registers_one_handler_per_event() {
        let bus = EventBus::new();
        register_activity_handlers(&bus);

        assert_eq!(bus.subscriber_count::<CatalogLoaded>(), 1);
        assert_eq!(bus.subscriber_count::<MovieCreated>(), 1);
        assert_eq!(bus.subscriber_count::<MovieUpdated>(), 1);
        assert_eq!(bus.subscriber_count::<MovieDeleted>(), 1);
        assert_eq!(bus.subscriber_count::<CatalogExported>(), 1);
    }

    #[test]
    fn test_handlers_accept_events() {
        let bus = EventBus::new();
        register_activity_handlers(&bus);

        bus.emit(MovieCreated::new(None, "Dune".to_string()));
        bus.emit(MovieDeleted::new(MovieId::new("7")));

        let log = bus.get_event_log();
        assert_eq!(log.len(), 2);
        assert!(log.iter().all(|entry| entry.handler_count == 1));
    }
}
