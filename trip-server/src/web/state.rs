//! Application state for the web layer.

use std::sync::Arc;

use crate::activities::ActivityProvider;
use crate::places::PlaceDirectory;
use crate::routing::LegProvider;
use crate::trips::TripRepository;

/// Shared application state.
///
/// Contains all the services needed to handle requests. Each service sits
/// behind a trait so tests can swap in in-process fakes.
#[derive(Clone)]
pub struct AppState {
    /// Place search and lookup
    pub places: Arc<PlaceDirectory>,

    /// Driving directions
    pub routing: Arc<dyn LegProvider>,

    /// Activity search; `None` when no provider is configured
    pub activities: Option<Arc<dyn ActivityProvider>>,

    /// Saved trips
    pub trips: Arc<dyn TripRepository>,
}

impl AppState {
    /// Create a new app state without activity search.
    pub fn new(
        places: PlaceDirectory,
        routing: Arc<dyn LegProvider>,
        trips: Arc<dyn TripRepository>,
    ) -> Self {
        Self {
            places: Arc::new(places),
            routing,
            activities: None,
            trips,
        }
    }

    pub fn with_activities(mut self, provider: Arc<dyn ActivityProvider>) -> Self {
        self.activities = Some(provider);
        self
    }
}
