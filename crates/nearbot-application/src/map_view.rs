//! Map view state.
//!
//! One owned component holds the user marker, the store markers, and the
//! viewport: `render` replaces markers wholesale, `focus` recenters and
//! opens the matching popup. No map state lives outside this struct.

use nearbot_core::geo::Location;
use nearbot_core::store::Store;

/// Initial map center before any location fix.
pub const DEFAULT_CENTER: Location = Location {
    lat: 10.762622,
    lng: 106.660172,
};
pub const DEFAULT_ZOOM: u8 = 13;
pub const FOCUS_ZOOM: u8 = 16;
/// Pixel padding used when fitting bounds over all markers.
pub const FIT_PADDING: u32 = 50;

/// A pin on the map with its popup.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub lat: f64,
    pub lng: f64,
    pub popup: String,
    pub popup_open: bool,
}

/// A rectangle covering a set of coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl LatLngBounds {
    /// Bounds covering a single point.
    pub fn of(location: Location) -> Self {
        Self {
            min_lat: location.lat,
            max_lat: location.lat,
            min_lng: location.lng,
            max_lng: location.lng,
        }
    }

    /// Grows the bounds to include the point.
    pub fn extend(&mut self, lat: f64, lng: f64) {
        self.min_lat = self.min_lat.min(lat);
        self.max_lat = self.max_lat.max(lat);
        self.min_lng = self.min_lng.min(lng);
        self.max_lng = self.max_lng.max(lng);
    }

    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lng >= self.min_lng && lng <= self.max_lng
    }
}

/// Where the map is looking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Viewport {
    Centered { center: Location, zoom: u8 },
    Fitted { bounds: LatLngBounds, padding: u32 },
}

/// The owned map widget state.
#[derive(Debug)]
pub struct MapView {
    user_marker: Option<Marker>,
    store_markers: Vec<Marker>,
    viewport: Viewport,
}

impl Default for MapView {
    fn default() -> Self {
        Self::new()
    }
}

impl MapView {
    pub fn new() -> Self {
        Self {
            user_marker: None,
            store_markers: Vec::new(),
            viewport: Viewport::Centered {
                center: DEFAULT_CENTER,
                zoom: DEFAULT_ZOOM,
            },
        }
    }

    /// Re-renders the map from scratch.
    ///
    /// Prior store markers are cleared and the user marker is replaced;
    /// a stale marker can never survive a render. Viewport: user only →
    /// centered on the user; user and stores → bounds fitted over all
    /// points; stores only → centered on the first store.
    pub fn render(&mut self, user: Option<Location>, stores: &[Store]) {
        self.store_markers.clear();
        self.user_marker = None;

        if let Some(location) = user {
            self.user_marker = Some(Marker {
                lat: location.lat,
                lng: location.lng,
                popup: "You are here".to_string(),
                popup_open: true,
            });
            self.viewport = Viewport::Centered {
                center: location,
                zoom: DEFAULT_ZOOM,
            };
        }

        if !stores.is_empty() {
            for store in stores {
                self.store_markers.push(Marker {
                    lat: store.lat,
                    lng: store.lng,
                    popup: format!("{}\n{}", store.name, store.description),
                    popup_open: false,
                });
            }

            if let Some(location) = user {
                let mut bounds = LatLngBounds::of(location);
                for store in stores {
                    bounds.extend(store.lat, store.lng);
                }
                self.viewport = Viewport::Fitted {
                    bounds,
                    padding: FIT_PADDING,
                };
            } else {
                self.viewport = Viewport::Centered {
                    center: Location::new(stores[0].lat, stores[0].lng),
                    zoom: DEFAULT_ZOOM,
                };
            }
        }
    }

    /// Recenters at focus zoom and opens the popup of the exactly matching
    /// store marker.
    ///
    /// Coordinates must match bit-for-bit; a near-miss recenters but
    /// leaves every popup untouched.
    pub fn focus(&mut self, lat: f64, lng: f64) {
        self.viewport = Viewport::Centered {
            center: Location::new(lat, lng),
            zoom: FOCUS_ZOOM,
        };

        if let Some(index) = self
            .store_markers
            .iter()
            .position(|marker| marker.lat == lat && marker.lng == lng)
        {
            for marker in &mut self.store_markers {
                marker.popup_open = false;
            }
            if let Some(user) = &mut self.user_marker {
                user.popup_open = false;
            }
            self.store_markers[index].popup_open = true;
        }
    }

    pub fn user_marker(&self) -> Option<&Marker> {
        self.user_marker.as_ref()
    }

    pub fn store_markers(&self) -> &[Marker] {
        &self.store_markers
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
}
