pub mod coordinates;
pub mod geo;
pub mod poi;
pub mod route;
pub mod waypoint;

pub use coordinates::{Coordinates, HasCoordinates};
pub use geo::{Bounds, ICELAND_BOUNDS};
pub use poi::{Poi, PoiCategory};
pub use route::{
    AddWaypointRequest, MoveWaypointRequest, OptimizeRequest, RouteLeg, RouteResult,
    RouteSnapshot, RouteState, RouteStep, RouteUpdate, SaveRouteRequest, SavedRoute,
    SetModeRequest, TransportMode,
};
pub use waypoint::Waypoint;
