pub mod export;
pub mod osrm;
pub mod poi_catalog;
pub mod route_calculator;
pub mod sequencer;
