//! Connection layer exposing the running live-view engine

mod live;

pub use live::LiveView;
