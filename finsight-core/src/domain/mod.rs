//! Domain types shared by the data layer and the indicator engine.

pub mod bar;

pub use bar::PriceBar;
