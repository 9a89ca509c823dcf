//! Embassy async tasks for core 0
//!
//! The render loop is not here - it runs as a bare loop on core 1.

pub mod bootsel;
pub mod feeder;
pub mod input;

pub use bootsel::bootsel_task;
pub use feeder::feeder_task;
pub use input::input_task;
