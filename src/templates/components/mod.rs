pub mod badges;
pub mod filter_panel;

pub use badges::{disposition_badge, status_badge, temperature_badge};
pub use filter_panel::filter_panel;
