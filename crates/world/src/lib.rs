//! World-side pieces of area harvesting: blocks, crops, inventories, the
//! harvest engine and the interaction listener that drives it.

mod block;
mod crop;
mod drop_item;
mod drops;
mod harvest;
mod interaction;
mod inventory;
mod neighborhood;
mod world;

pub use block::*;
pub use crop::*;
pub use drop_item::*;
pub use drops::*;
pub use harvest::*;
pub use interaction::*;
pub use inventory::*;
pub use neighborhood::*;
pub use world::*;
