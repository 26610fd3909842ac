pub mod direction;
pub mod grid;
pub mod palette;
pub mod preview;
pub mod render;
pub mod rules;
pub mod simulation;
pub mod turmite;

mod parse_util;

pub type ColorId = u8;
pub type StateId = u8;
