//! Systems - rules that operate on components

mod behavior;
mod employment;
mod jobs;
mod movement;
mod needs;
mod population;
mod satisfaction;

pub use behavior::*;
pub use employment::*;
pub use jobs::*;
pub use movement::*;
pub use needs::*;
pub use population::*;
pub use satisfaction::*;
