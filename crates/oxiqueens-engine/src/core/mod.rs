pub use self::{board::*, stats::*};

pub(crate) mod board;
pub(crate) mod stats;
