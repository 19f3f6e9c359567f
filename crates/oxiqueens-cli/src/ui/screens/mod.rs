pub use self::step_viewer::*;

mod step_viewer;
