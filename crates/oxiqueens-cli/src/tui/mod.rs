mod app;
mod runner;

pub use self::{app::App, runner::run};
