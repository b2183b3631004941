pub mod app;
pub mod components;
pub mod surface;

pub use app::App;
