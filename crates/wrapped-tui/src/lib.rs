pub mod app;
pub mod counter;
pub mod document;
pub mod event;
pub mod input;
pub mod keymap;
pub mod presentation;
pub mod reveal;
pub mod scroll;
pub mod share;
pub mod theme;
pub mod themes;
pub mod widgets;

pub use app::App;
pub use theme::Theme;
pub use themes::load_theme;
