pub mod overlay;
pub mod timeline;
pub mod tool;

pub use overlay::{Action, Draft, Effect, ForeignView, Model, Phase};
pub use tool::Tool;
