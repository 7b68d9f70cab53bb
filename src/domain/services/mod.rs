pub mod actions;
mod app_state;
mod bubble;
mod bubble_list;
mod duplicate_guard;
pub mod events;
mod scroll;
mod selections;
mod session;
mod themes;

pub use app_state::*;
pub use bubble::*;
pub use bubble_list::*;
pub use duplicate_guard::*;
pub use scroll::*;
pub use selections::*;
pub use session::*;
pub use themes::*;
