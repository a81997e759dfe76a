pub mod add;
pub mod add_timed;
pub mod delete;
pub mod events;
pub mod list;
