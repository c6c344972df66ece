pub mod current;
pub mod info;
pub mod list;
pub mod select;

pub use current::current_command;
pub use info::info_command;
pub use list::list_command;
pub use select::use_command;
