pub mod delete;
pub mod get;
pub mod list;
pub mod put;

pub use delete::delete_command;
pub use get::get_command;
pub use list::list_command;
pub use put::put_command;
