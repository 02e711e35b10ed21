pub mod list;
pub mod paths;
pub mod show;
