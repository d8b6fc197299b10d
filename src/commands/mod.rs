pub mod add;
pub mod change;
pub mod delete;
pub mod list;
pub mod show;
pub mod update;
