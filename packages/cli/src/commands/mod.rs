pub mod init;
pub mod replace;
pub mod views;

pub use init::{init, InitArgs};
pub use replace::{replace, ReplaceArgs};
pub use views::{views, ViewsArgs};
