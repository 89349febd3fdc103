pub mod audit;
pub mod dispatch;
pub mod family;
pub mod get;
pub mod intake;
pub mod list;
pub mod relink;
pub mod shared;
pub mod status;
