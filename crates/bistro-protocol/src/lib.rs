pub mod chat;
pub mod intent;
pub mod table;
pub mod turn;

pub use chat::*;
pub use intent::*;
pub use table::*;
pub use turn::*;
