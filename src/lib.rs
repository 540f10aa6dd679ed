pub mod error;
pub mod game_logic;
pub mod msg;
pub mod state;
pub mod table;

pub use crate::error::TableError;
pub use crate::state::{BalanceStore, MemoryLedger, SeatKey, TableConfig};
pub use crate::table::Table;
