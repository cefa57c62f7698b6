pub mod dispatch;
pub mod filter;
pub mod render;
pub mod table;
pub mod typing;

pub use dispatch::{OutputRequest, ResponseKind, generate_output};
pub use table::TextTable;
pub use typing::SymbolLookup;
