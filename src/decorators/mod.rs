//! Runtime decorators: given an already-rendered block's DOM, enhance it in
//! place. The block type is known from its container, so no classification
//! happens here; every decorator degrades to a no-op when nothing qualifies.

pub mod columns;
pub mod hero;

pub use columns::decorate as decorate_columns;
pub use hero::decorate as decorate_hero;
