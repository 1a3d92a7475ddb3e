//! trip-domain
//!
//! Pure domain models (Trip, Member, BudgetItem, SpendingItem, etc.).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod category;
pub mod common;
pub mod item;
pub mod member;
pub mod policy;
pub mod trip;

pub use category::*;
pub use common::*;
pub use item::*;
pub use member::*;
pub use policy::*;
pub use trip::*;
