//! Card system: definitions, instances, and the catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardKind`: The four resolver behaviors (attack, shield, heal, charge)
//! - `CardDefinition`: Static card data from the external catalog
//! - `InstanceId` / `CardInstance`: A drawn copy with its own identity and
//!   mutable strength
//! - `CardCatalog`: Definition lookup, loaded once at startup

pub mod catalog;
pub mod definition;
pub mod instance;

pub use catalog::CardCatalog;
pub use definition::{CardDefinition, CardId, CardKind};
pub use instance::{CardInstance, InstanceId};
