//! Access control: capability resolution and the checked note service

mod identity;
mod resolver;
mod service;


pub use identity::{Identity, IdentitySource};
pub use resolver::AccessResolver;
pub use service::{AccessibleNote, NoteListing, NoteService};
