//! Path resolution and pure structural edits over a [`Board`](crate::Board).
//!
//! Every edit takes the board by reference and returns a new one. Lanes and
//! items off the edited path are shared with the input by `Arc`.

pub mod edit;
pub mod resolve;

pub use edit::{
    append_entities, insert_entity, prepend_entities, remove_entity, update_entity, EntityPatch,
};
pub use resolve::{get_children, get_entity_from_path};
