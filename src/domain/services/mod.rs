//! Domain services - Pure logic with no collaborators

pub mod slug;
