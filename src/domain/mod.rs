//! Domain layer types.

pub mod books;
