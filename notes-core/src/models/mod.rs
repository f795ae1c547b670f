mod note;

pub use note::*;
