//! External plugin modules: the exported ABI, module-side panic guards and
//! the shared library loader

pub mod abi;
pub mod guard;
pub mod library;
