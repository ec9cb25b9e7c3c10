//! TCP server entry: the accept loop lives here.

pub mod listener;
