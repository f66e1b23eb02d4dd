//! Stateful components updated by host messages

pub mod fold_text;
