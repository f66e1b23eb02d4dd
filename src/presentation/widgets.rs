//! Reusable UI widgets

pub mod fold_text;
