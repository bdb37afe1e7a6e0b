//! UI components.

pub mod sankey;
