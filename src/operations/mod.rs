//! Document operations
//!
//! - `query`: recursive collection and counting over the whole tree
//! - `mutation`: attribute updates, scaling and appending shapes
//!
//! Both are written as inherent methods on `Document`.

pub mod mutation;
pub mod query;

pub use query::{matches_circle_area, matches_group_len, matches_path_data, matches_rect_area};
