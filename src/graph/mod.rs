//! Commit graph: nodes, lane routing, column assignment and SVG output.
//!
//! Data flows in one direction: [`assign`] turns a commit history into a
//! [`node::CommitGraph`] (or the repository supplies one directly),
//! [`layout`] routes it into a [`draw::Drawing`], and [`svg`] renders that.

pub mod assign;
pub mod consts;
pub mod draw;
pub mod layout;
pub mod node;
pub mod occupancy;
pub mod svg;

pub use layout::{GraphLayout, LayoutConfig, LayoutError};
pub use node::{CommitGraph, CommitNode};
