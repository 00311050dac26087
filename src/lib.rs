//! Commit graph layout and commit hook management for repository browsers.
//!
//! Two independent engines live here. The graph engine turns a commit DAG
//! with precomputed row/column slots into drawing primitives, routing
//! connector lines around lanes that are already occupied. The hooks engine
//! keeps the active and installable hook lists consistent and produces the
//! requests that persist each change on the remote repository service.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`graph`] | Commit nodes, lane routing, column assignment, SVG output |
//! | [`hooks`] | Hook list controller, remote service client, async manager |
//! | [`config`] | Environment-driven configuration |
//! | [`cli`] | Command-line shell over both engines |

pub mod cli;
pub mod config;
pub mod graph;
pub mod hooks;
