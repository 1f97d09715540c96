//! drawtree Core Types and Definitions
//!
//! This crate provides the foundational types shared by the drawtree
//! parser, layout engines and document serializer:
//!
//! - **Graph**: Nodes, edges and the insertion-ordered graph ([`graph`] module)
//! - **Colors**: CSS color parsing with hex output ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Positioned**: Layout output consumed by the serializer ([`positioned`] module)

pub mod color;
pub mod geometry;
pub mod graph;
pub mod positioned;
