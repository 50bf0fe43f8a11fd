//! BPMM Core Types and Definitions
//!
//! This crate provides the foundational types shared by every BPMM diagram
//! element. It includes:
//!
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Identifiers**: Process-unique element identifiers ([`identifier::ElementId`])
//! - **Categories**: The closed set of modeling concepts ([`category::Category`])

pub mod category;
pub mod geometry;
pub mod identifier;
