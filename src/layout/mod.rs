//! Page layout: geometry, the flow planner and its draw operations.
//!
//! The planner turns a [`Document`](crate::models::Document) into an ordered
//! list of positioned [`DrawOp`]s; renderers consume that list without doing
//! any layout of their own.

pub mod draw_op;
pub mod flow;
pub mod geometry;

pub use draw_op::{DrawOp, DrawOpKind, FlowPlan, SlotPosition};
pub use flow::{estimate_pages, estimate_pages_with_geometry, plan, plan_with_geometry, OpSink};
pub use geometry::{
    column_geometry, half_height, page_dimensions, title_band_height, ColumnGeometry, Half,
    PageGeometry,
};
