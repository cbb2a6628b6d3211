//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames and providing encoders/views for rendering
//!
//! Failing to obtain any of these at startup is reported as [`GpuUnsupported`].

mod error;
mod gpu;

pub use error::{GpuStage, GpuUnsupported};
pub use gpu::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
