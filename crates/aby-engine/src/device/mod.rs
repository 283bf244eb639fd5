//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Adapter/Device/Queue and the window Surface
//! - choosing surface format, present mode (vsync) and MSAA sample count
//! - clearing and presenting frames

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
pub use surface::{choose_present_mode, choose_sample_count, describe_adapter, PresentChoice};
pub use wgpu::Color;
