pub mod config;
pub mod convert;
pub mod engine;
pub mod error;
pub mod framebuffer;
pub mod hostname;
pub mod input;

pub use config::{Cli, Config, DisplayProfile, SceneKind, Settings};
pub use engine::{Engine, EngineState};
pub use error::{Error, Result};
pub use framebuffer::{Frame, Framebuffer, FramebufferDevice};
pub use input::{ActivitySource, InputMonitor, find_touch_device};
