//! # linuwu-sense
//!
//! Device-control layer for Acer laptops running the `linuwu_sense` kernel module.
//! Translates lighting, fan, battery and power-profile intents into the exact text
//! payloads the driver's sysfs files accept, and finds which of those files exist on
//! the running machine.
//!
//! ```no_run
//! use linuwu_sense::{ControlService, FanRequest, Request, SenseConfig};
//!
//! let service = ControlService::system(SenseConfig::default());
//! service.apply(&Request::Fan(FanRequest::Manual { cpu: 40, gpu: 60 }))?;
//! # Ok::<(), linuwu_sense::ControlError>(())
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod paths;
pub mod service;
pub mod sysfs;
pub mod types;
pub mod validate;

pub use config::SenseConfig;
pub use error::{ControlError, NotFound, ValidationError};
pub use paths::PathResolver;
pub use service::{ControlService, Status};
pub use sysfs::{Sysfs, SysfsIo};
pub use types::{
    ControlSurface, EffectMode, EffectParams, FanRequest, FanTarget, HexColor, LogoParams,
    Request, ZoneColorSet, ZoneMode,
};
