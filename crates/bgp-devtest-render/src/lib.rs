//! Capability injection and configuration rendering for the BGP devtest harness.
//!
//! The renderer never talks to a device runtime. Everything it would normally
//! ask the runtime for (device facts, pillar data, templates, files) is
//! supplied through the capability traits in [`capabilities`], and the
//! [`mock::MockEnvironment`] builds a per-request implementation of them.

pub mod capabilities;
pub mod error;
pub mod facts;
pub mod files;
pub mod fixtures;
pub mod mock;
pub mod renderer;
pub mod template;
pub mod utils;

pub use capabilities::{BgpCapabilities, Capabilities, RoutingPolicyCapabilities};
pub use error::{CapabilityError, RenderError, TemplateError};
pub use facts::{DeviceFacts, DEFAULT_GLOBAL_ASN};
pub use files::FileStore;
pub use mock::MockEnvironment;
pub use renderer::{RenderFlags, Renderer, TemplateRenderer};
