//! Core module - 配置、状态、错误、事件

pub mod config;
pub mod error;
pub mod events;
pub mod ids;
pub mod logging;
pub mod state;

pub use config::Config;
pub use error::{EngineError, EngineResult};
pub use events::FulfillmentEvent;
pub use ids::IdGen;
pub use state::EngineState;
