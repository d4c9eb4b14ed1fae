//! Headless driver for hull worlds: loads config and layouts, plays input
//! scripts through the frame loop and stores the resulting layout.

mod args;
pub use args::Args;

mod config;
pub use config::{load_config, parse_config, Config, SessionConfig};

pub mod script;
pub use script::{Script, ScriptStep};

mod session;
pub use session::{load_layout, Session, SessionSummary};
