//! Gamesight — client SDK for the game-sales insights assistant.
//!
//! Wraps the three remote services the assistant front-end talks to: the
//! agent-orchestration endpoint (streaming), the persisted query store
//! (point lookups), and the model-inference endpoint (chart generation).
//! Also owns the trace-projection view-model, session state, and the text
//! renderers the front-end uses.
//!
//! # Quick Start
//!
//! ```no_run
//! use gamesight::agent::{AgentClient, InvokeRequest};
//! use gamesight::config::GamesightConfig;
//! use gamesight::session::Session;
//!
//! # async fn example() -> gamesight::error::Result<()> {
//! let config = GamesightConfig::from_env();
//! let client = AgentClient::new(&config)?;
//! let mut session = Session::new("session-1");
//!
//! let request = InvokeRequest::builder()
//!     .session_id("session-1")
//!     .input_text("Which console sold the most units in 2004?")
//!     .build();
//! let invocation = client.invoke(request, &mut session).await?;
//! println!("{}", invocation.completion);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod chart;
pub mod config;
pub mod error;
pub mod http;
pub mod render;
pub mod session;
pub mod store;
pub mod trace;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
