//! Chorus Gateway - multi-persona auto-reply engine for chat platforms
//!
//! This library provides the core dispatch pipeline for a fleet of
//! independently configured reply personas:
//! - Declarative condition trees compiled once per trigger
//! - Priority/first-match trigger dispatch per persona
//! - Static / mimic / random reply identity strategies
//! - Response pools, dynamic generators and runtime overrides
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │              Transport (collaborator)                │
//! │        message stream  │  reply delivery            │
//! └────────────────────┬────────────────────────────────┘
//!                      │ Message            ▲ SendRequest
//! ┌────────────────────▼────────────────────────────────┐
//! │                     Engine                           │
//! │  Registry │ StateManager │ Overrides │ Dispatch     │
//! └──────┬──────────────────────────────────┬───────────┘
//!        │ per persona, concurrent          │
//! ┌──────▼──────────┐              ┌────────▼───────────┐
//! │ Trigger loop    │              │ Resolution          │
//! │ compiled logic  │              │ identity │ response │
//! └─────────────────┘              └─────────────────────┘
//! ```
//!
//! Transport, member directory and LLM clients are external collaborators
//! behind the [`GuildDirectory`] and [`ResponseGenerator`] traits.

pub mod bots;
pub mod config;
pub mod engine;
pub mod error;
pub mod identity;
pub mod logic;
pub mod message;
pub mod overrides;
pub mod registry;
pub mod response;

pub use bots::{BotDefinition, Trigger};
pub use config::{BotConfigFile, GeneratorMap, build_definition, discover_bot_configs, load_bots};
pub use engine::{DEFAULT_GENERATOR_TIMEOUT, Engine};
pub use error::{Error, Result};
pub use identity::{GuildDirectory, IdentitySpec, resolve_identity};
pub use logic::{CompiledCondition, LogicNode, compile};
pub use message::{GuildMember, Message, MessageAuthor, ReplyIdentity, SendRequest};
pub use overrides::CommentOverrideService;
pub use registry::{BotRegistry, BotStateManager};
pub use response::{ResponseGenerator, ResponseSpec, resolve_response};
