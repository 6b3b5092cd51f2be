//! # SiteScribe
//!
//! Natural-language editing for folders of HTML documents.
//!
//! A command such as `change heading to Welcome` or `add contact form` is
//! resolved into typed edit actions and applied to the documents on disk.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌─────────────┐   ┌───────────┐
//! │ Indexer  │──▶│ Interpreter │──▶│ Executor  │
//! │ walk+DOM │   │ LLM / rules │   │ DOM write │
//! └──────────┘   └─────────────┘   └───────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! scribe run ./site "change heading to Welcome"
//! scribe plan ./site "add contact form"     # dry run, prints actions
//! scribe index ./site                       # prints the site index
//! scribe apply plan.json                    # execute a saved plan
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Site index, results and outcomes |
//! | [`selector`] | Structural selector builder |
//! | [`indexer`] | File/folder indexing |
//! | [`actions`] | The closed action set and its wire form |
//! | [`planner`] | Language-model planning (tier 1) |
//! | [`interpreter`] | Two-tier command interpretation |
//! | [`dom`] | Editable parsed document |
//! | [`style`] | Inline style merge rules |
//! | [`presets`] | Template and animation CSS |
//! | [`settings`] | App-setting acknowledgements |
//! | [`executor`] | Action execution |
//! | [`pipeline`] | Entry point for one command |

pub mod actions;
pub mod config;
pub mod dom;
pub mod executor;
pub mod indexer;
pub mod interpreter;
pub mod models;
pub mod pipeline;
pub mod planner;
pub mod presets;
pub mod selector;
pub mod settings;
pub mod style;
