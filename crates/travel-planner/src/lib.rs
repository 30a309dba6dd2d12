//! # Travel Planner
//!
//! Travel-domain layer on top of the `agent-core` reasoning loop: search
//! provider fallback chains, weather and currency clients, a pure budget
//! calculator, the sixteen-tool travel toolkit and the planning facade.
//!
//! ```text
//!   ┌────────────────────────────────────────────────┐
//!   │                  TravelAgent                   │
//!   │   plan_trip → tool loop → forced summary /     │
//!   │               no-tools fallback                │
//!   └───────┬────────────────────────────┬───────────┘
//!           │                            │
//!   ┌───────▼────────┐          ┌────────▼──────────┐
//!   │  agent-core    │          │     toolkit       │
//!   │  Agent / FSM   │◄────────►│  16 Tool impls    │
//!   └────────────────┘          └────────┬──────────┘
//!                                        │
//!              ┌────────────┬────────────┼───────────┬──────────┐
//!       ┌──────▼─────┐ ┌────▼────┐ ┌─────▼────┐ ┌────▼───┐ ┌────▼───┐
//!       │   search   │ │ weather │ │ currency │ │ budget │ │  plan  │
//!       │   chains   │ │ client  │ │  rates   │ │  pure  │ │ render │
//!       └────────────┘ └─────────┘ └──────────┘ └────────┘ └────────┘
//! ```
//!
//! External services degrade, they do not crash the plan: search falls
//! through provider chains, weather and currency surface sentinels, and
//! the composite planner substitutes placeholder sections.

pub mod agent;
pub mod budget;
pub mod config;
pub mod currency;
pub mod error;
pub mod export;
pub mod plan;
pub mod search;
pub mod toolkit;
pub mod weather;

pub use agent::{TravelAgent, DEFAULT_MAX_ITERATIONS};
pub use budget::{daily_budget, BudgetBreakdown, BudgetEstimator, BudgetMode};
pub use config::PlannerConfig;
pub use currency::{ExchangeRateApi, RateSource};
pub use error::{PlannerError, Result};
pub use export::MarkdownExporter;
pub use plan::{DayShape, TripWindow};
pub use search::{ProviderChain, SearchProvider};
pub use toolkit::ToolkitServices;
pub use weather::{CurrentConditions, ForecastEntry, WeatherProvider};
