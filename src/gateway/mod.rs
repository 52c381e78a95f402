pub mod composer;
mod executor;
pub mod fsm;
mod invoker;
pub mod normalizer;
mod types;

pub use composer::{ComposedResponse, ResponseEnvelope};
pub use executor::Gateway;
pub use fsm::{Outcome, RequestEvent, RequestState, RequestStateMachine};
pub use invoker::Invoker;
pub use types::*;
