//! Provider crate: LLM provider configuration, construction and concurrent
//! prompt fan-out.
//!
//! `Provider` enum wraps the two transports (hosted API and local HTTP
//! server) behind one `run_prompt` contract. `build_provider` resolves a
//! `ProviderConfig` against the static `Registry`. `Dispatcher` sends one
//! prompt to many providers at once and returns a `DispatchResult` with
//! exactly one `Outcome` per provider, whatever happens to the others.

pub mod config;
pub mod dispatch;
mod error;
pub mod http;
pub mod local;
mod provider;
pub mod registry;
pub mod remote;
pub mod request;
pub mod response;
pub mod store;

pub use {
    config::{ProviderConfig, ProviderKind},
    dispatch::{DispatchContext, DispatchResult, Dispatcher, Outcome},
    error::{Error, Result},
    http::HttpProvider,
    local::LocalHttp,
    provider::{Provider, build_provider},
    registry::{Entry, Registry},
    remote::RemoteApi,
    request::Request,
    reqwest::Client,
    response::Response,
    store::{ProviderEntry, ProviderStore},
};
