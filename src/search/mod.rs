//! Search Controller: debounced, cancellable queries against the book API.

pub mod controller;

pub use controller::{
    QueryChange, RequestToken, SearchController, SearchRequest, SearchSession, FETCH_FAILED_MESSAGE,
    TIMED_OUT_MESSAGE,
};
