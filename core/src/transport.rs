//! The request/response boundary to the model service.

use core::future::Future;
use std::sync::Arc;

use serde_json::Value;

use crate::compose::ChatRequest;

/// Sends a composed request and returns the raw response envelope.
///
/// Implementations report connectivity and protocol failures through [`Transport::Error`]. A
/// well-formed envelope that lacks a reply is *not* an error; the controller handles that.
pub trait Transport: Send + Sync {
    /// Transport failure.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Performs one round-trip.
    fn send(&self, request: &ChatRequest) -> impl Future<Output = Result<Value, Self::Error>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    type Error = T::Error;

    fn send(&self, request: &ChatRequest) -> impl Future<Output = Result<Value, Self::Error>> + Send {
        T::send(self, request)
    }
}

impl<T: Transport> Transport for &T {
    type Error = T::Error;

    fn send(&self, request: &ChatRequest) -> impl Future<Output = Result<Value, Self::Error>> + Send {
        T::send(self, request)
    }
}
