//! Middleware installing a per-request trace identifier.
//!
//! A fresh UUID is generated for every request; inbound `trace-id` headers
//! are deliberately ignored so clients cannot forge correlation values. The
//! identifier is installed as a [`TraceId`] task-local around the inner
//! service call and echoed on the response in the `trace-id` header, which
//! makes it line up with the `traceId` field of any error body produced
//! inside the scope.

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::error;

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Wrap an `App` with request-scoped trace identifiers.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use folio_server::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceService { service }))
    }
}

/// The wrapped service; constructed by actix via [`Trace`].
pub struct TraceService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = TraceId::generate();
        // A canonical UUID is always a valid header value; the fallback only
        // logs so a header problem can never fail the request itself.
        let header_value = HeaderValue::from_str(&trace_id.to_string())
            .map_err(|encode_error| {
                error!(
                    error = %encode_error,
                    trace_id = %trace_id,
                    "failed to encode trace identifier header"
                );
            })
            .ok();

        let fut = self.service.call(req);
        Box::pin(TraceId::scope(trace_id, async move {
            let mut res = fut.await?;
            if let Some(value) = header_value {
                res.response_mut()
                    .headers_mut()
                    .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
            }
            Ok(res)
        }))
    }
}
