//! Correlation middleware attaching a request-scoped identifier.
//!
//! Each incoming request gets a request id stored in task-local storage for
//! correlation across logs and error payloads. Clients may supply their own
//! via the `x-request-id` header; otherwise a UUID is generated. The active
//! identifier is echoed back on every response.
//!
//! Tokio task-local variables are not inherited across spawned tasks. Use
//! [`RequestId::scope`] when spawning new tasks or moving work onto blocking
//! threads so the identifier propagates.

use std::future::Future;
use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tokio::task_local;
use tracing::error;
use uuid::Uuid;

task_local! {
    static REQUEST_ID: String;
}

/// Wire name of the correlation header, inbound and outbound.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Accessor for the request identifier held in task-local storage.
///
/// # Examples
/// ```
/// use backend::middleware::request_id::RequestId;
///
/// async fn handler() {
///     if let Some(id) = RequestId::current() {
///         println!("request id: {id}");
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequestId;

impl RequestId {
    /// Returns the current request identifier if one is in scope.
    pub fn current() -> Option<String> {
        REQUEST_ID.try_with(Clone::clone).ok()
    }

    /// Execute the provided future with the supplied identifier in scope.
    ///
    /// # Examples
    /// ```
    /// use backend::middleware::request_id::RequestId;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let observed = RequestId::scope("req-1".into(), async { RequestId::current() }).await;
    /// assert_eq!(observed.as_deref(), Some("req-1"));
    /// # });
    /// ```
    pub async fn scope<Fut>(id: String, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        REQUEST_ID.scope(id, fut).await
    }
}

fn identifier_for(req: &ServiceRequest) -> String {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_owned)
}

/// Correlation middleware honouring inbound `x-request-id` headers and
/// stamping the identifier on every response.
///
/// Handlers can read the id via [`RequestId::current`]; domain errors pick
/// it up automatically on construction.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::middleware::Correlation;
///
/// let app = App::new().wrap(Correlation);
/// ```
#[derive(Clone)]
pub struct Correlation;

impl<S, B> Transform<S, ServiceRequest> for Correlation
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = CorrelationMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorrelationMiddleware { service }))
    }
}

/// Service wrapper produced by [`Correlation`].
///
/// Applications should not use this type directly.
pub struct CorrelationMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for CorrelationMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_id = identifier_for(&req);
        let header_value = request_id.clone();
        let fut = self.service.call(req);
        Box::pin(RequestId::scope(request_id, async move {
            let mut res = fut.await?;
            match HeaderValue::from_str(&header_value) {
                Ok(value) => {
                    res.response_mut()
                        .headers_mut()
                        .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
                }
                Err(err) => {
                    error!(
                        error = %err,
                        request_id = %header_value,
                        "failed to encode request identifier header"
                    );
                }
            }
            Ok(res)
        }))
    }
}
