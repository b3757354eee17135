//! Request correlation for log records.
//!
//! Every inbound request runs inside a `request` span carrying a
//! `request_id` field. [`CorrelationLayer`] copies that field into the span's
//! extensions so the event formatter can find it from any nested span.
//! Records emitted outside such a span are tagged [`SYSTEM_REQUEST_ID`].

use std::fmt;

use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Span, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::{LookupSpan, Scope};

/// Correlation tag used for records that belong to no request.
pub const SYSTEM_REQUEST_ID: &str = "SYSTEM";

/// Target of the per-request span; the log filter always enables it.
pub const REQUEST_SPAN_TARGET: &str = "xlsx2json::request";

const REQUEST_ID_FIELD: &str = "request_id";

/// Open the span that scopes one request's log records.
pub fn request_span(request_id: &str) -> Span {
    tracing::info_span!(target: REQUEST_SPAN_TARGET, "request", request_id = %request_id)
}

#[derive(Debug, Clone)]
pub(crate) struct CorrelationId(pub(crate) String);

/// Layer that stores each span's `request_id` in its extensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrelationLayer;

impl<S> Layer<S> for CorrelationLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut visitor = RequestIdVisitor::default();
        attrs.record(&mut visitor);
        if let (Some(value), Some(span)) = (visitor.0, ctx.span(id)) {
            span.extensions_mut().insert(CorrelationId(value));
        }
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let mut visitor = RequestIdVisitor::default();
        values.record(&mut visitor);
        if let (Some(value), Some(span)) = (visitor.0, ctx.span(id)) {
            span.extensions_mut().replace(CorrelationId(value));
        }
    }
}

#[derive(Default)]
struct RequestIdVisitor(Option<String>);

impl Visit for RequestIdVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == REQUEST_ID_FIELD {
            self.0 = Some(value.to_owned());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == REQUEST_ID_FIELD {
            self.0 = Some(format!("{:?}", value));
        }
    }
}

/// Nearest correlation ID in the scope, innermost span first.
pub(crate) fn request_id_in_scope<'a, S>(scope: Option<Scope<'a, S>>) -> Option<String>
where
    S: LookupSpan<'a>,
{
    scope?.find_map(|span| {
        let extensions = span.extensions();
        let id = extensions.get::<CorrelationId>().map(|c| c.0.clone());
        id
    })
}
