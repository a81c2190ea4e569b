mod metrics;
mod request_logger;

pub use metrics::MetricsMiddleware;
pub use request_logger::RequestLogger;
