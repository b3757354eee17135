//! xlsx2json: download a spreadsheet by URL and return its first worksheet
//! as JSON rows.

pub mod config;
pub mod convert;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod storage;
pub mod workbook;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
