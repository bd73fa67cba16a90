//! Concrete HTTP senders for the end of the middleware chain.

mod http;

pub use http::HttpSender;
