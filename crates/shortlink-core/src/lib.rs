#![deny(missing_docs)]

//! # Shortlink Core
//!
//! Domain logic of the shortlink URL shortener, independent of the REST
//! layer.
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`options`] | `UrlShortenerOptions` and override resolution |
//! | [`http`] | `HttpClient` seam, `RequestOptions`, reqwest adapter, IDN helper |
//! | [`url_validator`] | Live reachability check for long URLs |
//! | [`short_url`] | `ShortUrl` model and the in-memory `ShortUrlService` |
//! | [`error`] | `CoreError` |

pub mod error;
pub mod http;
pub mod options;
pub mod short_url;
pub mod url_validator;

pub use error::*;
pub use http::*;
pub use options::*;
pub use short_url::*;
pub use url_validator::*;
