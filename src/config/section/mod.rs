//! Configuration section definitions.
//!
//! Each module corresponds to a section in `rainbow.toml`:
//!
//! | Module    | TOML Section  | Purpose                              |
//! |-----------|---------------|--------------------------------------|
//! | `form`    | `[form]`      | Initial form values                  |
//! | `preview` | `[preview]`   | Preview page title and output path   |
//! | `service` | `[service]`   | Contrast service URL and throttling  |

mod form;
mod preview;
mod service;

pub use form::FormConfig;
pub use preview::PreviewConfig;
pub use service::ServiceConfig;
