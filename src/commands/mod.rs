//! Operations on an external
//!
//! Both are implemented as methods on `ExternalRepository`:
//!
//! - `checkout`: clone if needed, bind a remote, fetch, validate and check out the declared reference
//! - `status`: compare HEAD with the declared reference and check for modified tracked files

pub mod checkout;
pub mod status;
