//! Synchronization and cleanliness status of an external
//!
//! - `external_status`: the sync verdict, clean/dirty verdict and display names
//!   reported for one working copy

pub mod external_status;
