//! # Services Module
//!
//! Business logic between the HTTP handlers and the ADS client.
//!
//! | Service | Responsibility |
//! |---------|---------------|
//! | `session` | Anonymous token lifecycle, upstream cookie jar |
//! | `results` | Reshaping search results before rendering |

pub mod results;
pub mod session;
