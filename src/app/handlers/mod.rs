// SPDX-License-Identifier: GPL-3.0-only

//! Message handler modules
//!
//! Handlers are grouped by functional domain and implemented as methods on
//! [`AppModel`](crate::app::AppModel).

pub mod capture;
pub mod gallery;
pub mod system;
