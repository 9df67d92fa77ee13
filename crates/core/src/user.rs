// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User identity.
//!
//! Identity is asserted by the caller (the `X-User-ID` header at the HTTP
//! edge); there is no authentication layer in this crate.

crate::define_id! {
    /// Opaque caller-asserted user identifier.
    pub struct UserId;
}
