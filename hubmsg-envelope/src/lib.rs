//! The Hubmsg-Envelope Crate
//!
//! The message envelope a device client exchanges with Azure IoT Hub: a byte
//! payload, system properties (ids, expiry, routing), user-defined properties,
//! and the callback the send pipeline reports progress to.

#![warn(
    absolute_paths_not_starting_with_crate,
    anonymous_parameters,
    bare_trait_objects,
    deprecated_in_future,
    elided_lifetimes_in_paths,
    ellipsis_inclusive_range_patterns,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    meta_variable_misuse,
    missing_debug_implementations,
    missing_docs,
    non_ascii_idents,
    single_use_lifetimes,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    variant_size_differences
)]

/// Envelope errors
pub mod error;

/// Device and module identities
pub mod identity;

/// Message and correlation identifier generation
pub mod ids;

/// The message envelope and its parts
pub mod messages;

/// Wall-clock and IoT Hub timestamp helpers
pub mod time;

pub use crate::error::*;
pub use crate::identity::*;
pub use crate::ids::*;
pub use crate::messages::callback::*;
pub use crate::messages::envelope::*;
pub use crate::messages::properties::*;
pub use crate::messages::MessageType;
