//! Domain identifiers (strongly-typed IDs).
//!
//! ULID-based ids behind a phantom-typed `Id<T>`: `InstanceId` and
//! `OwnerToken` are distinct types that cannot be mixed while sharing one
//! implementation. ULIDs sort by creation time, so instance ids order by
//! activation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// Marker trait for each id type.
///
/// Provides the prefix used by `Display` ("instance-", "owner-").
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// Generic id type.
///
/// `T` is `PhantomData`: zero runtime cost, compile-time distinctness.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

/// Marker for application instances (one id per activation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Instance {}

impl IdMarker for Instance {
    fn prefix() -> &'static str {
        "instance-"
    }
}

/// Marker for state-store subscription owners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Owner {}

impl IdMarker for Owner {
    fn prefix() -> &'static str {
        "owner-"
    }
}

/// Identifier of one activation of an application.
pub type InstanceId = Id<Instance>;

/// Identifier of one state-store subscriber (an application instance or
/// the host shell). One owner holds at most one active listener.
pub type OwnerToken = Id<Owner>;
