//! Error types for the graphstat core library.
//!
//! Defines the graph store and query errors exposed by the public API, their
//! stable machine-readable codes, and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::graph::EntityKind;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

pub(crate) use define_error_codes;

/// An error produced by graph store mutations and analysis queries.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// A scalar property was referenced by name but is not registered.
    #[error("no {kind} property named `{name}` is registered")]
    UnknownProperty {
        /// Entity kind the property was looked up for.
        kind: EntityKind,
        /// Name that failed to resolve.
        name: Arc<str>,
    },
    /// A vertex index was outside the store's bounds.
    #[error("vertex {vertex} is out of bounds (vertex_count {vertex_count})")]
    VertexOutOfBounds {
        /// The requested vertex index.
        vertex: usize,
        /// Number of vertices in the store.
        vertex_count: usize,
    },
    /// An edge index was outside the store's bounds.
    #[error("edge {edge} is out of bounds (edge_count {edge_count})")]
    EdgeOutOfBounds {
        /// The requested edge index.
        edge: usize,
        /// Number of edges in the store.
        edge_count: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// A scalar property was referenced by name but is not registered.
        UnknownProperty => UnknownProperty { .. } => "GRAPH_UNKNOWN_PROPERTY",
        /// A vertex index was outside the store's bounds.
        VertexOutOfBounds => VertexOutOfBounds { .. } => "GRAPH_VERTEX_OUT_OF_BOUNDS",
        /// An edge index was outside the store's bounds.
        EdgeOutOfBounds => EdgeOutOfBounds { .. } => "GRAPH_EDGE_OUT_OF_BOUNDS",
    }
}

impl GraphError {
    pub(crate) fn unknown_property(kind: EntityKind, name: &str) -> Self {
        Self::UnknownProperty {
            kind,
            name: Arc::from(name),
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, GraphError>;
