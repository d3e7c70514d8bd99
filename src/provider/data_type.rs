use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A variable element type.
///
/// The atomic types can be selected and copied.
/// The user-defined types ([`DataType::Compound`], [`DataType::VLen`], [`DataType::Opaque`], [`DataType::Enum`]) are catalogued but never selected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[rustfmt::skip]
pub enum DataType {
    /// `byte` Integer in `[-2^7, 2^7-1]`.
    #[display("byte")]
    Byte,
    /// `char` Single character text.
    #[display("char")]
    Char,
    /// `short` Integer in `[-2^15, 2^15-1]`.
    #[display("short")]
    Short,
    /// `int` Integer in `[-2^31, 2^31-1]`.
    #[display("int")]
    Int,
    /// `float` IEEE 754 single-precision floating point.
    #[display("float")]
    Float,
    /// `double` IEEE 754 double-precision floating point.
    #[display("double")]
    Double,
    /// `ubyte` Integer in `[0, 2^8-1]`.
    #[display("ubyte")]
    UByte,
    /// `ushort` Integer in `[0, 2^16-1]`.
    #[display("ushort")]
    UShort,
    /// `uint` Integer in `[0, 2^32-1]`.
    #[display("uint")]
    UInt,
    /// `int64` Integer in `[-2^63, 2^63-1]`.
    #[display("int64")]
    Int64,
    /// `uint64` Integer in `[0, 2^64-1]`.
    #[display("uint64")]
    UInt64,
    /// `string` Variable length text.
    #[display("string")]
    String,
    /// A variable length sequence of another type.
    #[display("vlen")]
    VLen,
    /// Opaque binary blobs.
    #[display("opaque")]
    Opaque,
    /// An enumeration.
    #[display("enum")]
    Enum,
    /// A compound (struct) type.
    #[display("compound")]
    Compound,
}

impl DataType {
    /// Indicates if the data type is atomic.
    #[must_use]
    pub const fn is_atomic(&self) -> bool {
        !matches!(self, Self::VLen | Self::Opaque | Self::Enum | Self::Compound)
    }

    /// Indicates if the data type holds text.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Char | Self::String)
    }
}
