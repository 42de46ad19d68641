use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Vendor-specific column type code, as reported by the field metadata.
///
/// SQL Server reports the ODBC SQL type codes, including its own extensions
/// for `time`, `datetimeoffset` and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeType(pub i16);

impl NativeType {
    pub const CHAR: NativeType = NativeType(1);
    pub const NUMERIC: NativeType = NativeType(2);
    /// `decimal`, `money` and `smallmoney`.
    pub const DECIMAL: NativeType = NativeType(3);
    pub const INTEGER: NativeType = NativeType(4);
    pub const SMALLINT: NativeType = NativeType(5);
    pub const FLOAT: NativeType = NativeType(6);
    pub const REAL: NativeType = NativeType(7);
    pub const VARCHAR: NativeType = NativeType(12);
    pub const DATE: NativeType = NativeType(91);
    /// `datetime`, `datetime2` and `smalldatetime`.
    pub const DATETIME: NativeType = NativeType(93);
    pub const LONGVARCHAR: NativeType = NativeType(-1);
    pub const BINARY: NativeType = NativeType(-2);
    pub const VARBINARY: NativeType = NativeType(-3);
    pub const LONGVARBINARY: NativeType = NativeType(-4);
    pub const BIGINT: NativeType = NativeType(-5);
    pub const TINYINT: NativeType = NativeType(-6);
    pub const BIT: NativeType = NativeType(-7);
    pub const WCHAR: NativeType = NativeType(-8);
    pub const WVARCHAR: NativeType = NativeType(-9);
    pub const WLONGVARCHAR: NativeType = NativeType(-10);
    pub const GUID: NativeType = NativeType(-11);
    pub const VARIANT: NativeType = NativeType(-150);
    pub const XML: NativeType = NativeType(-152);
    pub const TIME: NativeType = NativeType(-154);
    pub const DATETIMEOFFSET: NativeType = NativeType(-155);
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i16> for NativeType {
    fn from(value: i16) -> Self {
        NativeType(value)
    }
}

/// How a native value must be treated before handing it to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticKind {
    /// Usable as fetched.
    AsIs,
    Int,
    Bool,
    /// Needs vendor-aware decoding (numeric precision, time-only values).
    DriverSpecific,
    /// Needs vendor-aware decoding and the storage timezone attached.
    DriverSpecificAndDateTime,
    /// Already carries its own offset.
    DateTime,
}

/// Mapping from native type codes to semantic kinds.
///
/// The table is total: codes without an entry are `AsIs`.
#[derive(Debug, Clone)]
pub struct TypeTable {
    kinds: HashMap<NativeType, SemanticKind>,
}

static GLOBAL: LazyLock<TypeTable> = LazyLock::new(|| TypeTable::new(isize::BITS));

impl TypeTable {
    /// Builds the table for a host whose native integer is `native_int_bits`
    /// wide. `bigint` values do not fit a narrower integer and are then left
    /// to driver-specific decoding.
    pub fn new(native_int_bits: u32) -> Self {
        let bigint = if native_int_bits < 64 {
            SemanticKind::DriverSpecific
        } else {
            SemanticKind::Int
        };
        let kinds = HashMap::from([
            (NativeType::BIGINT, bigint),
            (NativeType::BIT, SemanticKind::Bool),
            (NativeType::NUMERIC, SemanticKind::DriverSpecific),
            (NativeType::DECIMAL, SemanticKind::DriverSpecific),
            (NativeType::TIME, SemanticKind::DriverSpecific),
            (NativeType::DATE, SemanticKind::DriverSpecificAndDateTime),
            (NativeType::DATETIME, SemanticKind::DriverSpecificAndDateTime),
            (NativeType::DATETIMEOFFSET, SemanticKind::DateTime),
        ]);
        Self { kinds }
    }

    /// The process-wide table, built once for this host.
    pub fn global() -> &'static TypeTable {
        &GLOBAL
    }

    pub fn kind_of(&self, native: NativeType) -> SemanticKind {
        self.kinds
            .get(&native)
            .copied()
            .unwrap_or(SemanticKind::AsIs)
    }
}
