mod driver;
mod vendor;

pub use driver::{Driver, ResultAdapter};
pub use vendor::{
    CursorType, FieldMetadata, ServerInfo, VendorClient, VendorConnection, VendorError,
    VendorErrors, VendorResult, VendorStatement,
};
