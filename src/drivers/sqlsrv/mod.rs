//! Microsoft SQL Server driver.

mod codec;
mod driver;
mod errors;
mod result;

pub use codec::SqlsrvCodec;
pub use driver::SqlsrvDriver;
pub use errors::{classify, create_error, CONNECTION_SQL_STATES};
pub use result::SqlsrvResultAdapter;
