pub mod sqlsrv;

pub use self::in_memory_test::{
    FailPoint, InMemoryConnection, InMemoryResponse, InMemoryStatement, InMemoryTestClient,
    InMemoryTestResponseBuilder, RecordedQuery,
};
pub use self::sqlsrv::SqlsrvDriver;
