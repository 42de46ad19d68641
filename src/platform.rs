/// SQL generation collaborator of a driver.
///
/// Drivers hand out the platform matching their vendor; the platform owns
/// vendor-specific SQL rewriting, which this crate does not implement.
pub trait Platform {
    /// Short vendor name, e.g. `mssql`.
    fn name(&self) -> &'static str;
}

/// Platform of Microsoft SQL Server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MsSqlPlatform;

impl Platform for MsSqlPlatform {
    fn name(&self) -> &'static str {
        "mssql"
    }
}
