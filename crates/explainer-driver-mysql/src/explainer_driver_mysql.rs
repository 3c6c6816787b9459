//! MySQL/MariaDB driver implementation

mod connection;
mod driver;

pub use connection::MySqlConnection;
pub use driver::MySqlDriver;
