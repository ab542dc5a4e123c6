use std::fmt;

/// A named MariaDB source database.
///
/// Built once per invocation by the source registry and never persisted. `name` is the
/// provenance tag written to every cache row and warehouse row fetched from the source.
#[derive(Clone, PartialEq, Eq)]
pub struct Source {
    pub name: String,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("name", &self.name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}
