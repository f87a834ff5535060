/// File name of the SQLite database inside the application data directory.
pub const DEFAULT_DB_FILE_NAME: &str = "chat.db";

/// Environment variable that overrides the database location.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Default staleness window for resuming a stream, in seconds.
pub const DEFAULT_STREAM_STALENESS_SECS: i64 = 15;
